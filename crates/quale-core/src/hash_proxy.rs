#![forbid(unsafe_code)]

//! A source object mirrored into a transformed target view.
//!
//! [`HashProxy`] owns a source [`Object`] and keeps, for every key path in
//! it, an [`Entry`]: structural nodes are [`Entry::Node`], scalar leaves are
//! [`Entry::Leaf`] holding the transformed view of the source value.
//!
//! Writes go through [`Ingress`]. A leaf write is checked by the filter; if
//! accepted, the raw value lands in the source and `transform(value)` lands
//! in the target view. A rejected write changes neither. New paths only
//! appear through [`HashProxy::create_entry`] (or [`HashProxy::upsert_entry`]
//! on an absent path).
//!
//! # Example
//! ```
//! use quale_core::hash_proxy::{HashProxy, HashProxyOptions};
//! use quale_core::value::Value;
//!
//! let double = |v: &Value| Value::from(v.as_f64().unwrap_or_default() * 2.0);
//! let source = Value::from(serde_json::json!({"a": {"b": 0}}));
//! let mut hp = HashProxy::create(source, HashProxyOptions::new().transform(double)).unwrap();
//!
//! hp.ingress().set("a.b", 4);
//! assert_eq!(hp.target().get("a.b"), Some(&Value::from(8)));
//! assert_eq!(hp.ingress().get("a.b"), Some(&Value::from(4)));
//! ```

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{ProxyError, Result};
use crate::keypath::{IntoKeyPath, KeyPath, ensure_object, has_key, lget, lset_object};
use crate::value::{Key, Object, Value};

/// Maps a source value to its target view.
pub type Transform = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Decides whether an ingress write is applied.
pub type Filter = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Options for [`HashProxy::create`].
pub struct HashProxyOptions {
    /// Applied to every accepted value before it reaches the target.
    /// Default: identity.
    pub transform: Transform,
    /// Gate for ingress writes. Default: accept everything.
    pub filter: Filter,
    /// Prototype for structural nodes created by [`HashProxy::create_entry`].
    /// Default: the source's own prototype.
    pub proto: Option<Arc<Object>>,
    /// Whether ingress entries appear in [`Ingress::to_object`].
    /// Default: false.
    pub enumerable: bool,
}

impl Default for HashProxyOptions {
    fn default() -> Self {
        Self {
            transform: Box::new(Value::clone),
            filter: Box::new(|_| true),
            proto: None,
            enumerable: false,
        }
    }
}

impl HashProxyOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn transform(mut self, transform: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        self.transform = Box::new(transform);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    #[must_use]
    pub fn proto(mut self, proto: impl Into<Arc<Object>>) -> Self {
        self.proto = Some(proto.into());
        self
    }

    #[must_use]
    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }
}

impl fmt::Debug for HashProxyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashProxyOptions")
            .field("transform", &"<fn>")
            .field("filter", &"<fn>")
            .field("proto", &self.proto)
            .field("enumerable", &self.enumerable)
            .finish()
    }
}

/// A wired key path.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A structural node; its children are the entries one segment deeper.
    Node,
    /// A scalar leaf. `view` is the transformed source value, or `None` if
    /// no value has been accepted yet.
    Leaf { view: Option<Value> },
}

/// Source object, target views, and the wiring between them.
#[derive(Debug)]
pub struct HashProxy {
    source: Object,
    entries: FxHashMap<KeyPath, Entry>,
    opts: HashProxyOptions,
}

impl HashProxy {
    /// Build a proxy over `source`, wiring every key path it contains.
    ///
    /// # Errors
    ///
    /// [`ProxyError::Argument`] if `source` is not an object.
    pub fn create(source: impl Into<Value>, mut opts: HashProxyOptions) -> Result<Self> {
        let Value::Object(source) = source.into() else {
            return Err(ProxyError::Argument("source must be an object"));
        };
        if opts.proto.is_none() {
            opts.proto = source.proto().cloned();
        }

        let span = crate::debug_span!("hash_proxy.create", keys = source.len());
        let _guard = span.enter();

        let mut entries = FxHashMap::default();
        let mut prefix = KeyPath::new();
        wire(&source, &mut prefix, &mut entries, &opts.transform);
        crate::debug!(entries = entries.len(), "hash proxy wired");

        Ok(Self {
            source,
            entries,
            opts,
        })
    }

    /// The source object, holding the raw accepted values.
    #[must_use]
    pub fn source(&self) -> &Object {
        &self.source
    }

    #[must_use]
    pub fn into_source(self) -> Object {
        self.source
    }

    #[must_use]
    pub fn options(&self) -> &HashProxyOptions {
        &self.opts
    }

    /// Read-only view of the transformed values.
    #[must_use]
    pub fn target(&self) -> Target<'_> {
        Target { proxy: self }
    }

    /// Write-facing view over the source.
    pub fn ingress(&mut self) -> Ingress<'_> {
        Ingress { proxy: self }
    }

    /// The entry wired at `path`, if any.
    #[must_use]
    pub fn entry(&self, path: impl IntoKeyPath) -> Option<&Entry> {
        self.entries.get(path.into_key_path().as_slice())
    }

    /// Introduce a new scalar leaf at `path`, creating structural nodes for
    /// every missing intermediate segment, then write `value` through the
    /// ingress. A filter that rejects `value` leaves the leaf wired but
    /// without a value.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::Type`] if `path` is empty.
    /// - [`ProxyError::Value`] if `value` is an object.
    /// - [`ProxyError::KeyExists`] if `path` already resolves in the source.
    pub fn create_entry(&mut self, path: impl IntoKeyPath, value: impl Into<Value>) -> Result<()> {
        let path = path.into_key_path();
        let value = value.into();
        check_entry(&path, &value)?;
        if has_key(&self.source, &path) {
            return Err(ProxyError::KeyExists(path));
        }
        crate::debug!(path = %crate::keypath::join(&path), "create entry");

        let parents = &path[..path.len() - 1];
        ensure_object(&mut self.source, parents, self.opts.proto.as_ref());
        for depth in 1..=parents.len() {
            self.entries.insert(parents[..depth].to_vec(), Entry::Node);
        }
        self.entries
            .insert(path.clone(), Entry::Leaf { view: None });
        self.ingress().set(path, value);
        Ok(())
    }

    /// Write `value` at an existing scalar path, or create it if absent.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::Type`] if `path` is empty.
    /// - [`ProxyError::Value`] if `value` is an object, or if `path` holds an
    ///   object.
    pub fn upsert_entry(&mut self, path: impl IntoKeyPath, value: impl Into<Value>) -> Result<()> {
        let path = path.into_key_path();
        let value = value.into();
        check_entry(&path, &value)?;
        match lget(&self.source, &path) {
            None => self.create_entry(path, value),
            Some(existing) if existing.is_object() => {
                Err(ProxyError::Value("cannot overwrite an object value"))
            }
            Some(_) => {
                self.ingress().set(path, value);
                Ok(())
            }
        }
    }
}

fn check_entry(path: &[Key], value: &Value) -> Result<()> {
    if path.is_empty() {
        return Err(ProxyError::Type("empty keypath"));
    }
    if value.is_object() {
        return Err(ProxyError::Value("value cannot be an object"));
    }
    Ok(())
}

fn wire(
    obj: &Object,
    prefix: &mut KeyPath,
    entries: &mut FxHashMap<KeyPath, Entry>,
    transform: &Transform,
) {
    for (key, value) in obj.iter() {
        prefix.push(key.clone());
        match value {
            Value::Object(child) => {
                entries.insert(prefix.clone(), Entry::Node);
                wire(child, prefix, entries, transform);
            }
            scalar => {
                let view = Some(transform(scalar));
                entries.insert(prefix.clone(), Entry::Leaf { view });
            }
        }
        prefix.pop();
    }
}

/// Read-only transformed view of a [`HashProxy`].
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    proxy: &'a HashProxy,
}

impl<'a> Target<'a> {
    /// The transformed value of the leaf at `path`.
    #[must_use]
    pub fn get(&self, path: impl IntoKeyPath) -> Option<&'a Value> {
        match self.proxy.entries.get(path.into_key_path().as_slice())? {
            Entry::Leaf { view } => view.as_ref(),
            Entry::Node => None,
        }
    }

    /// Whether `path` is a structural node.
    #[must_use]
    pub fn is_node(&self, path: impl IntoKeyPath) -> bool {
        matches!(
            self.proxy.entries.get(path.into_key_path().as_slice()),
            Some(Entry::Node)
        )
    }

    /// Whether anything is wired at `path`.
    #[must_use]
    pub fn contains(&self, path: impl IntoKeyPath) -> bool {
        self.proxy
            .entries
            .contains_key(path.into_key_path().as_slice())
    }

    /// Materialize the target as a nested object. Leaves without a value
    /// are omitted.
    #[must_use]
    pub fn to_object(&self) -> Object {
        snapshot(&self.proxy.entries, |_, view| view.cloned())
    }
}

/// Write-facing view of a [`HashProxy`].
#[derive(Debug)]
pub struct Ingress<'a> {
    proxy: &'a mut HashProxy,
}

impl Ingress<'_> {
    /// The raw source value at a wired `path`.
    #[must_use]
    pub fn get(&self, path: impl IntoKeyPath) -> Option<&Value> {
        let path = path.into_key_path();
        if !self.proxy.entries.contains_key(path.as_slice()) {
            return None;
        }
        lget(&self.proxy.source, &path)
    }

    /// Write `value` at a wired `path` and report whether anything changed.
    ///
    /// - Leaf: applied when `value` is not an object and the filter accepts
    ///   it; the source receives `value` and the target receives
    ///   `transform(value)`.
    /// - Node: `value` must be an object; each of its keys already present in
    ///   the source node is written recursively, other keys are ignored.
    /// - Unwired path: ignored.
    pub fn set(&mut self, path: impl IntoKeyPath, value: impl Into<Value>) -> bool {
        let path = path.into_key_path();
        let value = value.into();
        let is_node = self
            .proxy
            .entries
            .get(path.as_slice())
            .map(|entry| matches!(entry, Entry::Node));
        match is_node {
            Some(false) => self.set_leaf(path, value),
            Some(true) => self.set_node(&path, value),
            None => {
                crate::trace!(path = %crate::keypath::join(&path), "ingress write to unwired path ignored");
                false
            }
        }
    }

    fn set_leaf(&mut self, path: KeyPath, value: Value) -> bool {
        if value.is_object() {
            crate::trace!(path = %crate::keypath::join(&path), "object write to leaf ignored");
            return false;
        }
        let proxy = &mut *self.proxy;
        if !(proxy.opts.filter)(&value) {
            crate::trace!(path = %crate::keypath::join(&path), "ingress write filtered");
            return false;
        }
        let view = Some((proxy.opts.transform)(&value));
        if lset_object(&mut proxy.source, &path, value, proxy.opts.proto.as_ref()).is_err() {
            return false;
        }
        proxy.entries.insert(path, Entry::Leaf { view });
        true
    }

    fn set_node(&mut self, path: &[Key], value: Value) -> bool {
        let Value::Object(incoming) = value else {
            crate::trace!(path = %crate::keypath::join(path), "non-object write to node ignored");
            return false;
        };
        let Some(node) = lget(&self.proxy.source, path).and_then(Value::as_object) else {
            return false;
        };
        let writes: Vec<(KeyPath, Value)> = incoming
            .into_iter()
            .filter(|(key, _)| node.contains_key(key))
            .map(|(key, child)| {
                let mut child_path = path.to_vec();
                child_path.push(key);
                (child_path, child)
            })
            .collect();
        for (child_path, child) in writes {
            self.set(child_path, child);
        }
        true
    }

    /// Materialize the ingress as a nested object of source values. Empty
    /// unless the proxy was created with `enumerable`.
    #[must_use]
    pub fn to_object(&self) -> Object {
        if !self.proxy.opts.enumerable {
            return Object::new();
        }
        let source = &self.proxy.source;
        snapshot(&self.proxy.entries, |path, _| lget(source, path).cloned())
    }
}

/// Build a nested object from the wired entries, with each leaf's value
/// supplied by `leaf`.
fn snapshot(
    entries: &FxHashMap<KeyPath, Entry>,
    leaf: impl Fn(&[Key], Option<&Value>) -> Option<Value>,
) -> Object {
    let mut out = Object::new();
    for (path, entry) in entries {
        match entry {
            Entry::Node => {
                ensure_object(&mut out, path, None);
            }
            Entry::Leaf { view } => {
                if let Some(value) = leaf(path, view.as_ref()) {
                    // Non-empty: wired paths always have at least one segment.
                    let _ = lset_object(&mut out, path, value, None);
                }
            }
        }
    }
    out
}
