#![forbid(unsafe_code)]

//! Key paths into nested [`Object`]s.
//!
//! A path is a sequence of [`Key`]s. Dotted strings split on `.`; a bare
//! symbol is a one-segment path; a sequence of keys is taken as-is.
//!
//! # Example
//! ```
//! use quale_core::keypath::{has_key, key_path, lget, lset};
//! use quale_core::value::{Object, Value};
//!
//! let mut root = Value::Object(Object::new());
//! lset(&mut root, &key_path("a.b"), Value::from(1), None).unwrap();
//!
//! let obj = root.as_object().unwrap();
//! assert!(has_key(obj, &key_path("a.b")));
//! assert_eq!(lget(obj, &key_path("a.b")), Some(&Value::from(1)));
//! assert_eq!(lget(obj, &key_path("a.c")), None);
//! ```

use std::sync::Arc;

use crate::error::{ProxyError, Result};
use crate::value::{Key, Object, Symbol, Value};

/// A normalized key path.
pub type KeyPath = Vec<Key>;

/// Conversion into a [`KeyPath`].
pub trait IntoKeyPath {
    fn into_key_path(self) -> KeyPath;
}

impl IntoKeyPath for &str {
    fn into_key_path(self) -> KeyPath {
        self.split('.').map(Key::from).collect()
    }
}

impl IntoKeyPath for String {
    fn into_key_path(self) -> KeyPath {
        self.as_str().into_key_path()
    }
}

impl IntoKeyPath for &String {
    fn into_key_path(self) -> KeyPath {
        self.as_str().into_key_path()
    }
}

impl IntoKeyPath for Symbol {
    fn into_key_path(self) -> KeyPath {
        vec![Key::Symbol(self)]
    }
}

impl IntoKeyPath for &Symbol {
    fn into_key_path(self) -> KeyPath {
        vec![Key::Symbol(self.clone())]
    }
}

impl IntoKeyPath for Key {
    fn into_key_path(self) -> KeyPath {
        vec![self]
    }
}

impl IntoKeyPath for KeyPath {
    fn into_key_path(self) -> KeyPath {
        self
    }
}

impl IntoKeyPath for &[Key] {
    fn into_key_path(self) -> KeyPath {
        self.to_vec()
    }
}

impl IntoKeyPath for &KeyPath {
    fn into_key_path(self) -> KeyPath {
        self.clone()
    }
}

impl<const N: usize> IntoKeyPath for [&str; N] {
    fn into_key_path(self) -> KeyPath {
        self.into_iter().map(Key::from).collect()
    }
}

impl<const N: usize> IntoKeyPath for [Key; N] {
    fn into_key_path(self) -> KeyPath {
        self.into_iter().collect()
    }
}

/// Normalize any path-like input into a [`KeyPath`].
#[must_use]
pub fn key_path(input: impl IntoKeyPath) -> KeyPath {
    input.into_key_path()
}

/// Render a path as dotted text, for messages.
#[must_use]
pub fn join(path: &[Key]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Whether every segment of `path` exists, own or inherited.
#[must_use]
pub fn has_key(obj: &Object, path: &[Key]) -> bool {
    lget(obj, path).is_some()
}

/// Value at `path`, or `None` when a segment is missing or an
/// intermediate value is not an object. The empty path resolves to `None`.
#[must_use]
pub fn lget<'a>(obj: &'a Object, path: &[Key]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut value = obj.get(first)?;
    for key in rest {
        value = value.as_object()?.get(key)?;
    }
    Some(value)
}

/// Assign `value` at `path` under `obj`, creating intermediate objects
/// (with `proto` as their prototype) wherever the current value is not an
/// object.
///
/// # Errors
///
/// [`ProxyError::Type`] if `obj` is not an object or `path` is empty.
pub fn lset(
    obj: &mut Value,
    path: &[Key],
    value: Value,
    proto: Option<&Arc<Object>>,
) -> Result<()> {
    let Value::Object(root) = obj else {
        return Err(ProxyError::Type("obj must be an object"));
    };
    lset_object(root, path, value, proto)
}

/// [`lset`] on a root already known to be an object.
///
/// # Errors
///
/// [`ProxyError::Type`] if `path` is empty.
pub fn lset_object(
    root: &mut Object,
    path: &[Key],
    value: Value,
    proto: Option<&Arc<Object>>,
) -> Result<()> {
    let (leaf, parents) = path
        .split_last()
        .ok_or(ProxyError::Type("empty keypath"))?;
    with_object(root, parents, proto, |parent| {
        parent.insert(leaf.clone(), value);
    });
    Ok(())
}

/// Walk `path` from `root`, replacing any missing or non-object own value
/// with an empty object (prototype `proto`).
pub fn ensure_object(root: &mut Object, path: &[Key], proto: Option<&Arc<Object>>) {
    with_object(root, path, proto, |_| {});
}

/// Run `f` on the object at `path`, creating it as [`ensure_object`] does.
/// New objects are attached to their parent after `f` has seen them.
fn with_object(
    node: &mut Object,
    path: &[Key],
    proto: Option<&Arc<Object>>,
    f: impl FnOnce(&mut Object),
) {
    let Some((head, rest)) = path.split_first() else {
        f(node);
        return;
    };
    if let Some(Value::Object(child)) = node.get_own_mut(head) {
        with_object(child, rest, proto, f);
        return;
    }
    let mut child = Object::with_proto(proto.cloned());
    with_object(&mut child, rest, proto, f);
    node.insert(head.clone(), child);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(json: serde_json::Value) -> Object {
        match Value::from(json) {
            Value::Object(obj) => obj,
            _ => Object::new(),
        }
    }

    #[test]
    fn dotted_string_splits() {
        assert_eq!(
            key_path("a.b.c"),
            vec![Key::from("a"), Key::from("b"), Key::from("c")]
        );
        assert_eq!(key_path("a"), vec![Key::from("a")]);
    }

    #[test]
    fn symbol_is_single_segment() {
        let sym = Symbol::new("x.y");
        assert_eq!(key_path(&sym), vec![Key::Symbol(sym)]);
    }

    #[test]
    fn sequences_pass_through() {
        let sym = Symbol::anonymous();
        let path = vec![Key::from("a.b"), Key::Symbol(sym)];
        assert_eq!(key_path(path.clone()), path);
        assert_eq!(key_path(["a", "b"]), key_path("a.b"));
    }

    #[test]
    fn join_renders_dotted() {
        assert_eq!(join(&key_path("a.b")), "a.b");
        assert_eq!(join(&[]), "");
    }

    #[test]
    fn lget_walks_nested_objects() {
        let obj = object(json!({"a": {"b": {"c": 3}}, "x": 1}));
        assert_eq!(lget(&obj, &key_path("a.b.c")), Some(&Value::from(3)));
        assert!(lget(&obj, &key_path("a.b")).is_some_and(Value::is_object));
        assert_eq!(lget(&obj, &key_path("x.y")), None);
        assert_eq!(lget(&obj, &key_path("a.z")), None);
        assert_eq!(lget(&obj, &[]), None);
    }

    #[test]
    fn has_key_sees_inherited_keys() {
        let proto = Arc::new(object(json!({"inherited": 1})));
        let mut obj = Object::with_proto(Some(proto));
        obj.insert("own", 2);
        assert!(has_key(&obj, &key_path("own")));
        assert!(has_key(&obj, &key_path("inherited")));
        assert!(!has_key(&obj, &key_path("missing")));
    }

    #[test]
    fn lset_creates_intermediates() {
        let mut root = Value::Object(Object::new());
        lset(&mut root, &key_path("a.b.c"), Value::from(1), None).unwrap();
        assert_eq!(root, Value::from(json!({"a": {"b": {"c": 1}}})));
    }

    #[test]
    fn lset_replaces_scalar_intermediate() {
        let mut root = Value::from(json!({"a": 5}));
        lset(&mut root, &key_path("a.b"), Value::from(2), None).unwrap();
        assert_eq!(root, Value::from(json!({"a": {"b": 2}})));
    }

    #[test]
    fn lset_uses_proto_for_new_nodes() {
        let proto = Arc::new(object(json!({"p": true})));
        let mut root = Value::Object(Object::new());
        lset(&mut root, &key_path("a.b"), Value::from(1), Some(&proto)).unwrap();
        let a = root
            .as_object()
            .and_then(|o| o.get(&"a".into()))
            .and_then(Value::as_object)
            .unwrap();
        assert_eq!(a.get(&"p".into()), Some(&Value::from(true)));
        assert!(!a.contains_own_key(&"p".into()));
    }

    #[test]
    fn lset_keeps_existing_siblings() {
        let mut root = Value::from(json!({"a": {"x": 1}}));
        lset(&mut root, &key_path("a.b.c"), Value::from(2), None).unwrap();
        assert_eq!(root, Value::from(json!({"a": {"x": 1, "b": {"c": 2}}})));
    }

    #[test]
    fn ensure_object_replaces_scalars_only() {
        let mut obj = object(json!({"a": {"keep": true}, "s": 3}));
        ensure_object(&mut obj, &key_path("a.b"), None);
        ensure_object(&mut obj, &key_path("s.t"), None);
        ensure_object(&mut obj, &[], None);
        assert_eq!(
            obj,
            object(json!({"a": {"keep": true, "b": {}}, "s": {"t": {}}}))
        );
    }

    #[test]
    fn lset_rejects_non_object_root() {
        let mut root = Value::from(1);
        let err = lset(&mut root, &key_path("a"), Value::Null, None).unwrap_err();
        assert!(matches!(err, ProxyError::Type(_)));
    }

    #[test]
    fn lset_rejects_empty_path() {
        let mut root = Value::Object(Object::new());
        let err = lset(&mut root, &[], Value::Null, None).unwrap_err();
        assert_eq!(err, ProxyError::Type("empty keypath"));
    }
}
