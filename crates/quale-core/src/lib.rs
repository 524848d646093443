#![forbid(unsafe_code)]

//! Core data model for quale.
//!
//! - [`value`] - dynamic [`Value`]s, [`Object`]s with prototypes, and [`Symbol`] keys
//! - [`keypath`] - key-path normalization plus [`lget`]/[`lset`]/[`has_key`]
//! - [`hash_proxy`] - [`HashProxy`], a source object mirrored into a transformed view
//! - [`error`] - [`ProxyError`]
//!
//! # Example
//! ```
//! use quale_core::{HashProxy, HashProxyOptions, Value};
//!
//! let mut hp = HashProxy::create(serde_json::json!({"a": 5}), HashProxyOptions::default()).unwrap();
//! hp.create_entry("b", 4).unwrap();
//! assert_eq!(hp.target().get("b"), Some(&Value::from(4)));
//! ```

pub mod error;
pub mod hash_proxy;
pub mod keypath;
pub mod logging;
pub mod value;

pub use error::{ProxyError, Result};
pub use hash_proxy::{Entry, Filter, HashProxy, HashProxyOptions, Ingress, Target, Transform};
pub use keypath::{IntoKeyPath, KeyPath, has_key, key_path, lget, lset};
pub use value::{Key, Object, Symbol, Value};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
