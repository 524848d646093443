#![forbid(unsafe_code)]

//! Errors raised by key-path writes and [`HashProxy`](crate::hash_proxy::HashProxy).

use std::fmt;

use crate::keypath::{self, KeyPath};

/// Failure of a key-path or proxy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// An argument failed a structural precondition.
    Argument(&'static str),
    /// A value failed a semantic precondition (structural vs. scalar).
    Value(&'static str),
    /// The key path already resolves to a value.
    KeyExists(KeyPath),
    /// A key path or root object had the wrong shape.
    Type(&'static str),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument(msg) | Self::Value(msg) | Self::Type(msg) => f.write_str(msg),
            Self::KeyExists(path) => write!(f, "key exists: {}", keypath::join(path)),
        }
    }
}

impl std::error::Error for ProxyError {}

/// Result type for key-path and proxy operations.
pub type Result<T> = std::result::Result<T, ProxyError>;
