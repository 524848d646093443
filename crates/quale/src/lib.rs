#![forbid(unsafe_code)]

//! quale public facade crate.
//!
//! Re-exports the terminal text utilities from `quale-text` and the value
//! model and [`HashProxy`] from `quale-core`, with a prelude for everyday use.
//!
//! # Example
//! ```
//! use quale::prelude::*;
//!
//! fn run() -> Result<()> {
//!     let mut hp = HashProxy::create(Object::new(), HashProxyOptions::default())?;
//!     hp.create_entry("title", "\x1b[1mhello world\x1b[22m")?;
//!
//!     let title = hp.target().get("title").and_then(Value::as_str).unwrap_or_default();
//!     assert_eq!(width_of(title), 11);
//!     assert_eq!(break_line(title, 5, &BreakOptions::default()).len(), 3);
//!     Ok(())
//! }
//! run().unwrap();
//! ```

use std::fmt;

// --- Text re-exports -------------------------------------------------------

pub use quale_text::ansi::CursorSaveStrategy;
pub use quale_text::{BreakOptions, break_line, break_lines, strip_ansi, width_of};

// --- Core re-exports -------------------------------------------------------

pub use quale_core::{
    Entry, HashProxy, HashProxyOptions, Ingress, IntoKeyPath, Key, KeyPath, Object, ProxyError,
    Symbol, Target, Value, has_key, key_path, lget, lset,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for quale.
#[derive(Debug)]
pub enum Error {
    /// A key-path or proxy operation failed.
    Proxy(ProxyError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proxy(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Proxy(err) => Some(err),
        }
    }
}

impl From<ProxyError> for Error {
    fn from(err: ProxyError) -> Self {
        Self::Proxy(err)
    }
}

/// Standard result type for quale APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BreakOptions, Error, HashProxy, HashProxyOptions, Key, Object, Result, Symbol, Value,
        break_line, strip_ansi, width_of,
    };

    pub use crate::{core, text};
}

pub use quale_core as core;
pub use quale_text as text;
