#![forbid(unsafe_code)]

//! Terminal text handling for quale.
//!
//! This crate measures and wraps text that may carry ANSI escape sequences:
//! - [`codes`] - per-code-point width and break classification
//! - [`escape`] - stateless ANSI/C1 control-sequence matching
//! - [`wrap`] - [`width_of`] and [`break_line`]
//! - [`ansi`] - control-sequence constants and cursor/erase builders
//!
//! # Example
//! ```
//! use quale_text::{break_line, width_of, BreakOptions};
//!
//! let text = "\x1b[44mlorem ipsum\x1b[49m";
//! assert_eq!(width_of(text), 11);
//!
//! let lines = break_line(text, 5, &BreakOptions::new().trim_break(true));
//! assert_eq!(lines, vec!["\x1b[44mlorem\x1b[49m", "\x1b[44mipsum\x1b[49m"]);
//! ```

pub mod ansi;
pub mod codes;
pub mod escape;
pub mod wrap;

pub use ansi::CursorSaveStrategy;
pub use escape::strip_ansi;
pub use wrap::{BreakOptions, MIN_BREAK_WIDTH, break_line, break_lines, width_of};
