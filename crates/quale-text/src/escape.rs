#![forbid(unsafe_code)]

//! ANSI and C1 control-sequence matching.
//!
//! All matchers are stateless: nothing is carried between calls, so a
//! match at one offset can never influence a later one.
//!
//! # Example
//! ```
//! use quale_text::escape::{match_at, strip_ansi};
//!
//! let s = "\x1b[31m\x1b[41mred\x1b[39m";
//! let (run, end) = match_at(s, 0).unwrap();
//! assert_eq!(run, "\x1b[31m\x1b[41m");
//! assert_eq!(end, 10);
//! assert_eq!(strip_ansi(s), "red");
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::ansi::{BG_CLOSE, CSI_C1, ESC};

/// One control sequence, introduced by ESC (0x1B) or the C1 CSI (0x9B).
///
/// Covers OSC-style sequences terminated by BEL and CSI/ESC sequences
/// terminated by a final byte.
const SEQUENCE: &str = concat!(
    r"[\x1B\x{9B}][\[\]()#;?]*",
    r"(?:(?:(?:[a-zA-Z0-9]*(?:;[-a-zA-Z0-9/#&.:=?%@~_]*)*)?\x07)",
    r"|(?:(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-PR-TZcf-ntqry=><~]))",
);

static GLOBAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SEQUENCE).expect("control sequence pattern is valid"));

static CONSECUTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{SEQUENCE})+")).expect("consecutive sequence pattern is valid")
});

static BACKGROUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[4[0-9](?:[0-9;]*m)?").expect("background sequence pattern is valid")
});

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r?\n|[\x0B\x0C\x{85}\x{2028}\x{2029}]").expect("line break pattern is valid")
});

/// Match a run of one or more adjacent control sequences starting exactly
/// at byte `offset`.
///
/// Returns the matched run and the byte offset just past it. Returns `None`
/// when `offset` is out of range, not on a char boundary, or no sequence
/// starts there.
#[must_use]
pub fn match_at(text: &str, offset: usize) -> Option<(&str, usize)> {
    let rest = text.get(offset..)?;
    if !rest.starts_with([ESC, CSI_C1]) {
        return None;
    }
    CONSECUTIVE
        .find(rest)
        .map(|m| (m.as_str(), offset + m.end()))
}

/// Extract the SGR background sub-sequences (codes 40-49) from a matched
/// control-sequence run.
#[must_use]
pub fn background_sequences(run: &str) -> Vec<&str> {
    BACKGROUND.find_iter(run).map(|m| m.as_str()).collect()
}

/// Whether a background sub-sequence resets the background.
#[inline]
#[must_use]
pub fn is_background_close(seq: &str) -> bool {
    seq == BG_CLOSE
}

/// Remove every control sequence from `text`.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    GLOBAL.replace_all(text, "")
}

/// Normalize `\r\n`, VT, FF, NEL, and the Unicode line/paragraph
/// separators to `\n`.
#[must_use]
pub fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    LINE_BREAK.replace_all(text, "\n")
}
