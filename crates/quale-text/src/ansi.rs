#![forbid(unsafe_code)]

//! ANSI control-sequence constants and builders.
//!
//! Builders return plain `String`s; writing them to a terminal is the
//! caller's job. Counts of zero produce an empty string so callers can
//! pass computed deltas without checking them first.
//!
//! # Example
//! ```
//! use quale_text::ansi;
//!
//! assert_eq!(ansi::up(3), "\x1b[3A");
//! assert_eq!(ansi::up(0), "");
//! assert_eq!(ansi::move_to(0, 5), "\x1b[5;1H");
//! ```

use std::sync::LazyLock;

/// Escape introducer (ESC).
pub const ESC: char = '\x1b';

/// Single-byte C1 control sequence introducer.
pub const CSI_C1: char = '\u{9b}';

/// Reset the background color to the terminal default (SGR 49).
pub const BG_CLOSE: &str = "\x1b[49m";

/// First SGR background color code.
pub const SGR_BG_FIRST: u8 = 40;

/// Last SGR background code (the reset).
pub const SGR_BG_LAST: u8 = 49;

/// Environment variable used to identify the terminal program.
const TERM_PROGRAM_ENV: &str = "TERM_PROGRAM";

/// Value of [`TERM_PROGRAM_ENV`] set by macOS Terminal.app.
const APPLE_TERMINAL: &str = "Apple_Terminal";

/// Cursor up `n` rows.
#[must_use]
pub fn up(n: usize) -> String {
    csi_count(n, 'A')
}

/// Cursor down `n` rows.
#[must_use]
pub fn down(n: usize) -> String {
    csi_count(n, 'B')
}

/// Cursor right `n` columns.
#[must_use]
pub fn right(n: usize) -> String {
    csi_count(n, 'C')
}

/// Cursor left `n` columns.
#[must_use]
pub fn left(n: usize) -> String {
    csi_count(n, 'D')
}

/// Cursor to absolute column `n` (1-based).
#[must_use]
pub fn column(n: usize) -> String {
    csi_count(n, 'G')
}

/// Erase `n` characters from the cursor.
#[must_use]
pub fn erase(n: usize) -> String {
    csi_count(n, 'X')
}

/// Home the cursor and clear the whole display.
#[must_use]
pub fn clear() -> &'static str {
    "\x1b[H\x1b[2J"
}

/// Erase from the cursor to the end of the display.
#[must_use]
pub fn erase_display_below() -> &'static str {
    "\x1b[0J"
}

/// Erase the whole current line.
#[must_use]
pub fn erase_line() -> &'static str {
    "\x1b[2K"
}

/// Erase `n` lines upward from the current one, leaving the cursor at
/// column 1 of the topmost erased line.
#[must_use]
pub fn erase_lines(n: usize) -> String {
    if n == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(n * 8 + 3);
    for i in 0..n {
        out.push_str(erase_line());
        if i < n - 1 {
            out.push_str("\x1b[1A");
        }
    }
    out.push_str("\x1b[G");
    out
}

/// Move the cursor to column `x`, row `y` (both 1-based; 0 is treated as 1).
#[must_use]
pub fn move_to(x: usize, y: usize) -> String {
    format!("\x1b[{};{}H", y.max(1), x.max(1))
}

/// Write `line` at column `left` on each of `height` rows starting at `top`.
#[must_use]
pub fn write_rows(left: usize, top: usize, height: usize, line: &str) -> String {
    let mut out = String::new();
    for i in 0..height {
        out.push_str(&move_to(left, top + i));
        out.push_str(line);
    }
    out
}

/// Hide the cursor (DECTCEM reset).
#[must_use]
pub fn hide_cursor() -> &'static str {
    "\x1b[?25l"
}

/// Show the cursor (DECTCEM set).
#[must_use]
pub fn show_cursor() -> &'static str {
    "\x1b[?25h"
}

/// Strategy for cursor save/restore sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorSaveStrategy {
    /// DEC save/restore (`ESC 7` / `ESC 8`).
    Dec,
    /// ANSI save/restore (`CSI s` / `CSI u`).
    #[default]
    Ansi,
}

impl CursorSaveStrategy {
    /// Detect the strategy from the environment.
    ///
    /// Terminal.app ignores `CSI s` / `CSI u`, so it gets DEC sequences.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_term_program(std::env::var(TERM_PROGRAM_ENV).ok().as_deref())
    }

    /// Choose the strategy for a given `TERM_PROGRAM` value.
    #[must_use]
    pub fn from_term_program(term_program: Option<&str>) -> Self {
        match term_program {
            Some(APPLE_TERMINAL) => Self::Dec,
            _ => Self::Ansi,
        }
    }

    /// Sequence that saves the cursor position.
    #[must_use]
    pub const fn save_sequence(self) -> &'static str {
        match self {
            Self::Dec => "\x1b7",
            Self::Ansi => "\x1b[s",
        }
    }

    /// Sequence that restores the saved cursor position.
    #[must_use]
    pub const fn restore_sequence(self) -> &'static str {
        match self {
            Self::Dec => "\x1b8",
            Self::Ansi => "\x1b[u",
        }
    }
}

/// Strategy detected from the environment on first use.
static DETECTED_STRATEGY: LazyLock<CursorSaveStrategy> =
    LazyLock::new(CursorSaveStrategy::detect);

/// Save the cursor using the detected strategy.
#[must_use]
pub fn save_cursor() -> &'static str {
    DETECTED_STRATEGY.save_sequence()
}

/// Restore the cursor using the detected strategy.
#[must_use]
pub fn restore_cursor() -> &'static str {
    DETECTED_STRATEGY.restore_sequence()
}

fn csi_count(n: usize, final_byte: char) -> String {
    if n == 0 {
        String::new()
    } else {
        format!("\x1b[{n}{final_byte}")
    }
}
