#![forbid(unsafe_code)]

//! ANSI-aware line breaking.
//!
//! This module wraps terminal text that may carry embedded escape
//! sequences:
//! - Escape sequences occupy no columns and are copied through verbatim
//! - Fullwidth and astral code points take 2 columns, combining marks 0
//! - An open background color is closed before each forced break and
//!   reopened at the start of the next line
//!
//! # Example
//! ```
//! use quale_text::wrap::{break_line, width_of, BreakOptions};
//!
//! let lines = break_line("abc", 2, &BreakOptions::default());
//! assert_eq!(lines, vec!["ab", "c"]);
//!
//! assert_eq!(width_of("\x1b[31mtongue\x1b[39m"), 6);
//! ```

use tracing::trace;

use crate::ansi::BG_CLOSE;
use crate::codes;
use crate::escape;

/// Smallest `max_width` for which breaking is attempted.
pub const MIN_BREAK_WIDTH: usize = 2;

/// Options for [`break_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreakOptions {
    /// Columns a non-space character may overflow the limit before a
    /// break is forced.
    pub tolerance: usize,
    /// Drop a breaking space that lands exactly on a break.
    pub trim_break: bool,
}

impl BreakOptions {
    /// Options with no tolerance and no trimming.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overflow tolerance.
    #[must_use]
    pub fn tolerance(mut self, tolerance: usize) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set whether breaking spaces at a break are dropped.
    #[must_use]
    pub fn trim_break(mut self, trim: bool) -> Self {
        self.trim_break = trim;
        self
    }
}

/// Display width of `text` in terminal columns, ignoring escape sequences.
#[must_use]
pub fn width_of(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    escape::strip_ansi(text)
        .chars()
        .map(|c| codes::cell_width(c as u32))
        .sum()
}

/// Working state for a single [`break_line`] call.
struct LineBreaker {
    lines: Vec<String>,
    line: String,
    line_width: usize,
    /// Background-color openers currently in effect.
    bg_unclosed: Vec<String>,
}

impl LineBreaker {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            line: String::new(),
            line_width: 0,
            bg_unclosed: Vec::new(),
        }
    }

    /// Close any open background, store the line, and seed the next one
    /// with the open background sequences.
    fn push(&mut self) {
        if !self.bg_unclosed.is_empty() {
            self.line.push_str(BG_CLOSE);
        }
        let next = self.bg_unclosed.concat();
        self.lines.push(std::mem::replace(&mut self.line, next));
        self.line_width = 0;
    }

    fn track_backgrounds(&mut self, run: &str) {
        let bgs = escape::background_sequences(run);
        let Some(last) = bgs.last() else {
            return;
        };
        if escape::is_background_close(last) {
            self.bg_unclosed.clear();
            return;
        }
        let start = bgs
            .iter()
            .rposition(|seq| escape::is_background_close(seq))
            .map_or(0, |i| i + 1);
        self.bg_unclosed
            .extend(bgs[start..].iter().map(|seq| (*seq).to_string()));
    }
}

/// Break `text` into lines no wider than `max_width` columns.
///
/// Existing line breaks (`\r\n`, `\n`, VT, FF, NEL, U+2028, U+2029) always
/// break. Breaking spaces break exactly at the limit; other characters may
/// overflow by up to `options.tolerance` columns. A breaking dash that
/// reaches the limit breaks right after itself.
///
/// Empty `text`, or a `max_width` below 2, returns `text` unchanged as the
/// only line.
#[must_use]
pub fn break_line(text: &str, max_width: usize, options: &BreakOptions) -> Vec<String> {
    if text.is_empty() || max_width < MIN_BREAK_WIDTH {
        trace!(max_width, len = text.len(), "break_line: nothing to break");
        return vec![text.to_string()];
    }
    let text = escape::normalize_line_breaks(text);
    let text = text.as_ref();
    let limit = max_width.saturating_add(options.tolerance);

    let mut state = LineBreaker::new();
    let mut index = 0;
    while index < text.len() {
        if let Some((run, end)) = escape::match_at(text, index) {
            state.line.push_str(run);
            state.track_backgrounds(run);
            index = end;
            if index == text.len() {
                // The input never closed it, so neither do we.
                state.bg_unclosed.clear();
                break;
            }
            continue;
        }

        let Some(ch) = text[index..].chars().next() else {
            break;
        };
        let next = index + ch.len_utf8();
        let cp = ch as u32;

        if ch == '\n' {
            state.push();
            index = next;
            continue;
        }

        let mut segment = Some(ch);
        let mut segment_width = codes::cell_width(cp);

        let this_width = state.line_width + segment_width;
        if this_width > max_width {
            let is_break_space = codes::is_breaking_space(cp);
            if options.trim_break && is_break_space {
                segment = None;
                segment_width = 0;
            }
            if is_break_space || this_width > limit {
                state.push();
            }
        }

        state.line_width += segment_width;
        if let Some(ch) = segment {
            state.line.push(ch);
        }

        if state.line_width >= max_width && next < text.len() && codes::is_breaking_dash(cp) {
            state.push();
        }
        index = next;
    }
    state.push();

    trace!(max_width, lines = state.lines.len(), "break_line: done");
    state.lines
}

/// Break each line with default options.
#[must_use]
pub fn break_lines<S: AsRef<str>>(lines: &[S], max_width: usize) -> Vec<Vec<String>> {
    let options = BreakOptions::default();
    lines
        .iter()
        .map(|line| break_line(line.as_ref(), max_width, &options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn brk(text: &str, width: usize) -> Vec<String> {
        break_line(text, width, &BreakOptions::default())
    }

    // ==========================================================================
    // width_of tests
    // ==========================================================================

    #[test]
    fn width_of_ascii() {
        assert_eq!(width_of("hello"), 5);
    }

    #[test]
    fn width_of_ignores_color_codes() {
        assert_eq!(width_of("\x1b[31mtongue\x1b[39m"), 6);
    }

    #[test]
    fn width_of_empty_and_escape_only() {
        assert_eq!(width_of(""), 0);
        assert_eq!(width_of("\x1b[1m\x1b[0m"), 0);
    }

    #[test]
    fn width_of_cjk_and_emoji() {
        assert_eq!(width_of("你好"), 4);
        assert_eq!(width_of("😀x"), 3);
    }

    #[test]
    fn width_of_zero_width_code_points() {
        assert_eq!(width_of("e\u{0301}"), 1);
        assert_eq!(width_of("a\tb"), 2);
    }

    // ==========================================================================
    // break_line: plain text
    // ==========================================================================

    #[test]
    fn exact_width_break() {
        assert_eq!(brk("abc", 2), vec!["ab", "c"]);
    }

    #[test]
    fn fits_on_one_line() {
        assert_eq!(brk("hello", 10), vec!["hello"]);
    }

    #[test]
    fn empty_input_returns_single_empty_line() {
        assert_eq!(brk("", 10), vec![""]);
    }

    #[test]
    fn degenerate_widths_return_input() {
        assert_eq!(brk("hello world", 0), vec!["hello world"]);
        assert_eq!(brk("hello world", 1), vec!["hello world"]);
    }

    #[test]
    fn unbounded_width_does_not_overflow() {
        let opts = BreakOptions::new().tolerance(5);
        assert_eq!(break_line("abc", usize::MAX, &opts), vec!["abc"]);
    }

    #[test]
    fn existing_line_breaks_are_kept() {
        assert_eq!(brk("ab\ncd", 10), vec!["ab", "cd"]);
        assert_eq!(brk("ab\r\ncd", 10), vec!["ab", "cd"]);
        assert_eq!(brk("ab\u{2028}cd", 10), vec!["ab", "cd"]);
        assert_eq!(brk("ab\n", 10), vec!["ab", ""]);
    }

    #[test]
    fn space_at_limit_starts_next_line() {
        assert_eq!(brk("ab cd", 2), vec!["ab", " c", "d"]);
    }

    #[test]
    fn trim_break_drops_space_at_limit() {
        let opts = BreakOptions::new().trim_break(true);
        assert_eq!(break_line("ab cd", 2, &opts), vec!["ab", "cd"]);
    }

    #[test]
    fn trim_break_keeps_spaces_inside_line() {
        let opts = BreakOptions::new().trim_break(true);
        assert_eq!(break_line("a b", 5, &opts), vec!["a b"]);
    }

    #[test]
    fn tolerance_allows_overflow_for_letters() {
        let opts = BreakOptions::new().tolerance(1);
        assert_eq!(break_line("abc", 2, &opts), vec!["abc"]);
        assert_eq!(break_line("abcd", 2, &opts), vec!["abc", "d"]);
    }

    #[test]
    fn tolerance_does_not_apply_to_spaces() {
        let opts = BreakOptions::new().tolerance(3);
        assert_eq!(break_line("ab c", 2, &opts), vec!["ab", " c"]);
    }

    #[test]
    fn breaking_dash_forces_break_after_itself() {
        let opts = BreakOptions::new().tolerance(4);
        assert_eq!(break_line("ab-cd", 3, &opts), vec!["ab-", "cd"]);
    }

    #[test]
    fn trailing_dash_at_limit_does_not_add_empty_line() {
        assert_eq!(brk("ab-", 3), vec!["ab-"]);
    }

    // ==========================================================================
    // break_line: wide and zero-width code points
    // ==========================================================================

    #[test]
    fn cjk_respects_width() {
        assert_eq!(brk("你好世界", 4), vec!["你好", "世界"]);
        assert_eq!(brk("你好世", 5), vec!["你好", "世"]);
        assert_eq!(brk("hi你好", 4), vec!["hi你", "好"]);
    }

    #[test]
    fn astral_code_points_stay_whole() {
        assert_eq!(brk("😀😀😀", 4), vec!["😀😀", "😀"]);
    }

    #[test]
    fn combining_mark_stays_with_base() {
        assert_eq!(brk("ae\u{0301}b", 2), vec!["ae\u{0301}", "b"]);
    }

    // ==========================================================================
    // break_line: escape sequences
    // ==========================================================================

    #[test]
    fn escape_sequences_have_no_width() {
        assert_eq!(
            brk("\x1b[31mab\x1b[39mcd", 2),
            vec!["\x1b[31mab\x1b[39m", "cd"]
        );
    }

    #[test]
    fn open_background_is_closed_and_reopened_across_break() {
        let lines = brk("\x1b[41mabcd\x1b[49m", 2);
        assert_eq!(
            lines,
            vec![
                "\x1b[41mab\x1b[49m".to_string(),
                "\x1b[41mcd\x1b[49m".to_string(),
            ]
        );
    }

    #[test]
    fn closed_background_is_not_reopened() {
        let lines = brk("\x1b[41ma\x1b[49mbcd", 2);
        assert_eq!(lines, vec!["\x1b[41ma\x1b[49mb", "cd"]);
    }

    #[test]
    fn unclosed_background_at_end_is_not_closed() {
        let lines = brk("ab\x1b[44m", 2);
        assert_eq!(lines, vec!["ab\x1b[44m"]);
    }

    #[test]
    fn unclosed_background_at_end_of_longer_text() {
        let lines = brk("\x1b[44mabc", 2);
        assert_eq!(lines, vec!["\x1b[44mab\x1b[49m", "\x1b[44mc\x1b[49m"]);
    }

    #[test]
    fn malformed_escape_is_plain_text() {
        // ESC alone is a control code: zero width, copied through.
        assert_eq!(brk("a\x1bbc", 2), vec!["a\x1bb", "c"]);
    }

    // ==========================================================================
    // break_lines tests
    // ==========================================================================

    #[test]
    fn break_lines_maps_each_line() {
        let out = break_lines(&["abc", "de"], 2);
        assert_eq!(out, vec![vec!["ab", "c"], vec!["de"]]);
    }

    #[test]
    fn break_lines_empty_input() {
        let out = break_lines::<&str>(&[], 5);
        assert!(out.is_empty());
    }

    // ==========================================================================
    // BreakOptions tests
    // ==========================================================================

    #[test]
    fn break_options_builder() {
        let opts = BreakOptions::new().tolerance(2).trim_break(true);
        assert_eq!(opts.tolerance, 2);
        assert!(opts.trim_break);
        assert_eq!(BreakOptions::default(), BreakOptions::new());
    }

    #[traced_test]
    #[test]
    fn degenerate_input_is_traced() {
        let _ = brk("abc", 1);
        assert!(logs_contain("nothing to break"));
    }
}
