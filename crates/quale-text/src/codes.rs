#![forbid(unsafe_code)]

//! Code point classification for terminal display.
//!
//! Every predicate takes a raw `u32` scalar so callers can classify values
//! that did not come from a valid `char` (they simply return `false`).
//!
//! The categories overlap in code but not in effect on width: the line
//! breaker checks them in a fixed order (astral, zero-width, fullwidth).

/// Combining diacritical marks. Zero width, attached to the previous cell.
#[inline]
#[must_use]
pub const fn is_combining(cp: u32) -> bool {
    cp >= 0x300 && cp <= 0x36F
}

/// C0 and C1 control codes, plus DEL.
#[inline]
#[must_use]
pub const fn is_control(cp: u32) -> bool {
    cp <= 0x1F || (cp >= 0x7F && cp <= 0x9F)
}

/// Code points outside the Basic Multilingual Plane.
///
/// These take a surrogate pair in UTF-16 and are treated as two cells wide.
#[inline]
#[must_use]
pub const fn is_surrogate(cp: u32) -> bool {
    cp > 0xFFFF
}

/// East Asian Wide and Fullwidth code points.
///
/// Ranges are derived from `EastAsianWidth.txt`.
#[must_use]
pub const fn is_fullwidth(cp: u32) -> bool {
    cp >= 0x1100
        && (cp <= 0x115F // Hangul Jamo
            || cp == 0x2329 // left-pointing angle bracket
            || cp == 0x232A // right-pointing angle bracket
            // CJK Radicals Supplement .. Enclosed CJK Letters and Months
            || (0x2E80 <= cp && cp <= 0x3247 && cp != 0x303F)
            // Enclosed CJK Letters and Months .. CJK Unified Ideographs Extension A
            || (0x3250 <= cp && cp <= 0x4DBF)
            // CJK Unified Ideographs .. Yi Radicals
            || (0x4E00 <= cp && cp <= 0xA4C6)
            // Hangul Jamo Extended-A
            || (0xA960 <= cp && cp <= 0xA97C)
            // Hangul Syllables
            || (0xAC00 <= cp && cp <= 0xD7A3)
            // CJK Compatibility Ideographs
            || (0xF900 <= cp && cp <= 0xFAFF)
            // Vertical Forms
            || (0xFE10 <= cp && cp <= 0xFE19)
            // CJK Compatibility Forms .. Small Form Variants
            || (0xFE30 <= cp && cp <= 0xFE6B)
            // Halfwidth and Fullwidth Forms
            || (0xFF01 <= cp && cp <= 0xFF60)
            || (0xFFE0 <= cp && cp <= 0xFFE6)
            // Kana Supplement
            || (0x1B000 <= cp && cp <= 0x1B001)
            // Enclosed Ideographic Supplement
            || (0x1F200 <= cp && cp <= 0x1F251)
            // CJK Unified Ideographs Extension B .. Tertiary Ideographic Plane
            || (0x20000 <= cp && cp <= 0x3FFFD))
}

/// Space separators (category Zs) that permit a line break.
#[must_use]
pub const fn is_breaking_space(cp: u32) -> bool {
    matches!(cp, 0x20 | 0x1680 | 0x2000..=0x200A | 0x205F | 0x3000)
}

/// Space separators that must not be broken on.
#[must_use]
pub const fn is_non_breaking_space(cp: u32) -> bool {
    matches!(cp, 0xA0 | 0x202F)
}

/// Any space separator, breaking or not.
#[must_use]
pub const fn is_space(cp: u32) -> bool {
    is_breaking_space(cp) || is_non_breaking_space(cp)
}

/// Dash punctuation (category Pd) after which a line may break.
#[must_use]
pub const fn is_breaking_dash(cp: u32) -> bool {
    matches!(
        cp,
        0x2D // hyphen-minus
            | 0x58A // Armenian hyphen
            | 0x5BE // Hebrew maqaf
            | 0x1400 // Canadian syllabics hyphen
            | 0x1806 // Mongolian todo soft hyphen
            | 0x2010 // hyphen
            | 0x2012..=0x2015 // figure dash .. horizontal bar
            | 0x2E17 // double oblique hyphen
            | 0x2E1A // hyphen with diaeresis
            | 0x2E3A // two-em dash
            | 0x2E3B // three-em dash
            | 0x2E40 // double hyphen
            | 0x301C // wave dash
            | 0x3030 // wavy dash
            | 0x30A0 // Katakana-Hiragana double hyphen
            | 0xFE31 // vertical em dash
            | 0xFE32 // vertical en dash
            | 0xFE58 // small em dash
            | 0xFE63 // small hyphen-minus
            | 0xFF0D // fullwidth hyphen-minus
            | 0x10EAD // Yezidi hyphenation mark
    )
}

/// Legal word-break points: breaking spaces and breaking dashes.
#[must_use]
pub const fn is_word_breaking(cp: u32) -> bool {
    is_breaking_space(cp) || is_breaking_dash(cp)
}

/// Display width of a single code point: 0, 1, or 2 cells.
#[must_use]
pub const fn cell_width(cp: u32) -> usize {
    if is_surrogate(cp) {
        2
    } else if is_combining(cp) || is_control(cp) {
        0
    } else if is_fullwidth(cp) {
        2
    } else {
        1
    }
}
