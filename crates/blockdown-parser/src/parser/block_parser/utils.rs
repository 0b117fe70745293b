//! Byte-level scanning primitives shared by the block recognizers.
//!
//! Every function takes a byte slice and a cursor and returns a new cursor.
//! None of them allocate or keep state; cursors past the end are clamped.

use std::sync::LazyLock;

use regex::{Captures, Regex};

const ESCAPABLE: &str = r##"[!"#$%&'()*+,./:;<=>?@\[\\\]^_`{|}~-]"##;
const CHAR_ENTITY: &str = "&(?:#x[a-f0-9]{1,8}|#[0-9]{1,8}|[a-z][a-z0-9]{1,31});";

static BACKSLASH_OR_AMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\\&]").expect("valid backslash/amp pattern"));

static ENTITY_OR_ESCAPED_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\\{ESCAPABLE}|{CHAR_ENTITY}")).expect("valid entity pattern")
});

/// Advance `i` while `data[i] == c`.
pub(crate) fn skip_char(data: &[u8], mut i: usize, c: u8) -> usize {
    while i < data.len() && data[i] == c {
        i += 1;
    }
    i
}

/// Like [`skip_char`] but skips at most `max` bytes.
pub(crate) fn skip_char_n(data: &[u8], mut i: usize, c: u8, mut max: usize) -> usize {
    while i < data.len() && max > 0 && data[i] == c {
        i += 1;
        max -= 1;
    }
    i
}

/// Advance `i` while `data[i] != c`.
pub(crate) fn skip_until_char(data: &[u8], mut i: usize, c: u8) -> usize {
    while i < data.len() && data[i] != c {
        i += 1;
    }
    i
}

pub(crate) fn skip_alnum(data: &[u8], mut i: usize) -> usize {
    while i < data.len() && data[i].is_ascii_alphanumeric() {
        i += 1;
    }
    i
}

/// Step backwards over a run of `c` ending just before `i`.
pub(crate) fn back_char(data: &[u8], mut i: usize, c: u8) -> usize {
    while i > 0 && data[i - 1] == c {
        i -= 1;
    }
    i
}

/// Step backwards until the byte before `i` is `c`.
pub(crate) fn back_until_char(data: &[u8], mut i: usize, c: u8) -> usize {
    while i > 0 && data[i - 1] != c {
        i -= 1;
    }
    i
}

pub(crate) fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0c | 0x0b)
}

/// Length of the blank line at the start of `data`, including its newline,
/// or 0 if the line has content. An empty buffer is not a blank line.
pub fn empty_line_len(data: &[u8]) -> usize {
    let mut i = 0;
    while i < data.len() && data[i] != b'\n' {
        if data[i] != b' ' && data[i] != b'\t' {
            return 0;
        }
        i += 1;
    }
    if i == 0 && data.is_empty() {
        return 0;
    }
    skip_char_n(data, i, b'\n', 1)
}

/// Index just past the newline that ends the line containing `i`.
pub(crate) fn line_end(data: &[u8], i: usize) -> usize {
    skip_char_n(data, skip_until_char(data, i, b'\n'), b'\n', 1)
}

/// Whether `data[i]` is preceded by an odd number of backslashes.
pub(crate) fn is_backslash_escaped(data: &[u8], i: usize) -> bool {
    let mut backslashes = 0;
    while i > backslashes && data[i - backslashes - 1] == b'\\' {
        backslashes += 1;
    }
    backslashes % 2 == 1
}

/// Count of leading characters that make a line an indented code line:
/// a tab or four spaces.
pub(crate) fn code_prefix(data: &[u8]) -> usize {
    if data.first() == Some(&b'\t') {
        return 1;
    }
    if data.len() >= 4 && data[..4] == *b"    " {
        return 4;
    }
    0
}

/// Trim any of `set` from both ends.
pub(crate) fn trim_bytes<'a>(data: &'a [u8], set: &[u8]) -> &'a [u8] {
    let start = data
        .iter()
        .position(|b| !set.contains(b))
        .unwrap_or(data.len());
    let end = data
        .iter()
        .rposition(|b| !set.contains(b))
        .map_or(start, |p| p + 1);
    &data[start..end.max(start)]
}

/// Recognizers only ever cut at ASCII bytes, so slices of valid UTF-8 input
/// stay valid; anything else (hook or include output) is replaced lossily.
pub(crate) fn text(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

/// Resolve backslash escapes and HTML entities in an info string.
pub(crate) fn unescape_string(s: &str) -> String {
    if !BACKSLASH_OR_AMP.is_match(s) {
        return s.to_string();
    }
    ENTITY_OR_ESCAPED_CHAR
        .replace_all(s, |caps: &Captures| {
            let m = &caps[0];
            match m.strip_prefix('\\') {
                Some(escaped) => escaped.to_string(),
                None => html_escape::decode_html_entities(m).into_owned(),
            }
        })
        .into_owned()
}
