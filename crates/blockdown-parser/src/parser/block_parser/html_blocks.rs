//! Raw HTML blocks: a known block-level tag up to its closing tag, a
//! standalone comment, or a standalone `<hr>`.

use super::BlockParser;
use super::utils::{back_char, empty_line_len, skip_alnum, text};
use crate::ast::NodeKind;

/// Tags that open an HTML block. Matching is case-sensitive.
const BLOCK_TAGS: &[&str] = &[
    "blockquote", "del", "dd", "div", "dl", "dt", "fieldset", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "iframe", "ins", "li", "math", "noscript", "ol", "pre", "p", "script", "style", "table",
    "ul", // HTML5
    "address", "article", "aside", "canvas", "details", "dialog", "figcaption", "figure", "footer",
    "header", "hgroup", "main", "nav", "output", "progress", "section", "svg", "video",
];

impl BlockParser<'_> {
    /// Length of the HTML block at the start of `data`, or 0. Only attaches
    /// a node when `render` is set; paragraphs use the dry run to decide
    /// whether HTML interrupts them.
    pub(super) fn html(&mut self, data: &[u8], render: bool) -> usize {
        let size = self.html_block_len(data);
        if size > 0 && render {
            let end = back_char(data, size, b'\n');
            log::trace!("html block of {size} bytes");
            self.add_block(NodeKind::HtmlBlock {
                literal: text(&data[..end]),
            });
        }
        size
    }

    fn html_block_len(&self, data: &[u8]) -> usize {
        if data.first() != Some(&b'<') {
            return 0;
        }
        let Some(tag) = find_block_tag(&data[1..]) else {
            let size = html_comment_len(data);
            if size > 0 {
                return size;
            }
            return html_hr_len(data);
        };

        // `ins` and `del` are also inline tags and never open a block here.
        if tag == "ins" || tag == "del" {
            return 0;
        }

        let mut i = 1;
        while i < data.len() {
            i += 1;
            while i < data.len() && !(data[i - 1] == b'<' && data[i] == b'/') {
                i += 1;
            }
            if i + 2 + tag.len() >= data.len() {
                break;
            }
            let j = find_closing_tag(tag, &data[i - 1..], self.extensions.lax_html_blocks);
            if j > 0 {
                return i - 1 + j;
            }
        }
        0
    }
}

fn find_block_tag(data: &[u8]) -> Option<&'static str> {
    let key = &data[..skip_alnum(data, 0)];
    BLOCK_TAGS.iter().copied().find(|tag| tag.as_bytes() == key)
}

/// Length of `</tag>` at the start of `data` plus the blank remainder of its
/// line and, unless `lax`, the blank line after it. 0 if it doesn't qualify.
fn find_closing_tag(tag: &str, data: &[u8], lax: bool) -> usize {
    let Some(rest) = data
        .strip_prefix(b"</")
        .and_then(|rest| rest.strip_prefix(tag.as_bytes()))
        .and_then(|rest| rest.strip_prefix(b">"))
    else {
        return 0;
    };
    let mut i = data.len() - rest.len();

    let skip = empty_line_len(&data[i..]);
    if skip == 0 {
        return 0;
    }
    i += skip;

    if i >= data.len() || lax {
        return i;
    }
    match empty_line_len(&data[i..]) {
        0 => 0,
        skip => i + skip,
    }
}

/// `<!-- ... -->` alone on its line(s).
fn html_comment_len(data: &[u8]) -> usize {
    if data.len() < 5 || !data.starts_with(b"<!--") {
        return 0;
    }
    let mut i = 5;
    while i < data.len() && !(data[i - 2] == b'-' && data[i - 1] == b'-' && data[i] == b'>') {
        i += 1;
    }
    if i >= data.len() {
        return 0;
    }
    let i = i + 1;
    match empty_line_len(&data[i..]) {
        0 => 0,
        skip => i + skip,
    }
}

/// `<hr>`, `<hr/>` or `<hr attrs>` alone on its line.
fn html_hr_len(data: &[u8]) -> usize {
    if data.len() < 4 || data[0] != b'<' {
        return 0;
    }
    if !data[1].eq_ignore_ascii_case(&b'h') || !data[2].eq_ignore_ascii_case(&b'r') {
        return 0;
    }
    if !matches!(data[3], b' ' | b'/' | b'>') {
        return 0;
    }
    let mut i = 3;
    while i < data.len() && data[i] != b'>' && data[i] != b'\n' {
        i += 1;
    }
    if i >= data.len() || data[i] != b'>' {
        return 0;
    }
    let i = i + 1;
    match empty_line_len(&data[i..]) {
        0 => 0,
        skip => i + skip,
    }
}
