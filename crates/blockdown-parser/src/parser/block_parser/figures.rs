//! Figure blocks (`!---` fences) and the caption lines that turn code
//! blocks, quotes and tables into captioned figures.

use super::BlockParser;
use super::utils::{empty_line_len, is_space, skip_char, skip_until_char, text, trim_bytes};
use crate::ast::NodeKind;

pub(crate) const CAPTION_FIGURE: &[u8] = b"Figure: ";
pub(crate) const CAPTION_TABLE: &[u8] = b"Table: ";
pub(crate) const CAPTION_QUOTE: &[u8] = b"Quote: ";

/// A caption found after a block.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Caption<'a> {
    pub content: &'a [u8],
    /// From a trailing `{#id}`.
    pub id: Option<String>,
    /// Bytes consumed, prefix and trailing blank line included.
    pub consumed: usize,
}

/// Caption starting with `prefix` at the start of `data`. The caption runs
/// until the first blank line.
pub(crate) fn caption<'a>(data: &'a [u8], prefix: &[u8]) -> Option<Caption<'a>> {
    let body = data.strip_prefix(prefix)?;
    let end = lines_until_empty(body);
    let body = &body[..end];
    let (content, id) = match caption_id(body) {
        Some((id, start)) => (&body[..start], Some(id)),
        None => (body, None),
    };
    Some(Caption {
        content: trim_bytes(content, b" \t\n"),
        id,
        consumed: prefix.len() + end,
    })
}

/// `{#id}` ending a caption, with its start offset.
fn caption_id(data: &[u8]) -> Option<(String, usize)> {
    let end = data.len();
    let mut open = 0;
    while open + 1 < end && !(data[open] == b'{' && data[open + 1] == b'#') {
        open += 1;
    }
    let close = skip_until_char(data, open + 1, b'}');
    // Only whitespace may follow the id.
    if data.get(close + 1..).unwrap_or_default().iter().any(|b| !is_space(*b)) {
        return None;
    }
    if open > 0 && close < end && open + 2 < close {
        return Some((text(&data[open + 2..close]), open));
    }
    None
}

/// Length of the lines up to and including the first blank line.
pub(crate) fn lines_until_empty(data: &[u8]) -> usize {
    let mut line = 0;
    let mut i = 0;
    while line < data.len() {
        i += 1;
        while i < data.len() && data[i - 1] != b'\n' {
            i += 1;
        }
        if empty_line_len(&data[line..i]) == 0 {
            line = i;
            continue;
        }
        break;
    }
    i
}

/// `!---` (three or more dashes) fence line. With `opener` set the run must
/// be exactly as long. Returns the index past the line.
fn figure_line(data: &[u8], opener: Option<usize>) -> Option<(usize, usize)> {
    let n = data.len();
    let mut i = 0;
    while i < n && i < 3 && data[i] == b' ' {
        i += 1;
    }
    if i + 1 >= n || data[i] != b'!' || data[i + 1] != b'-' {
        return None;
    }
    i += 1;
    let run_start = i;
    i = skip_char(data, i, b'-');
    let len = i - run_start;
    if len < 3 || opener.is_some_and(|open| open != len) {
        return None;
    }
    if opener.is_none() {
        // An opener may carry a label; it is ignored.
        i = skip_until_char(data, i, b'\n');
    }
    i = skip_char(data, i, b' ');
    if i >= n {
        return Some((i, len));
    }
    if data[i] != b'\n' {
        return None;
    }
    Some((i + 1, len))
}

/// Bytes of a complete figure block and its raw body.
fn scan_figure_block(data: &[u8]) -> Option<(&[u8], usize)> {
    let (mut beg, len) = figure_line(data, None)?;
    if beg == 0 || beg >= data.len() {
        return None;
    }
    let body_start = beg;
    loop {
        if let Some((close, _)) = figure_line(&data[beg..], Some(len)) {
            return Some((&data[body_start..beg], beg + close));
        }
        let end = skip_until_char(data, beg, b'\n') + 1;
        if end >= data.len() {
            return None;
        }
        beg = end;
    }
}

pub(crate) fn is_figure_block(data: &[u8]) -> bool {
    scan_figure_block(data).is_some()
}

impl BlockParser<'_> {
    /// A `!---` fenced region parsed as blocks inside a figure, with an
    /// optional `Figure: ` caption after the closing fence.
    pub(super) fn figure_block(&mut self, data: &[u8]) -> usize {
        let Some((body, mut end)) = scan_figure_block(data) else {
            return 0;
        };
        log::debug!("figure block of {end} bytes");

        let figure = self.add_block(NodeKind::CaptionFigure { id: None });
        self.block(body);

        if let Some(cap) = caption(&data[end..], CAPTION_FIGURE) {
            if let NodeKind::CaptionFigure { id } = self.doc.kind_mut(figure) {
                *id = cap.id;
            }
            self.doc.append(
                figure,
                NodeKind::Caption {
                    content: text(cap.content),
                },
            );
            end += cap.consumed;
        }
        self.finalize(figure);
        end
    }
}
