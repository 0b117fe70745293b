//! Fenced and indented code blocks.

use super::BlockParser;
use super::figures::{CAPTION_FIGURE, caption};
use super::utils::{
    back_char, code_prefix, empty_line_len, is_space, line_end, skip_char, skip_until_char, text,
    unescape_string,
};
use crate::ast::{CodeBlock, NodeKind};

/// Fence character and run length of an opening fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fence {
    pub marker: u8,
    pub len: usize,
}

/// A recognized fence line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FenceLine<'a> {
    pub fence: Fence,
    /// Index just past the line (and its newline, if any).
    pub end: usize,
    /// Info string of an opening fence.
    pub info: &'a [u8],
}

/// Parse a fence line at the start of `data`: up to three spaces, then three
/// or more backticks or tildes. With `opener` set the line must close that
/// fence: same character, run at least as long, nothing but spaces after.
pub(crate) fn fence_line(data: &[u8], opener: Option<Fence>) -> Option<FenceLine<'_>> {
    let n = data.len();
    let mut i = 0;
    while i < n && i < 3 && data[i] == b' ' {
        i += 1;
    }
    if i >= n || (data[i] != b'~' && data[i] != b'`') {
        return None;
    }

    let marker = data[i];
    let run_start = i;
    i = skip_char(data, i, marker);
    let fence = Fence {
        marker,
        len: i - run_start,
    };
    if fence.len < 3 {
        return None;
    }

    let mut info: &[u8] = b"";
    match opener {
        Some(open) => {
            if fence.marker != open.marker || fence.len < open.len {
                return None;
            }
        }
        None => {
            i = skip_char(data, i, b' ');
            if i >= n {
                return Some(FenceLine { fence, end: i, info });
            }
            let (start, len) = info_range(data, &mut i)?;
            info = &data[start..start + len];
        }
    }

    i = skip_char(data, i, b' ');
    if i >= n {
        return Some(FenceLine { fence, end: i, info });
    }
    if data[i] != b'\n' {
        return None;
    }
    Some(FenceLine {
        fence,
        end: i + 1,
        info,
    })
}

/// Bounds of the info string at `*i`, either `{lang}` (inner whitespace
/// trimmed) or the rest of the line. Advances `*i` past it.
fn info_range(data: &[u8], i: &mut usize) -> Option<(usize, usize)> {
    let n = data.len();
    let mut pos = *i;
    let mut start = pos;
    let mut len = 0;

    if data[pos] == b'{' {
        pos += 1;
        start += 1;
        while pos < n && data[pos] != b'}' && data[pos] != b'\n' {
            len += 1;
            pos += 1;
        }
        if pos >= n || data[pos] != b'}' {
            return None;
        }
        while len > 0 && is_space(data[start]) {
            start += 1;
            len -= 1;
        }
        while len > 0 && is_space(data[start + len - 1]) {
            len -= 1;
        }
        pos += 1;
    } else {
        while pos < n && data[pos] != b'\n' {
            len += 1;
            pos += 1;
        }
        // Bare info strings run to end of line; drop trailing blanks.
        while len > 0 && is_space(data[start + len - 1]) {
            len -= 1;
        }
    }

    *i = pos;
    Some((start, len))
}

/// Scan a complete fenced block. Returns the bytes consumed and the scratch
/// buffer: the info string on the first line followed by the body.
pub(crate) fn scan_fenced_code(data: &[u8]) -> Option<(usize, Vec<u8>)> {
    let open = fence_line(data, None)?;
    let mut beg = open.end;
    if beg == 0 || beg >= data.len() {
        return None;
    }

    let mut work = Vec::with_capacity(data.len().min(256));
    work.extend_from_slice(open.info);
    work.push(b'\n');

    loop {
        if let Some(close) = fence_line(&data[beg..], Some(open.fence)) {
            beg += close.end;
            break;
        }
        let end = skip_until_char(data, beg, b'\n') + 1;
        // Ran out of input without a closing fence.
        if end >= data.len() {
            return None;
        }
        work.extend_from_slice(&data[beg..end]);
        beg = end;
    }
    Some((beg, work))
}

/// Split the scratch buffer of a fenced block into info and literal.
fn finalize_code_block(work: &[u8]) -> CodeBlock {
    let newline = skip_until_char(work, 0, b'\n');
    let info = text(&work[..newline]);
    let rest = work.get(newline + 1..).unwrap_or_default();
    CodeBlock {
        is_fenced: true,
        info: unescape_string(info.trim_matches('\n')),
        literal: text(rest),
    }
}

impl BlockParser<'_> {
    pub(super) fn fenced_code_block(&mut self, data: &[u8]) -> usize {
        let Some((mut beg, work)) = scan_fenced_code(data) else {
            return 0;
        };
        let code = finalize_code_block(&work);
        log::debug!("fenced code block info={:?}", code.info);

        if self.extensions.mmark
            && let Some(cap) = caption(&data[beg..], CAPTION_FIGURE)
        {
            let figure = self.add_block(NodeKind::CaptionFigure { id: cap.id });
            let attribute = self.doc.attribute(figure).cloned();
            let block = self.add_child(NodeKind::CodeBlock(code));
            self.doc.node_mut(block).attribute = attribute;
            self.add_child(NodeKind::Caption {
                content: text(cap.content),
            });
            self.finalize(figure);
            beg += cap.consumed;
            return beg;
        }

        self.add_block(NodeKind::CodeBlock(code));
        beg
    }

    /// Indented code: lines starting with a tab or four spaces, blank lines
    /// allowed in between. Trailing blank lines collapse to one newline.
    pub(super) fn code(&mut self, data: &[u8]) -> usize {
        let mut work = Vec::new();
        let mut i = 0;
        while i < data.len() {
            let mut beg = i;
            i = line_end(data, i);
            let line = &data[beg..i];

            let blank = empty_line_len(line) > 0;
            let prefix = code_prefix(line);
            if prefix > 0 {
                beg += prefix;
            } else if !blank {
                i = beg;
                break;
            }

            if blank {
                work.push(b'\n');
            } else {
                work.extend_from_slice(&data[beg..i]);
            }
        }

        let end = back_char(&work, work.len(), b'\n');
        work.truncate(end);
        work.push(b'\n');

        self.add_block(NodeKind::CodeBlock(CodeBlock {
            is_fenced: false,
            info: String::new(),
            literal: text(&work),
        }));
        i
    }
}
