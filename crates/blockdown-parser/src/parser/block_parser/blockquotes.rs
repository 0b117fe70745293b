//! Block quotes (`>`) and Mmark asides (`A>`).
//!
//! Both gather their prefixed lines (plus lazy continuation lines) into a
//! scratch buffer with the prefix stripped and parse that buffer as blocks
//! below the new container.

use super::BlockParser;
use super::code_blocks::scan_fenced_code;
use super::figures::{CAPTION_QUOTE, caption};
use super::utils::{empty_line_len, skip_char_n, text};
use crate::ast::NodeKind;

/// Length of a `>` prefix (with one following space), or 0.
pub(crate) fn quote_prefix(data: &[u8]) -> usize {
    let i = skip_char_n(data, 0, b' ', 3);
    if data.get(i) == Some(&b'>') {
        if data.get(i + 1) == Some(&b' ') {
            return i + 2;
        }
        return i + 1;
    }
    0
}

/// Length of an `A>` prefix (with one following space), or 0.
pub(crate) fn aside_prefix(data: &[u8]) -> usize {
    let i = skip_char_n(data, 0, b' ', 3);
    if data.get(i) == Some(&b'A') && data.get(i + 1) == Some(&b'>') {
        if data.get(i + 2) == Some(&b' ') {
            return i + 3;
        }
        return i + 2;
    }
    0
}

/// A blank line ends the container when the line after it is neither
/// blank nor prefixed, or when it is the last line.
fn terminates(data: &[u8], beg: usize, end: usize, prefix: fn(&[u8]) -> usize) -> bool {
    if empty_line_len(&data[beg..]) == 0 {
        return false;
    }
    if end >= data.len() {
        return true;
    }
    prefix(&data[end..]) == 0 && empty_line_len(&data[end..]) == 0
}

impl BlockParser<'_> {
    /// Collect the container's lines with `prefix` stripped. Returns the
    /// scratch buffer and the number of bytes consumed.
    fn gather_prefixed(&self, data: &[u8], prefix: fn(&[u8]) -> usize) -> (Vec<u8>, usize) {
        let mut raw = Vec::new();
        let mut beg = 0;
        let mut end = 0;
        while beg < data.len() {
            end = beg;
            // A fenced block is taken whole, so its lines need no prefix.
            while end < data.len() && data[end] != b'\n' {
                if self.extensions.fenced_code
                    && let Some((len, _)) = scan_fenced_code(&data[end..])
                {
                    end += len;
                    if data[end - 1] == b'\n' {
                        end -= 1;
                    }
                    break;
                }
                end += 1;
            }
            end = skip_char_n(data, end, b'\n', 1);

            let pre = prefix(&data[beg..]);
            if pre > 0 {
                beg += pre;
            } else if terminates(data, beg, end, prefix) {
                break;
            }

            raw.extend_from_slice(&data[beg..end]);
            beg = end;
        }
        (raw, end)
    }

    pub(super) fn quote(&mut self, data: &[u8]) -> usize {
        let (raw, mut end) = self.gather_prefixed(data, quote_prefix);
        log::debug!("block quote of {end} bytes");

        if self.extensions.mmark
            && let Some(cap) = caption(&data[end..], CAPTION_QUOTE)
        {
            let figure = self.add_block(NodeKind::CaptionFigure { id: cap.id });
            let attribute = self.doc.attribute(figure).cloned();
            let quote = self.add_child(NodeKind::BlockQuote);
            self.doc.node_mut(quote).attribute = attribute;
            self.block(&raw);
            self.finalize(quote);
            self.add_child(NodeKind::Caption {
                content: text(cap.content),
            });
            self.finalize(figure);
            end += cap.consumed;
            return end;
        }

        let quote = self.add_block(NodeKind::BlockQuote);
        self.block(&raw);
        self.finalize(quote);
        end
    }

    pub(super) fn aside(&mut self, data: &[u8]) -> usize {
        let (raw, end) = self.gather_prefixed(data, aside_prefix);
        log::debug!("aside of {end} bytes");

        let aside = self.add_block(NodeKind::Aside);
        self.block(&raw);
        self.finalize(aside);
        end
    }
}
