//! ATX (`#`), special (`.#`) and setext heading support, plus heading ids.

use std::collections::HashSet;

use super::BlockParser;
use super::utils::{is_backslash_escaped, skip_char, skip_char_n, skip_until_char, text};
use crate::ast::{Heading, NodeKind};

/// Text bounds of a heading line after the explicit id and closing hashes
/// are stripped.
struct HeadingLine {
    start: usize,
    end: usize,
    /// Where the line's content ends, i.e. how much to consume.
    skip: usize,
    id: Option<String>,
}

impl BlockParser<'_> {
    pub(super) fn is_prefix_heading(&self, data: &[u8]) -> bool {
        if data.first() != Some(&b'#') {
            return false;
        }
        if self.extensions.space_headings {
            let level = skip_char_n(data, 0, b'#', 6);
            if level == data.len() || data[level] != b' ' {
                return false;
            }
        }
        true
    }

    /// `# Title {#id}` with up to six hashes.
    pub(super) fn prefix_heading(&mut self, data: &[u8]) -> usize {
        let level = skip_char_n(data, 0, b'#', 6);
        let i = skip_char(data, level, b' ');
        let line = self.heading_line(data, i, true);
        if line.end > line.start {
            self.add_heading(level, &data[line.start..line.end], line.id, false);
        }
        line.skip
    }

    pub(super) fn is_prefix_special_heading(&self, data: &[u8]) -> bool {
        if !self.extensions.mmark || data.len() < 4 {
            return false;
        }
        if data[0] != b'.' || data[1] != b'#' || data[2] == b'#' {
            return false;
        }
        !(self.extensions.space_headings && data[2] != b' ')
    }

    /// `.# Abstract`: an unnumbered level-1 heading.
    pub(super) fn prefix_special_heading(&mut self, data: &[u8]) -> usize {
        let i = skip_char(data, 2, b' ');
        let line = self.heading_line(data, i, true);
        if line.end > line.start {
            self.add_heading(1, &data[line.start..line.end], line.id, true);
        }
        line.skip
    }

    /// Setext heading whose text is the single line `line` (newline included).
    pub(super) fn underlined_heading(&mut self, line: &[u8], level: usize) {
        let start = skip_char(line, 0, b' ');
        let heading = self.heading_line(line, start, false);
        let end = heading.end.max(heading.start);
        self.add_heading(level, &line[heading.start..end], heading.id, false);
    }

    fn heading_line(&self, data: &[u8], start: usize, trim_hashes: bool) -> HeadingLine {
        let mut end = skip_until_char(data, start, b'\n');
        let mut skip = end;
        let mut id = None;

        if self.extensions.heading_ids
            && let Some((open, close)) = find_heading_id(data, start, end)
        {
            id = Some(text(&data[open + 2..close]));
            skip = close + 1;
            end = open;
        }

        if trim_hashes {
            while end > 0 && data[end - 1] == b'#' {
                if is_backslash_escaped(data, end - 1) {
                    break;
                }
                end -= 1;
            }
        }
        while end > 0 && data[end - 1] == b' ' {
            end -= 1;
        }

        HeadingLine {
            start,
            end,
            skip,
            id,
        }
    }

    fn add_heading(&mut self, level: usize, content: &[u8], explicit_id: Option<String>, is_special: bool) {
        let content = text(content);
        let (id, auto_id) = match explicit_id {
            Some(id) => (Some(id), false),
            None if self.extensions.auto_heading_ids => (Some(sanitize_heading_id(&content)), true),
            None => (None, false),
        };
        log::trace!("heading level={level} id={id:?}");
        let node = self.add_block(NodeKind::Heading(Heading {
            level,
            id,
            auto_id,
            is_special,
            is_titleblock: false,
            content,
        }));
        if auto_id {
            self.auto_id_headings.push(node);
        }
    }

    /// Make generated heading ids unique, in document order, by appending
    /// `-1`, `-2`, ... to repeats. Explicit ids are left alone.
    pub(super) fn finalize_heading_ids(&mut self) {
        let mut taken = HashSet::new();
        for node in std::mem::take(&mut self.auto_id_headings) {
            let NodeKind::Heading(heading) = self.doc.kind_mut(node) else {
                continue;
            };
            let Some(base) = heading.id.take() else {
                continue;
            };
            let mut candidate = base.clone();
            let mut n = 0;
            while taken.contains(&candidate) {
                n += 1;
                candidate = format!("{base}-{n}");
            }
            taken.insert(candidate.clone());
            heading.id = Some(candidate);
        }
    }
}

/// Locate `{#...}` in `data[start..end]`, returning the indices of `{` and `}`.
fn find_heading_id(data: &[u8], start: usize, end: usize) -> Option<(usize, usize)> {
    let mut open = start;
    while open + 1 < end && !(data[open] == b'{' && data[open + 1] == b'#') {
        open += 1;
    }
    if open + 1 >= end {
        return None;
    }
    let close = skip_until_char(&data[..end], open + 1, b'}');
    (close < end).then_some((open, close))
}

/// Level of the setext underline at the start of `data`, or 0.
pub(super) fn is_underlined_heading(data: &[u8]) -> usize {
    let (marker, level) = match data.first() {
        Some(b'=') => (b'=', 1),
        Some(b'-') => (b'-', 2),
        _ => return 0,
    };
    let i = skip_char(data, 1, marker);
    let i = skip_char(data, i, b' ');
    if i < data.len() && data[i] == b'\n' {
        level
    } else {
        0
    }
}

/// Turn heading text into an anchor: runs of alphanumeric characters are
/// lowercased and joined by single hyphens, everything else is dropped.
/// Text with no alphanumerics yields `"empty"`.
pub fn sanitize_heading_id(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !anchor.is_empty() {
                anchor.push('-');
            }
            pending_dash = false;
            anchor.extend(c.to_lowercase().filter(|lc| lc.is_alphanumeric()));
        } else {
            pending_dash = true;
        }
    }
    if anchor.is_empty() {
        return "empty".to_string();
    }
    anchor
}
