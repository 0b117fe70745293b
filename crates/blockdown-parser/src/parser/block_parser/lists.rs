//! Unordered, ordered and definition lists.
//!
//! A list is opened once, then items are gathered one at a time. Each item's
//! lines are copied (indentation stripped) into a scratch buffer that is
//! parsed either as a single inline paragraph or, once the item is known to
//! hold block content, as full blocks. Tightness is settled in a final pass
//! over the finished items.

use super::BlockParser;
use super::code_blocks::fence_line;
use super::horizontal_rules::is_hrule;
use super::utils::{back_until_char, empty_line_len, skip_char, skip_char_n, skip_until_char};
use crate::ast::{List, ListItem, ListType, NodeId, NodeKind};

/// State shared by the items of one list while it is being gathered.
#[derive(Debug, Clone, Copy)]
struct ItemFlags {
    list_type: ListType,
    begins_list: bool,
    ends_list: bool,
    /// Sticky: once an item holds block content, later items do too.
    contains_block: bool,
    is_term: bool,
}

/// Length of a `*`, `+` or `-` item marker and its following blank, or 0.
pub(crate) fn uli_prefix(data: &[u8]) -> usize {
    let i = skip_char_n(data, 0, b' ', 3);
    if i + 1 >= data.len() {
        return 0;
    }
    if !matches!(data[i], b'*' | b'+' | b'-') || !matches!(data[i + 1], b' ' | b'\t') {
        return 0;
    }
    i + 2
}

/// Length of a `1.` or `1)` item marker and its following blank, or 0.
pub(crate) fn oli_prefix(data: &[u8]) -> usize {
    let start = skip_char_n(data, 0, b' ', 3);
    let mut i = start;
    while i < data.len() && data[i].is_ascii_digit() {
        i += 1;
    }
    if start == i || i + 1 >= data.len() {
        return 0;
    }
    if !matches!(data[i], b'.' | b')') || !matches!(data[i + 1], b' ' | b'\t') {
        return 0;
    }
    i + 2
}

/// Length of a `:` definition marker and its following blank, or 0.
fn definition_prefix(data: &[u8]) -> usize {
    if data.len() < 2 || data[0] != b':' || !matches!(data[1], b' ' | b'\t') {
        return 0;
    }
    2
}

impl BlockParser<'_> {
    pub(super) fn dli_prefix(&self, data: &[u8]) -> usize {
        if !self.extensions.definition_lists {
            return 0;
        }
        definition_prefix(data)
    }

    /// Start number and delimiter of an ordered list from its first marker.
    pub(super) fn ordered_list_start(&self, prefix: &[u8]) -> (usize, char) {
        let delimiter = char::from(prefix[prefix.len() - 2]);
        if !self.extensions.ordered_list_start {
            return (0, delimiter);
        }
        let digits = &prefix[skip_char(prefix, 0, b' ')..prefix.len() - 2];
        let start = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(0);
        (if start == 1 { 0 } else { start }, delimiter)
    }

    pub(super) fn list(&mut self, data: &[u8], list_type: ListType, start: usize, delimiter: char) -> usize {
        let mut flags = ItemFlags {
            list_type,
            begins_list: true,
            ends_list: false,
            contains_block: false,
            is_term: false,
        };
        let list = self.add_block(NodeKind::List(List {
            list_type,
            tight: true,
            start,
            delimiter,
        }));

        let mut tight = true;
        let mut i = 0;
        while i < data.len() {
            let skip = self.list_item(&data[i..], &mut flags);
            if flags.contains_block {
                tight = false;
            }
            i += skip;
            if skip == 0 || flags.ends_list {
                break;
            }
            flags.begins_list = false;
        }

        if let NodeKind::List(l) = self.doc.kind_mut(list) {
            l.tight = tight;
        }
        self.finalize_list(list);
        self.finalize(list);
        log::debug!("{list_type:?} list of {i} bytes, tight={tight}");
        i
    }

    /// Whether `data` starts an item of a different list type.
    fn list_type_changed(&self, data: &[u8], list_type: ListType) -> bool {
        if self.dli_prefix(data) > 0 {
            list_type != ListType::Definition
        } else if oli_prefix(data) > 0 {
            list_type != ListType::Ordered
        } else if uli_prefix(data) > 0 {
            list_type != ListType::Unordered
        } else {
            false
        }
    }

    /// Gather and render one item. Returns the bytes consumed, 0 if `data`
    /// doesn't start an item of this list.
    fn list_item(&mut self, data: &[u8], flags: &mut ItemFlags) -> usize {
        let is_definition = flags.list_type == ListType::Definition;

        // Indentation of the first line.
        let item_indent = if data.first() == Some(&b'\t') {
            4
        } else {
            skip_char_n(data, 0, b' ', 3)
        };

        let mut bullet = '*';
        let mut delimiter = '.';
        let mut i = uli_prefix(data);
        if i > 0 {
            bullet = char::from(data[i - 2]);
        } else {
            i = oli_prefix(data);
            if i > 0 {
                delimiter = char::from(data[i - 2]);
            }
        }
        if i == 0 {
            i = self.dli_prefix(data);
            if i > 0 {
                flags.is_term = false;
            }
        }
        if i == 0 {
            if !is_definition {
                return 0;
            }
            flags.is_term = true;
        }

        // First line, leading blanks skipped. An unindented definition term
        // has no marker and is picked up as a continuation line below.
        i = skip_char(data, i, b' ');
        let first = i;
        while i > 0 && i < data.len() && data[i - 1] != b'\n' {
            i += 1;
        }
        let mut raw = data[first..i].to_vec();
        let mut line = i;

        let mut contains_blank_line = false;
        let mut blank_run = 0;
        let mut sublist = 0;

        while line < data.len() {
            i += 1;
            while i < data.len() && data[i - 1] != b'\n' {
                i += 1;
            }

            // A blank line may still belong to this item.
            if empty_line_len(&data[line..i]) > 0 {
                contains_blank_line = true;
                line = i;
                blank_run += 1;
                if self.extensions.empty_lines_break_list && blank_run >= 2 {
                    flags.ends_list = true;
                    break;
                }
                continue;
            }
            blank_run = 0;

            let (indent, indent_index) = if data[line] == b'\t' {
                (4, 1)
            } else {
                let n = skip_char_n(&data[..i], line, b' ', 4) - line;
                (n, n)
            };
            let mut chunk = &data[line + indent_index..i];

            // An unindented fence ends the list rather than being swallowed.
            if !is_definition
                && self.extensions.fenced_code
                && indent == 0
                && fence_line(chunk, None).is_some()
            {
                flags.ends_list = true;
                break;
            }

            let nested = (uli_prefix(chunk) > 0 && !is_hrule(chunk))
                || oli_prefix(chunk) > 0
                || self.dli_prefix(chunk) > 0;

            if nested {
                // Keep the marker's own indentation relative to this item.
                if indent_index >= 4 && self.dli_prefix(chunk) == 0 {
                    let leading = skip_char(chunk, 0, b' ');
                    let start = (line + indent_index).saturating_sub(leading + 1).max(line);
                    chunk = &data[start..i];
                }

                // Not indented past this item: a sibling or a new list.
                if indent <= item_indent {
                    if self.list_type_changed(chunk, flags.list_type) {
                        flags.ends_list = true;
                    } else if contains_blank_line {
                        flags.contains_block = true;
                    }
                    break;
                }

                if contains_blank_line {
                    flags.contains_block = true;
                }

                if sublist == 0 {
                    sublist = raw.len();
                    // A nested definition's term is the previous line.
                    if self.dli_prefix(chunk) > 0 {
                        sublist = back_until_char(&raw, raw.len().saturating_sub(1), b'\n');
                    }
                }
            } else if self.is_prefix_heading(chunk) || self.is_prefix_special_heading(chunk) {
                // An unindented heading after a blank line is not part of the item.
                if contains_blank_line && indent < 4 {
                    flags.ends_list = true;
                    break;
                }
                flags.contains_block = true;
            } else if contains_blank_line && indent < 4 {
                // After a blank line only indented content continues the item.
                if is_definition && i + 1 < data.len() {
                    let mut next = skip_until_char(data, i, b'\n');
                    while next + 1 < data.len() && data[next] == b'\n' {
                        next += 1;
                    }
                    if data[i] != b':' && next + 1 < data.len() && data[next] != b':' {
                        flags.ends_list = true;
                    }
                } else {
                    flags.ends_list = true;
                }
                break;
            } else if contains_blank_line {
                raw.push(b'\n');
                flags.contains_block = true;
            }

            // Re-introduce the blank line(s) seen before this one.
            if contains_blank_line {
                contains_blank_line = false;
                raw.push(b'\n');
            }

            raw.extend_from_slice(chunk);
            line = i;
        }

        let item = self.add_block(NodeKind::ListItem(ListItem {
            list_type: flags.list_type,
            bullet,
            delimiter,
            begins_list: flags.begins_list,
            ends_list: flags.ends_list,
            contains_block: flags.contains_block,
            is_term: flags.is_term,
            ends_with_blank_line: contains_blank_line,
        }));

        if flags.contains_block && !flags.is_term {
            if sublist > 0 {
                self.block(&raw[..sublist]);
                self.block(&raw[sublist..]);
            } else {
                self.block(&raw);
            }
        } else {
            let inline_end = if sublist > 0 { sublist } else { raw.len() };
            self.add_child(NodeKind::Paragraph {
                content: item_text(&raw[..inline_end]),
            });
            if sublist > 0 {
                self.block(&raw[sublist..]);
            }
        }
        self.finalize(item);
        line
    }

    /// A list is loose when an item other than the last, or any nested item
    /// other than the very last one, ended with a blank line.
    fn finalize_list(&mut self, list: NodeId) {
        let items = self.doc.children(list).to_vec();
        let Some(last_item) = items.len().checked_sub(1) else {
            return;
        };

        let mut loose = false;
        'items: for (i, &item) in items.iter().enumerate() {
            let is_last_item = i == last_item;
            if !is_last_item && self.ends_with_blank_line(item) {
                loose = true;
                break;
            }
            let subs = self.doc.children(item);
            let last_sub = subs.len().saturating_sub(1);
            for (j, &sub) in subs.iter().enumerate() {
                if (!is_last_item || j != last_sub) && self.ends_with_blank_line(sub) {
                    loose = true;
                    break 'items;
                }
            }
        }

        if loose && let NodeKind::List(l) = self.doc.kind_mut(list) {
            l.tight = false;
        }
    }

    /// Whether `node` ended with a blank line, descending through the last
    /// children of lists and items.
    fn ends_with_blank_line(&self, mut node: NodeId) -> bool {
        loop {
            match self.doc.kind(node) {
                NodeKind::ListItem(item) if item.ends_with_blank_line => return true,
                NodeKind::ListItem(_) | NodeKind::List(_) => match self.doc.last_child(node) {
                    Some(child) => node = child,
                    None => return false,
                },
                _ => return false,
            }
        }
    }
}

/// Inline item text: leading spaces and the trailing newline trimmed.
fn item_text(data: &[u8]) -> String {
    let start = skip_char(data, 0, b' ');
    let mut end = data.len();
    while end > start && matches!(data[end - 1], b'\n' | b' ') {
        end -= 1;
    }
    super::utils::text(&data[start..end.max(start)])
}
