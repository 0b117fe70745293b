//! The fallback recognizer. A paragraph runs line by line until something
//! interrupts it; a setext underline turns its last line into a heading.

use super::BlockParser;
use super::blockquotes::quote_prefix;
use super::code_blocks::scan_fenced_code;
use super::figures::is_figure_block;
use super::headings::is_underlined_heading;
use super::horizontal_rules::is_hrule;
use super::lists::{oli_prefix, uli_prefix};
use super::tables::scan_table_header;
use super::utils::{code_prefix, empty_line_len, line_end, skip_char, skip_until_char, text};
use crate::ast::{ListType, NodeKind};

impl BlockParser<'_> {
    pub(super) fn paragraph(&mut self, data: &[u8]) -> usize {
        // `prev` starts the previous line, `line` the current one and `i`
        // is the scan cursor.
        let mut prev;
        let mut line = 0;
        let mut i = 0;

        while i < data.len() {
            prev = line;
            let current = &data[i..];
            line = i;

            let definition_end = self.reference(current);
            if definition_end > 0 {
                self.render_paragraph(&data[..i]);
                return i + definition_end;
            }

            let blank = empty_line_len(current);
            if blank > 0 {
                // A blank line followed by `:` makes the previous line a
                // definition term.
                if self.extensions.definition_lists && i + 1 < data.len() && data[i + 1] == b':' {
                    self.render_paragraph(&data[..prev]);
                    return prev + self.list(&data[prev..], ListType::Definition, 0, '.');
                }
                self.render_paragraph(&data[..i]);
                return i + blank;
            }

            if i > 0 {
                let level = is_underlined_heading(current);
                if level > 0 {
                    self.render_paragraph(&data[..prev]);
                    self.underlined_heading(&data[prev..i], level);
                    return skip_until_char(data, i, b'\n');
                }
            }

            if self.interrupts_paragraph(current) {
                self.render_paragraph(&data[..i]);
                return i;
            }

            // The line before a `:` definition is its term.
            if self.dli_prefix(current) > 0 {
                self.render_paragraph(&data[..prev]);
                let list_len = self.list(&data[prev..], ListType::Definition, 0, '.');
                return prev + list_len;
            }

            if self.extensions.no_empty_line_before_block
                && (uli_prefix(current) > 0
                    || oli_prefix(current) > 0
                    || quote_prefix(current) > 0
                    || code_prefix(current) > 0)
            {
                self.render_paragraph(&data[..i]);
                return i;
            }

            i = line_end(data, i);
        }

        self.render_paragraph(&data[..i]);
        i
    }

    /// Whether a higher-priority block starts at `current`.
    fn interrupts_paragraph(&mut self, current: &[u8]) -> bool {
        if self.extensions.lax_html_blocks && current[0] == b'<' && self.html(current, false) > 0 {
            return true;
        }
        if self.is_prefix_heading(current) || self.is_prefix_special_heading(current) || is_hrule(current) {
            return true;
        }
        if quote_prefix(current) > 0 {
            return true;
        }
        if self.extensions.fenced_code && scan_fenced_code(current).is_some() {
            return true;
        }
        if self.extensions.mmark && is_figure_block(current) {
            return true;
        }
        self.extensions.tables && scan_table_header(current).is_some()
    }

    /// Attach the gathered paragraph text, trimmed of leading spaces,
    /// trailing spaces and one trailing newline.
    pub(super) fn render_paragraph(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        let beg = skip_char(data, 0, b' ');
        let mut end = data.len();
        if data[end - 1] == b'\n' {
            end -= 1;
        }
        while end > beg && data[end - 1] == b' ' {
            end -= 1;
        }
        let content = text(&data[beg..end.max(beg)]);
        log::trace!("paragraph {content:?}");
        self.add_block(NodeKind::Paragraph { content });
    }
}
