//! Pipe tables.
//!
//! ```markdown
//! | Name | Value |
//! |:-----|------:|
//! | a    | 1     |
//! |======|=======|
//! | sum  | 1     |
//! Table: Caption {#table-id}
//! ```
//!
//! The header row is optional: a table may start directly with the
//! alignment underline. A `|===|` line switches the remaining rows into the
//! footer. Repeated pipes after a cell make it span columns.

use super::BlockParser;
use super::figures::{CAPTION_TABLE, caption};
use super::utils::{is_backslash_escaped, is_space, skip_char, skip_char_n, text};
use crate::ast::{Alignment, NodeKind, TableCell};

/// A recognized header: the header row (if any), one alignment per column
/// and the bytes consumed by header and underline.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TableHeader<'a> {
    pub row: Option<&'a [u8]>,
    pub columns: Vec<Alignment>,
    pub size: usize,
}

fn is_pipe(data: &[u8], i: usize) -> bool {
    data[i] == b'|' && !is_backslash_escaped(data, i)
}

fn alignment(left: bool, right: bool) -> Alignment {
    match (left, right) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::Default,
    }
}

/// Length of a backtick code span at the start of `data`, or 0.
fn code_span_len(data: &[u8]) -> usize {
    let ticks = skip_char(data, 0, b'`');
    if ticks == 0 {
        return 0;
    }
    let mut i = ticks;
    while i < data.len() {
        if data[i] == b'\n' {
            return 0;
        }
        if data[i] == b'`' {
            let run = skip_char(data, i, b'`') - i;
            if run == ticks {
                return i + run;
            }
            i += run;
            continue;
        }
        i += 1;
    }
    0
}

/// Recognize a table header (and its underline) at the start of `data`.
pub(crate) fn scan_table_header(data: &[u8]) -> Option<TableHeader<'_>> {
    let mut col_count = 1;
    let mut header_is_underline = true;
    let mut header_is_empty = true;
    let mut i = 0;
    while i < data.len() && data[i] != b'\n' {
        if is_pipe(data, i) {
            col_count += 1;
        }
        if !matches!(data[i], b'-' | b' ' | b':' | b'|') {
            header_is_underline = false;
        }
        if data[i] != b' ' && data[i] != b'|' {
            header_is_empty = false;
        }
        i += 1;
    }
    if col_count == 1 {
        return None;
    }

    let header_end = skip_char_n(data, i, b'\n', 1);
    let mut row = Some(&data[..header_end]);

    // Leading and trailing pipes don't separate columns.
    if data[0] == b'|' {
        col_count -= 1;
    }
    let mut trimmed = &data[..header_end];
    while let Some((&last, rest)) = trimmed.split_last()
        && is_space(last)
    {
        trimmed = rest;
    }
    let n = trimmed.len();
    if n > 2 && is_pipe(trimmed, n - 1) {
        col_count -= 1;
    }

    // A first line that is itself an underline means there is no header.
    if header_is_underline && !header_is_empty {
        row = None;
        i = 0;
    } else {
        i += 1;
    }
    if i >= data.len() {
        return None;
    }

    let mut flags = vec![(false, false); col_count];
    let n = data.len();
    if is_pipe(data, i) {
        i += 1;
    }
    i = skip_char(data, i, b' ');

    let mut col = 0;
    while i < n && data[i] != b'\n' {
        if col >= col_count {
            return None;
        }
        let mut dashes = 0;
        if data[i] == b':' {
            i += 1;
            flags[col].0 = true;
            dashes += 1;
        }
        while i < n && data[i] == b'-' {
            i += 1;
            dashes += 1;
        }
        if i < n && data[i] == b':' {
            i += 1;
            flags[col].1 = true;
            dashes += 1;
        }
        i = skip_char(data, i, b' ');
        if i == n {
            return None;
        }

        if dashes < 3 {
            return None;
        }
        if is_pipe(data, i) {
            col += 1;
            i += 1;
            i = skip_char(data, i, b' ');
            // Trailing junk after the last column.
            if col >= col_count && i < n && data[i] != b'\n' {
                return None;
            }
        } else if col + 1 < col_count {
            return None;
        } else if data[i] == b'\n' {
            // The closing pipe is optional on the last column.
            col += 1;
        } else {
            return None;
        }
    }
    if col != col_count {
        return None;
    }

    Some(TableHeader {
        row,
        columns: flags
            .into_iter()
            .map(|(left, right)| alignment(left, right))
            .collect(),
        size: skip_char_n(data, i, b'\n', 1),
    })
}

/// A line made of pipes, `=`, `:` and spaces starts the footer.
fn is_table_footer(data: &[u8]) -> bool {
    let mut col_count = 1;
    let mut i = skip_char_n(data, 0, b' ', 3);
    while i < data.len() && data[i] != b'\n' {
        if is_pipe(data, i) {
            col_count += 1;
        } else if !matches!(data[i], b'=' | b':' | b' ') {
            return false;
        }
        i += 1;
    }
    col_count > 1
}

impl BlockParser<'_> {
    pub(super) fn table(&mut self, data: &[u8]) -> usize {
        let Some(header) = scan_table_header(data) else {
            return 0;
        };
        log::debug!("table with {} columns", header.columns.len());

        let table = self.add_block(NodeKind::Table);
        if let Some(row) = header.row {
            self.add_block(NodeKind::TableHeader);
            self.table_row(row, &header.columns, true);
        }
        self.add_block(NodeKind::TableBody);

        let mut i = header.size;
        let mut in_footer = false;
        while i < data.len() {
            let row_start = i;
            let mut pipes = 0;
            while i < data.len() && data[i] != b'\n' {
                if data[i] == b'|' {
                    pipes += 1;
                }
                i += 1;
            }
            if pipes == 0 {
                i = row_start;
                break;
            }
            i = skip_char_n(data, i, b'\n', 1);

            let row = &data[row_start..i];
            if is_table_footer(row) {
                if !in_footer {
                    self.add_block(NodeKind::TableFooter);
                    in_footer = true;
                }
                continue;
            }
            self.table_row(row, &header.columns, false);
        }
        self.finalize(table);

        if let Some(cap) = caption(&data[i..], CAPTION_TABLE) {
            let figure = self.doc.wrap(table, NodeKind::CaptionFigure { id: cap.id });
            self.doc.append(
                figure,
                NodeKind::Caption {
                    content: text(cap.content),
                },
            );
            i += cap.consumed;
        }
        i
    }

    fn table_row(&mut self, data: &[u8], columns: &[Alignment], is_header: bool) {
        self.add_block(NodeKind::TableRow);
        let n = data.len();
        let mut i = skip_char(data, 0, b'|');
        let mut col = 0;
        // Cells still owed to earlier spans.
        let mut spanned = 0;

        while col < columns.len() && i < n {
            i = skip_char(data, i, b' ');
            let cell_start = i;

            let span = code_span_len(&data[i..]);
            if span > 0 {
                i += span - 1;
            }
            while i < n && !is_pipe(data, i) && data[i] != b'\n' {
                i += 1;
            }
            let mut cell_end = i;

            let mut colspan = 0;
            while i < n && is_pipe(data, i) {
                i += 1;
                colspan += 1;
            }
            if colspan < 2 {
                colspan = 0;
            }

            while cell_end > cell_start && data[cell_end - 1] == b' ' {
                cell_end -= 1;
            }

            if cell_start == cell_end && spanned > 0 {
                spanned -= 1;
            } else {
                self.add_block(NodeKind::TableCell(TableCell {
                    is_header,
                    align: columns[col],
                    colspan,
                    content: text(&data[cell_start..cell_end]),
                }));
            }
            if colspan > 0 {
                spanned += colspan - 1;
            }
            col += 1;
        }

        // Pad short rows; extra cells are dropped.
        for align in &columns[col..] {
            self.add_block(NodeKind::TableCell(TableCell {
                is_header,
                align: *align,
                colspan: 0,
                content: String::new(),
            }));
        }
    }
}
