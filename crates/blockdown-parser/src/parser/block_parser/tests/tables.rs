use super::helpers::*;
use crate::ast::{Alignment, Document, NodeKind, TableCell};

fn cells(doc: &Document) -> Vec<TableCell> {
    find_all(doc, "TableCell")
        .into_iter()
        .filter_map(|id| match doc.kind(id) {
            NodeKind::TableCell(cell) => Some(cell.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn header_and_body() {
    let doc = parse_blocks("| a | b |\n|---|--:|\n| 1 | 2 |\n");
    assert_eq!(block_names(&doc), ["Table"]);
    let table = doc.children(doc.root())[0];
    assert_eq!(child_names(&doc, table), ["TableHeader", "TableBody"]);

    let cells = cells(&doc);
    let contents: Vec<_> = cells.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, ["a", "b", "1", "2"]);
    assert!(cells[0].is_header && !cells[2].is_header);
    assert_eq!(cells[1].align, Alignment::Right);
    assert_eq!(cells[0].align, Alignment::Default);
}

#[test]
fn headerless_table() {
    let doc = parse_blocks("|---|---|\n| 1 | 2 |\n");
    let table = doc.children(doc.root())[0];
    assert_eq!(child_names(&doc, table), ["TableBody"]);
}

#[test]
fn footer_rows() {
    let doc = parse_blocks("| a |\n|---|\n| 1 |\n|===|\n| s |\n|===|\n| t |\n");
    let table = doc.children(doc.root())[0];
    assert_eq!(child_names(&doc, table), ["TableHeader", "TableBody", "TableFooter"]);
    let footer = doc.children(table)[2];
    assert_eq!(doc.children(footer).len(), 2);
}

#[test]
fn column_span() {
    let doc = parse_blocks("| a | b | c |\n|---|---|---|\n| wide || c |\n");
    let rows = find_all(&doc, "TableRow");
    let body_row = rows[1];
    assert_eq!(doc.children(body_row).len(), 2);
    match doc.kind(doc.children(body_row)[0]) {
        NodeKind::TableCell(cell) => {
            assert_eq!(cell.content, "wide");
            assert_eq!(cell.colspan, 2);
        }
        other => panic!("expected cell, got {other:?}"),
    }
}

#[test]
fn escaped_pipe_and_code_span_stay_in_cell() {
    let doc = parse_blocks("| x | y |\n|---|---|\n| a\\|b | `c|d` |\n");
    let contents: Vec<_> = cells(&doc).into_iter().map(|c| c.content).collect();
    assert_eq!(contents, ["x", "y", "a\\|b", "`c|d`"]);
}

#[test]
fn short_rows_are_padded() {
    let doc = parse_blocks("| a | b |\n|---|---|\n| 1 |\n");
    let rows = find_all(&doc, "TableRow");
    assert_eq!(doc.children(rows[1]).len(), 2);
}

#[test]
fn caption_wraps_table() {
    let doc = parse_blocks("| a |\n|---|\n| 1 |\nTable: Results {#tab}\n");
    assert_eq!(block_names(&doc), ["CaptionFigure"]);
    let figure = doc.children(doc.root())[0];
    assert_eq!(
        doc.kind(figure),
        &NodeKind::CaptionFigure {
            id: Some("tab".to_string())
        }
    );
    assert_eq!(child_names(&doc, figure), ["Table", "Caption"]);
}

#[test]
fn tables_can_be_disabled() {
    let doc = parse_with("| a |\n|---|\n", crate::options::Extensions::none());
    assert!(find_first(&doc, "Table").is_none());
}
