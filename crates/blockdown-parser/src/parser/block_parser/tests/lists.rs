use super::helpers::*;
use crate::ast::{List, ListType, NodeKind};
use crate::options::{Extensions, Flavor};

fn first_list(doc: &crate::ast::Document) -> List {
    let id = find_first(doc, "List").expect("list");
    match doc.kind(id) {
        NodeKind::List(list) => list.clone(),
        _ => unreachable!(),
    }
}

#[test]
fn tight_unordered_list() {
    let doc = parse_blocks("- a\n- b\n");
    similar_asserts::assert_eq!(
        doc.to_string(),
        "Document\n  List Unordered tight\n    ListItem '-'\n      Paragraph \"a\"\n    ListItem '-'\n      Paragraph \"b\"\n"
    );
}

#[test]
fn blank_line_between_items_makes_list_loose() {
    let doc = parse_blocks("- a\n\n- b\n");
    let list = first_list(&doc);
    assert!(!list.tight);
    assert_eq!(find_all(&doc, "ListItem").len(), 2);
    assert_eq!(find_all(&doc, "Paragraph").len(), 2);
}

#[test]
fn ordered_list_start_and_delimiter() {
    let doc = parse_mmark("3. x\n4. y\n");
    let list = first_list(&doc);
    assert_eq!(list.list_type, ListType::Ordered);
    assert_eq!(list.start, 3);
    assert_eq!(list.delimiter, '.');

    // Without the extension only the delimiter is kept.
    let list = first_list(&parse_blocks("3) x\n"));
    assert_eq!(list.start, 0);
    assert_eq!(list.delimiter, ')');

    // Starting at one is the default and not recorded.
    assert_eq!(first_list(&parse_mmark("1. x\n")).start, 0);
}

#[test]
fn changing_marker_type_starts_a_new_list() {
    let doc = parse_blocks("- a\n1. b\n");
    assert_eq!(block_names(&doc), ["List", "List"]);
    let types: Vec<_> = find_all(&doc, "List")
        .into_iter()
        .map(|id| match doc.kind(id) {
            NodeKind::List(l) => l.list_type,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(types, [ListType::Unordered, ListType::Ordered]);
}

#[test]
fn nested_list() {
    let doc = parse_blocks("- a\n    - b\n");
    assert_eq!(block_names(&doc), ["List"]);
    let lists = find_all(&doc, "List");
    assert_eq!(lists.len(), 2);
    assert_eq!(doc.depth(lists[1]), 3);
    let outer_item = doc.children(lists[0])[0];
    assert_eq!(child_names(&doc, outer_item), ["Paragraph", "List"]);
}

#[test]
fn two_blank_lines_break_list_with_extension() {
    let mut ext = Extensions::for_flavor(Flavor::Common);
    ext.empty_lines_break_list = true;
    let doc = parse_with("- a\n\n\n- b\n", ext);
    assert_eq!(block_names(&doc), ["List", "List"]);

    let doc = parse_blocks("- a\n\n\n- b\n");
    assert_eq!(block_names(&doc), ["List"]);
    assert!(!first_list(&doc).tight);
}

#[test]
fn definition_list() {
    let doc = parse_blocks("Term\n: Definition\n");
    assert_eq!(block_names(&doc), ["List"]);
    assert_eq!(first_list(&doc).list_type, ListType::Definition);

    let items = find_all(&doc, "ListItem");
    assert_eq!(items.len(), 2);
    match (doc.kind(items[0]), doc.kind(items[1])) {
        (NodeKind::ListItem(term), NodeKind::ListItem(def)) => {
            assert!(term.is_term);
            assert!(!def.is_term);
        }
        _ => unreachable!(),
    }
    let texts: Vec<_> = find_all(&doc, "Paragraph")
        .into_iter()
        .filter_map(|id| doc.kind(id).inline_text().map(str::to_string))
        .collect();
    assert_eq!(texts, ["Term", "Definition"]);
}

#[test]
fn definition_lists_can_be_disabled() {
    let mut ext = Extensions::for_flavor(Flavor::Common);
    ext.definition_lists = false;
    let doc = parse_with("Term\n: Definition\n", ext);
    assert_eq!(block_names(&doc), ["Paragraph"]);
}

#[test]
fn unindented_fence_ends_list() {
    assert_block_kinds("- a\n```\ncode\n```\n", &["List", "CodeBlock"]);
}

#[test]
fn trailing_blank_of_last_subitem_keeps_list_tight() {
    let doc = parse_blocks("* a\n* b\n    * c\n\n");
    let lists = find_all(&doc, "List");
    assert_eq!(lists.len(), 2);
    assert!(first_list(&doc).tight);
}

#[test]
fn blank_after_nested_item_loosens_outer_list() {
    let doc = parse_blocks("* a\n    * b\n\n* c\n");
    assert!(!first_list(&doc).tight);
    let outer = doc.children(doc.root())[0];
    assert_eq!(doc.children(outer).len(), 2);
}

#[test]
fn blank_between_later_items_loosens_whole_list() {
    let doc = parse_blocks("* a\n* b\n\n* c\n");
    assert_eq!(block_names(&doc), ["List"]);
    assert_eq!(find_all(&doc, "ListItem").len(), 3);
    assert!(!first_list(&doc).tight);
}
