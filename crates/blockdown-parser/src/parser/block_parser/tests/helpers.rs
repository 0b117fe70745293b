use crate::ast::{Document, NodeId, NodeKind};
use crate::options::{Extensions, Flavor, ParserOptions};
use crate::parser::block_parser::BlockParser;

pub fn parse_with(input: &str, extensions: Extensions) -> Document {
    BlockParser::new(ParserOptions::new(extensions)).parse(input)
}

pub fn parse_blocks(input: &str) -> Document {
    parse_with(input, Extensions::for_flavor(Flavor::Common))
}

pub fn parse_mmark(input: &str) -> Document {
    parse_with(input, Extensions::for_flavor(Flavor::Mmark))
}

pub fn find_first(doc: &Document, name: &str) -> Option<NodeId> {
    doc.descendants(doc.root())
        .find(|id| doc.kind(*id).name() == name)
}

pub fn find_all(doc: &Document, name: &str) -> Vec<NodeId> {
    doc.descendants(doc.root())
        .filter(|id| doc.kind(*id).name() == name)
        .collect()
}

/// Kind names of the top-level blocks.
pub fn block_names(doc: &Document) -> Vec<&'static str> {
    doc.children(doc.root())
        .iter()
        .map(|id| doc.kind(*id).name())
        .collect()
}

pub fn child_names(doc: &Document, id: NodeId) -> Vec<&'static str> {
    doc.children(id)
        .iter()
        .map(|child| doc.kind(*child).name())
        .collect()
}

pub fn assert_block_kinds(input: &str, expected: &[&str]) {
    let doc = parse_blocks(input);
    assert_eq!(
        block_names(&doc),
        expected,
        "Block kinds did not match for input:\n{}",
        input
    );
}

/// Raw text of the first paragraph.
pub fn paragraph_text(doc: &Document) -> Option<String> {
    let id = find_first(doc, "Paragraph")?;
    match doc.kind(id) {
        NodeKind::Paragraph { content } => Some(content.clone()),
        _ => None,
    }
}

/// Print debug tree for inspection
#[allow(dead_code)]
pub fn debug_tree(doc: &Document) -> String {
    doc.to_string()
}
