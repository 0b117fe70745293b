use super::helpers::*;
use crate::ast::{Matter, NodeKind};
use crate::options::{Extensions, Flavor};

#[test]
fn title_block() {
    let mut ext = Extensions::for_flavor(Flavor::Common);
    ext.titleblock = true;
    let doc = parse_with("% My Title\n% Sub\n\nText\n", ext);
    assert_eq!(block_names(&doc), ["Heading", "Paragraph"]);
    match doc.kind(doc.children(doc.root())[0]) {
        NodeKind::Heading(h) => {
            assert!(h.is_titleblock);
            assert_eq!(h.level, 1);
            assert_eq!(h.content, "My Title\nSub");
        }
        other => panic!("expected heading, got {other:?}"),
    }
}

#[test]
fn title_block_needs_extension() {
    assert_block_kinds("% My Title\n", &["Paragraph"]);
}

#[test]
fn document_matter_markers() {
    let doc = parse_mmark("{frontmatter}\n# A\n{mainmatter}\n# B\n{backmatter}\n");
    assert_eq!(
        block_names(&doc),
        ["DocumentMatter", "Heading", "DocumentMatter", "Heading", "DocumentMatter"]
    );
    let matters: Vec<_> = find_all(&doc, "DocumentMatter")
        .into_iter()
        .map(|id| match doc.kind(id) {
            NodeKind::DocumentMatter { matter } => *matter,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(matters, [Matter::Front, Matter::Main, Matter::Back]);
}

#[test]
fn display_math() {
    let doc = parse_blocks("$$\nx^2\n$$\n\nText\n");
    assert_eq!(block_names(&doc), ["MathBlock", "Paragraph"]);
    assert_eq!(
        doc.kind(doc.children(doc.root())[0]),
        &NodeKind::MathBlock {
            literal: "\nx^2\n".to_string()
        }
    );
}

#[test]
fn title_block_after_other_blocks() {
    let mut ext = Extensions::for_flavor(Flavor::Common);
    ext.titleblock = true;
    let doc = parse_with("Text\n\n% Late Title\n", ext);
    assert_eq!(block_names(&doc), ["Paragraph", "Heading"]);
    match doc.kind(doc.children(doc.root())[1]) {
        NodeKind::Heading(h) => {
            assert!(h.is_titleblock);
            assert_eq!(h.content, "Late Title");
        }
        _ => unreachable!(),
    }
}
