use std::collections::HashMap;

use super::helpers::*;
use crate::ast::{CustomBlock, Document, NodeId, NodeKind};
use crate::hooks::HookBlock;
use crate::options::{Extensions, Flavor, ParserOptions};
use crate::parser::block_parser::BlockParser;

const MIXED: &str = "\
# Title {#t}

{.lead}
Para one

* a
    * b

* c

> quoted
> more

Quote: Said {#q}

| a | b |
|---|---|
| 1 | 2 |
Table: Numbers

!---
inside
!---
Figure: Fig {#f}

~~~ go
x
~~~
Figure: Code

A> aside

Term
: Definition
";

/// Every child points back at its parent and no node is owned twice.
fn assert_single_ownership(doc: &Document) {
    let mut owners: HashMap<NodeId, NodeId> = HashMap::new();
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        for &child in doc.children(id) {
            assert_eq!(doc.parent(child), Some(id), "{child:?} under {id:?}");
            assert!(
                owners.insert(child, id).is_none(),
                "{child:?} appears in more than one child list"
            );
            stack.push(child);
        }
    }
    assert_eq!(doc.parent(doc.root()), None);
    assert_eq!(owners.len() + 1, doc.len());
}

#[test]
fn mixed_document_has_single_owners() {
    let doc = parse_mmark(MIXED);
    assert!(find_all(&doc, "CaptionFigure").len() >= 3);
    assert!(find_first(&doc, "Aside").is_some());
    assert_single_ownership(&doc);
}

#[test]
fn captions_keep_ownership_after_wrapping() {
    let doc = parse_blocks("| a |\n|---|\n| 1 |\nTable: Caption\n\nafter\n");
    let figure = find_first(&doc, "CaptionFigure").expect("figure");
    assert_eq!(child_names(&doc, figure), ["Table", "Caption"]);
    assert_single_ownership(&doc);
}

#[test]
fn hook_nodes_keep_ownership() {
    let marker = |data: &[u8]| {
        data.starts_with(b"@@\n").then(|| HookBlock {
            node: Some(NodeKind::Custom(CustomBlock {
                name: "marker".to_string(),
                literal: String::new(),
                container: false,
            })),
            content: None,
            consumed: 3,
        })
    };
    let doc = BlockParser::new(ParserOptions::new(Extensions::for_flavor(Flavor::Mmark)))
        .with_block_hook(marker)
        .parse("> quote\n\n@@\n\n* item\n\n@@\n");
    assert_eq!(find_all(&doc, "Custom").len(), 2);
    assert_single_ownership(&doc);
}
