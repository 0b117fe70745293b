use super::helpers::*;
use crate::ast::{CodeBlock, Document, NodeKind};

fn code_blocks(doc: &Document) -> Vec<CodeBlock> {
    find_all(doc, "CodeBlock")
        .into_iter()
        .filter_map(|id| match doc.kind(id) {
            NodeKind::CodeBlock(code) => Some(code.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn fenced_with_info() {
    let doc = parse_blocks("```go\nx := 1\n```\n");
    let code = &code_blocks(&doc)[0];
    assert!(code.is_fenced);
    assert_eq!(code.info, "go");
    assert_eq!(code.literal, "x := 1\n");
}

#[test]
fn braced_info_is_trimmed() {
    let doc = parse_blocks("~~~ { python }\npass\n~~~\n");
    assert_eq!(code_blocks(&doc)[0].info, "python");
}

#[test]
fn longer_closer_closes() {
    let doc = parse_blocks("```\nx\n`````\n\nafter\n");
    assert_eq!(block_names(&doc), ["CodeBlock", "Paragraph"]);
    assert_eq!(code_blocks(&doc)[0].literal, "x\n");
}

#[test]
fn shorter_fence_is_content() {
    let doc = parse_blocks("````\nA\n```\nB\n````\n");
    assert_eq!(code_blocks(&doc)[0].literal, "A\n```\nB\n");
}

#[test]
fn mismatched_marker_is_content() {
    let doc = parse_blocks("```\nA\n~~~\n```\n");
    assert_eq!(code_blocks(&doc)[0].literal, "A\n~~~\n");
}

#[test]
fn unclosed_fence_is_a_paragraph() {
    let doc = parse_blocks("```\nnot closed\n");
    assert_eq!(block_names(&doc), ["Paragraph"]);
    assert_eq!(paragraph_text(&doc).as_deref(), Some("```\nnot closed"));
}

#[test]
fn indented_code() {
    let doc = parse_blocks("    let x = 1;\n    y\n\nText\n");
    assert_eq!(block_names(&doc), ["CodeBlock", "Paragraph"]);
    let code = &code_blocks(&doc)[0];
    assert!(!code.is_fenced);
    assert_eq!(code.literal, "let x = 1;\ny\n");
}

#[test]
fn indented_code_keeps_inner_blank_lines() {
    let doc = parse_blocks("\tone\n\n\ttwo\n");
    assert_eq!(code_blocks(&doc)[0].literal, "one\n\ntwo\n");
}

#[test]
fn fenced_code_caption() {
    let doc = parse_mmark("```go\nx := 1\n```\nFigure: Code {#c}\n");
    assert_eq!(block_names(&doc), ["CaptionFigure"]);
    let figure = doc.children(doc.root())[0];
    assert_eq!(child_names(&doc, figure), ["CodeBlock", "Caption"]);

    // Captions are an Mmark construct.
    let doc = parse_blocks("```go\nx := 1\n```\nFigure: Code\n");
    assert_eq!(block_names(&doc), ["CodeBlock", "Paragraph"]);
}

#[test]
fn fenced_code_disabled() {
    let doc = parse_with("```\nx\n```\n", crate::options::Extensions::none());
    assert_eq!(block_names(&doc), ["Paragraph"]);
}
