use super::helpers::*;
use crate::ast::NodeKind;

#[test]
fn quote_lines_form_one_paragraph() {
    let doc = parse_blocks("> a\n> b\n");
    assert_eq!(block_names(&doc), ["BlockQuote"]);
    let quote = doc.children(doc.root())[0];
    assert_eq!(child_names(&doc, quote), ["Paragraph"]);
    assert_eq!(paragraph_text(&doc).as_deref(), Some("a\nb"));
}

#[test]
fn lazy_continuation_line() {
    let doc = parse_blocks("> a\nb\n");
    assert_eq!(block_names(&doc), ["BlockQuote"]);
    assert_eq!(paragraph_text(&doc).as_deref(), Some("a\nb"));
}

#[test]
fn blank_line_then_text_ends_quote() {
    assert_block_kinds("> a\n\nafter\n", &["BlockQuote", "Paragraph"]);
}

#[test]
fn quote_holds_blocks() {
    let doc = parse_blocks("> # Title\n>\n> - item\n");
    let quote = doc.children(doc.root())[0];
    assert_eq!(child_names(&doc, quote), ["Heading", "List"]);
}

#[test]
fn fenced_code_inside_quote_is_taken_whole() {
    let doc = parse_blocks("> ```\n> x\n> ```\n");
    let code = find_first(&doc, "CodeBlock").expect("code block");
    assert_eq!(doc.depth(code), 2);
}

#[test]
fn quote_caption_makes_a_figure() {
    let doc = parse_mmark("> wise words\n\nQuote: Someone {#q1}\n");
    assert_eq!(block_names(&doc), ["CaptionFigure"]);
    let figure = doc.children(doc.root())[0];
    assert_eq!(
        doc.kind(figure),
        &NodeKind::CaptionFigure {
            id: Some("q1".to_string())
        }
    );
    assert_eq!(child_names(&doc, figure), ["BlockQuote", "Caption"]);
    let caption = doc.children(figure)[1];
    assert_eq!(doc.kind(caption).inline_text(), Some("Someone"));
}

#[test]
fn aside() {
    let doc = parse_mmark("A> note\n");
    assert_eq!(block_names(&doc), ["Aside"]);
    assert_eq!(paragraph_text(&doc).as_deref(), Some("note"));

    // Asides are an Mmark construct.
    assert_block_kinds("A> note\n", &["Paragraph"]);
}
