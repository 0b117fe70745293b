use super::helpers::*;
use crate::ast::NodeKind;

#[test]
fn figure_block_with_caption() {
    let doc = parse_mmark("!---\n![a](b.png)\n!---\nFigure: Caption {#fig}\n");
    assert_eq!(block_names(&doc), ["CaptionFigure"]);
    let figure = doc.children(doc.root())[0];
    assert_eq!(
        doc.kind(figure),
        &NodeKind::CaptionFigure {
            id: Some("fig".to_string())
        }
    );
    assert_eq!(child_names(&doc, figure), ["Paragraph", "Caption"]);
    assert_eq!(paragraph_text(&doc).as_deref(), Some("![a](b.png)"));
}

#[test]
fn figure_block_without_caption() {
    let doc = parse_mmark("!---\none\n\ntwo\n!---\n\nafter\n");
    assert_eq!(block_names(&doc), ["CaptionFigure", "Paragraph"]);
    let figure = doc.children(doc.root())[0];
    assert_eq!(child_names(&doc, figure), ["Paragraph", "Paragraph"]);
    assert_eq!(doc.kind(figure), &NodeKind::CaptionFigure { id: None });
}

#[test]
fn closing_fence_must_match_length() {
    // The four-dash line is content; without a closer there is no figure.
    let doc = parse_mmark("!---\nbody\n!----\n");
    assert!(find_first(&doc, "CaptionFigure").is_none());
}

#[test]
fn figure_interrupts_paragraph() {
    let doc = parse_mmark("text\n!---\nbody\n!---\n");
    assert_eq!(block_names(&doc), ["Paragraph", "CaptionFigure"]);
}

#[test]
fn figures_need_mmark() {
    let doc = parse_blocks("!---\nbody\n!---\n");
    assert!(find_first(&doc, "CaptionFigure").is_none());
}
