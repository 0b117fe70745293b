use super::helpers::*;
use crate::options::{DEFAULT_MAX_NESTING, ParserOptions};
use crate::parser::block_parser::BlockParser;

#[test]
fn nesting_cap_drops_deeper_content() {
    let doc = BlockParser::new(ParserOptions::default().max_nesting(3)).parse("> > > > > deep\n");
    assert_eq!(find_all(&doc, "BlockQuote").len(), 3);
    assert!(find_first(&doc, "Paragraph").is_none());
}

#[test]
fn content_within_the_cap_is_kept() {
    let doc = parse_blocks("> > > > > deep\n");
    assert_eq!(find_all(&doc, "BlockQuote").len(), 5);
    assert_eq!(paragraph_text(&doc).as_deref(), Some("deep"));
}

#[test]
fn pathological_nesting_is_bounded() {
    let input = format!("{}deep\n", "> ".repeat(1000));
    let doc = parse_blocks(&input);
    assert_eq!(find_all(&doc, "BlockQuote").len(), DEFAULT_MAX_NESTING);
}

#[test]
fn nested_lists_are_bounded_too() {
    let input: String = (0..40)
        .map(|depth| format!("{}- item\n", "    ".repeat(depth)))
        .collect();
    let doc = parse_blocks(&input);
    assert!(find_all(&doc, "List").len() <= DEFAULT_MAX_NESTING);
}
