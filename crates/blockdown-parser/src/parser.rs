//! Block parser entry points.

use crate::ast::Document;
use crate::options::ParserOptions;

pub mod block_parser;

pub use block_parser::{BlockParser, sanitize_heading_id};

/// Parses a document with no collaborators attached.
///
/// # Examples
///
/// ```rust
/// use blockdown_parser::{ParserOptions, parse};
///
/// let doc = parse("# Title\n\nSome text.\n", ParserOptions::default());
/// println!("{doc}");
/// ```
pub fn parse(input: &str, options: ParserOptions) -> Document {
    BlockParser::new(options).parse(input)
}
