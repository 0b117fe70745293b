//! Block-level parser for Markdown with the Mmark document extensions.
//!
//! The parser splits input into block constructs (headings, paragraphs,
//! lists, quotes, code, tables, figures, ...) and builds an arena
//! [`Document`]. Span-level markup is left to an [`InlineProcessor`].

pub mod ast;
pub mod hooks;
pub mod options;
pub mod parser;
pub mod references;

pub use ast::{Attribute, Document, Node, NodeId, NodeKind};
pub use hooks::{BlockHook, HookBlock, IncludeResolver, InlineProcessor};
pub use options::{DEFAULT_MAX_NESTING, Extensions, Flavor, ParserOptions};
pub use parser::{BlockParser, parse, sanitize_heading_id};
pub use references::ReferenceRegistry;
