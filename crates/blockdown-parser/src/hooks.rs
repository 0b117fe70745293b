//! Collaborators the block parser calls out to.
//!
//! None of these are required: without an include resolver transclusions
//! expand to nothing, without a block hook only built-in recognizers run, and
//! without an inline processor block text is left as raw content.

use crate::ast::{Document, NodeId, NodeKind};

/// Span-level processing of the raw text stored on paragraphs, headings,
/// table cells and captions. Called once per node, in document order, after
/// the block pass has finished.
pub trait InlineProcessor {
    fn inline(&mut self, doc: &Document, node: NodeId, text: &str);
}

/// Supplies the bytes of a transcluded file.
///
/// `from` is the directory of the file currently being included (innermost
/// include), if any; relative paths resolve against it.
/// `address` is the opaque `[...]` selector written after the directive.
/// Failures must be reported as an empty buffer.
pub trait IncludeResolver {
    fn read_include(&mut self, from: Option<&str>, path: &str, address: Option<&str>) -> Vec<u8>;
}

/// What a block hook claimed from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookBlock {
    /// Node to attach; `None` drops the claimed bytes.
    pub node: Option<NodeKind>,
    /// Content to parse as blocks below `node`.
    pub content: Option<Vec<u8>>,
    /// Bytes consumed from the input, must be greater than zero.
    pub consumed: usize,
}

/// Caller-supplied recognizer tried before every built-in one.
pub trait BlockHook {
    fn parse_block(&mut self, data: &[u8]) -> Option<HookBlock>;
}

impl<T: InlineProcessor + ?Sized> InlineProcessor for &mut T {
    fn inline(&mut self, doc: &Document, node: NodeId, text: &str) {
        (**self).inline(doc, node, text)
    }
}

impl<F> BlockHook for F
where
    F: FnMut(&[u8]) -> Option<HookBlock>,
{
    fn parse_block(&mut self, data: &[u8]) -> Option<HookBlock> {
        self(data)
    }
}

impl<F> IncludeResolver for F
where
    F: FnMut(Option<&str>, &str, Option<&str>) -> Vec<u8>,
{
    fn read_include(&mut self, from: Option<&str>, path: &str, address: Option<&str>) -> Vec<u8> {
        self(from, path, address)
    }
}
