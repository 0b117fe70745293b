use crate::ast::{Attribute, Document, ListType, NodeId, NodeKind};
use crate::hooks::{BlockHook, IncludeResolver, InlineProcessor};
use crate::options::{Extensions, ParserOptions};

mod attributes;
mod blockquotes;
mod code_blocks;
mod container_stack;
mod display_math;
mod figures;
mod headings;
mod horizontal_rules;
mod html_blocks;
mod includes;
mod lists;
mod metadata;
mod paragraphs;
mod reference_definitions;
mod tables;
pub(crate) mod utils;

use blockquotes::{aside_prefix, quote_prefix};
use container_stack::ContainerStack;
use horizontal_rules::is_hrule;
use lists::{oli_prefix, uli_prefix};
use utils::{code_prefix, empty_line_len, line_end};

pub use headings::sanitize_heading_id;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Block-level parser. Recognizers run in a fixed priority order over the
/// remaining input; each returns how many bytes it consumed, 0 meaning "not
/// mine". Containers recurse into [`BlockParser::block`] with their inner
/// content, bounded by the nesting cap.
pub struct BlockParser<'a> {
    extensions: Extensions,
    max_nesting: usize,
    nesting: usize,
    doc: Document,
    containers: ContainerStack,
    /// Attribute staged by an attribute line, consumed by the next block.
    pending_attribute: Option<Attribute>,
    /// Paths of the includes currently being expanded, innermost last.
    include_stack: Vec<String>,
    /// Headings whose id was derived from their text, in document order.
    auto_id_headings: Vec<NodeId>,
    include_resolver: Option<Box<dyn IncludeResolver + 'a>>,
    block_hook: Option<Box<dyn BlockHook + 'a>>,
    inline_processor: Option<Box<dyn InlineProcessor + 'a>>,
}

impl<'a> BlockParser<'a> {
    pub fn new(options: ParserOptions) -> Self {
        let doc = Document::new();
        let containers = ContainerStack::new(doc.root());
        Self {
            extensions: options.extensions,
            max_nesting: options.max_nesting,
            nesting: 0,
            doc,
            containers,
            pending_attribute: None,
            include_stack: Vec::new(),
            auto_id_headings: Vec::new(),
            include_resolver: None,
            block_hook: None,
            inline_processor: None,
        }
    }

    pub fn with_include_resolver(mut self, resolver: impl IncludeResolver + 'a) -> Self {
        self.include_resolver = Some(Box::new(resolver));
        self
    }

    pub fn with_block_hook(mut self, hook: impl BlockHook + 'a) -> Self {
        self.block_hook = Some(Box::new(hook));
        self
    }

    pub fn with_inline_processor(mut self, processor: impl InlineProcessor + 'a) -> Self {
        self.inline_processor = Some(Box::new(processor));
        self
    }

    /// Parse a whole document. Line endings are normalized to `\n` and a
    /// final newline is added when missing.
    pub fn parse(mut self, input: &str) -> Document {
        #[cfg(debug_assertions)]
        {
            init_logger();
        }

        let mut input = input.replace("\r\n", "\n");
        if !input.is_empty() && !input.ends_with('\n') {
            input.push('\n');
        }

        self.block(input.as_bytes());
        self.containers.close_all();
        self.finalize_heading_ids();
        self.process_inline();

        log::debug!("parsed {} nodes", self.doc.len());
        self.doc
    }

    /// Parse `data` as a sequence of blocks below the current tip.
    pub(crate) fn block(&mut self, mut data: &[u8]) {
        if self.nesting >= self.max_nesting {
            log::warn!(
                "nesting limit {} reached, dropping {} bytes of nested content",
                self.max_nesting,
                data.len()
            );
            return;
        }
        self.nesting += 1;

        while !data.is_empty() {
            if self.extensions.attributes {
                data = self.attribute(data);
                if data.is_empty() {
                    break;
                }
            }

            if self.extensions.includes {
                let consumed = self.include(data);
                if consumed > 0 {
                    data = &data[consumed.min(data.len())..];
                    continue;
                }
            }

            let consumed = self.try_block_hook(data);
            if consumed > 0 {
                data = &data[consumed..];
                continue;
            }

            let mut consumed = self.dispatch(data);
            if consumed == 0 {
                // Never stall: give the line to nobody rather than loop.
                consumed = line_end(data, 0);
            }
            data = &data[consumed.min(data.len())..];
        }

        self.nesting -= 1;
    }

    /// Try each built-in recognizer in priority order.
    fn dispatch(&mut self, data: &[u8]) -> usize {
        if self.is_prefix_heading(data) {
            let n = self.prefix_heading(data);
            if n > 0 {
                return n;
            }
        }

        if self.is_prefix_special_heading(data) {
            let n = self.prefix_special_heading(data);
            if n > 0 {
                return n;
            }
        }

        if data[0] == b'<' {
            let n = self.html(data, true);
            if n > 0 {
                return n;
            }
        }

        if self.extensions.titleblock && data[0] == b'%' {
            let n = self.title_block(data);
            if n > 0 {
                return n;
            }
        }

        let n = empty_line_len(data);
        if n > 0 {
            return n;
        }

        if code_prefix(data) > 0 {
            return self.code(data);
        }

        if self.extensions.fenced_code {
            let n = self.fenced_code_block(data);
            if n > 0 {
                return n;
            }
        }

        if is_hrule(data) {
            return self.hrule(data);
        }

        if quote_prefix(data) > 0 {
            return self.quote(data);
        }

        if self.extensions.mmark {
            if aside_prefix(data) > 0 {
                return self.aside(data);
            }
            let n = self.figure_block(data);
            if n > 0 {
                return n;
            }
        }

        if self.extensions.tables {
            let n = self.table(data);
            if n > 0 {
                return n;
            }
        }

        if uli_prefix(data) > 0 {
            return self.list(data, ListType::Unordered, 0, '.');
        }

        let i = oli_prefix(data);
        if i > 0 {
            let (start, delimiter) = self.ordered_list_start(&data[..i]);
            return self.list(data, ListType::Ordered, start, delimiter);
        }

        if self.dli_prefix(data) > 0 {
            return self.list(data, ListType::Definition, 0, '.');
        }

        if self.extensions.math_jax {
            let n = self.block_math(data);
            if n > 0 {
                return n;
            }
        }

        if self.extensions.mmark {
            let n = self.document_matter(data);
            if n > 0 {
                return n;
            }
        }

        self.paragraph(data)
    }

    fn try_block_hook(&mut self, data: &[u8]) -> usize {
        let Some(hook) = self.block_hook.as_mut() else {
            return 0;
        };
        let Some(claimed) = hook.parse_block(data) else {
            return 0;
        };
        if claimed.consumed == 0 {
            return 0;
        }
        let consumed = claimed.consumed.min(data.len());
        if let Some(kind) = claimed.node {
            log::debug!("block hook claimed {consumed} bytes as {}", kind.name());
            let node = self.add_block(kind);
            if let Some(content) = claimed.content {
                self.block(&content);
                self.finalize(node);
            }
        }
        consumed
    }

    /// Attach a new block at the tip, giving it any staged attribute.
    pub(crate) fn add_block(&mut self, kind: NodeKind) -> NodeId {
        let id = self.add_child(kind);
        if let Some(attr) = self.pending_attribute.take() {
            self.doc.node_mut(id).attribute = Some(attr);
        }
        id
    }

    /// Close open nodes until one accepts `kind`, then append and open it.
    pub(crate) fn add_child(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.containers.close_until_accepts(&self.doc, &kind);
        let id = self.doc.append(parent, kind);
        self.containers.push(id);
        id
    }

    /// Close `id`; the tip becomes its parent.
    pub(crate) fn finalize(&mut self, id: NodeId) {
        self.containers.close(id);
    }

    fn process_inline(&mut self) {
        let Some(processor) = self.inline_processor.as_mut() else {
            return;
        };
        for id in self.doc.descendants(self.doc.root()) {
            if let Some(text) = self.doc.kind(id).inline_text() {
                processor.inline(&self.doc, id, text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    mod attributes;
    mod blockquotes;
    mod code_blocks;
    mod figures;
    mod headings;
    mod helpers;
    mod hooks;
    mod html_blocks;
    mod includes;
    mod lists;
    mod metadata;
    mod nesting;
    mod paragraphs;
    mod reference_definitions;
    mod tables;
    mod tree_shape;
}
