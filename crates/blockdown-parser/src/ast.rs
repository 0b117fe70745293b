//! Document tree produced by the block parser.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. Every node except the root has exactly one parent; the parent
//! link is kept for tree walks only; children are owned by the parent's
//! `children` list.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::references::ReferenceRegistry;

/// Stable index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Block attributes staged by a `{#id .class key="value"}` line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Attribute {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ListType {
    Unordered,
    Ordered,
    Definition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Heading {
    /// 1 to 6
    pub level: usize,
    pub id: Option<String>,
    /// The id was derived from the text rather than written as `{#id}`.
    pub auto_id: bool,
    /// `.# Abstract` style heading.
    pub is_special: bool,
    /// Produced by a `%` title block.
    pub is_titleblock: bool,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct List {
    pub list_type: ListType,
    pub tight: bool,
    /// Explicit start number; 0 when not recorded.
    pub start: usize,
    pub delimiter: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ListItem {
    pub list_type: ListType,
    pub bullet: char,
    pub delimiter: char,
    pub begins_list: bool,
    pub ends_list: bool,
    /// Body was parsed as block content rather than one inline paragraph.
    pub contains_block: bool,
    /// Definition list term (as opposed to a `:` definition).
    pub is_term: bool,
    /// The item's source ended with a blank line before its next sibling.
    pub ends_with_blank_line: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CodeBlock {
    pub is_fenced: bool,
    pub info: String,
    pub literal: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Matter {
    Front,
    Main,
    Back,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Alignment {
    #[default]
    Default,
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TableCell {
    pub is_header: bool,
    pub align: Alignment,
    /// Number of columns spanned; 0 for an ordinary cell.
    pub colspan: usize,
    pub content: String,
}

/// A node produced by a caller-supplied block hook.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CustomBlock {
    pub name: String,
    pub literal: String,
    /// Whether block content may be nested below this node.
    pub container: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum NodeKind {
    Document,
    Heading(Heading),
    Paragraph { content: String },
    List(List),
    ListItem(ListItem),
    BlockQuote,
    Aside,
    CodeBlock(CodeBlock),
    HorizontalRule { literal: String },
    HtmlBlock { literal: String },
    MathBlock { literal: String },
    DocumentMatter { matter: Matter },
    Table,
    TableHeader,
    TableBody,
    TableFooter,
    TableRow,
    TableCell(TableCell),
    CaptionFigure { id: Option<String> },
    Caption { content: String },
    Custom(CustomBlock),
}

impl NodeKind {
    /// Short variant name used in outlines and logs.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Heading(_) => "Heading",
            NodeKind::Paragraph { .. } => "Paragraph",
            NodeKind::List(_) => "List",
            NodeKind::ListItem(_) => "ListItem",
            NodeKind::BlockQuote => "BlockQuote",
            NodeKind::Aside => "Aside",
            NodeKind::CodeBlock(_) => "CodeBlock",
            NodeKind::HorizontalRule { .. } => "HorizontalRule",
            NodeKind::HtmlBlock { .. } => "HtmlBlock",
            NodeKind::MathBlock { .. } => "MathBlock",
            NodeKind::DocumentMatter { .. } => "DocumentMatter",
            NodeKind::Table => "Table",
            NodeKind::TableHeader => "TableHeader",
            NodeKind::TableBody => "TableBody",
            NodeKind::TableFooter => "TableFooter",
            NodeKind::TableRow => "TableRow",
            NodeKind::TableCell(_) => "TableCell",
            NodeKind::CaptionFigure { .. } => "CaptionFigure",
            NodeKind::Caption { .. } => "Caption",
            NodeKind::Custom(_) => "Custom",
        }
    }

    pub fn is_container(&self) -> bool {
        match self {
            NodeKind::Document
            | NodeKind::List(_)
            | NodeKind::ListItem(_)
            | NodeKind::BlockQuote
            | NodeKind::Aside
            | NodeKind::Table
            | NodeKind::TableHeader
            | NodeKind::TableBody
            | NodeKind::TableFooter
            | NodeKind::TableRow
            | NodeKind::CaptionFigure { .. }
            | NodeKind::Caption { .. } => true,
            NodeKind::Custom(custom) => custom.container,
            _ => false,
        }
    }

    /// Whether a node of this kind accepts `child` as a direct child while
    /// the tree is being built.
    pub fn can_contain(&self, child: &NodeKind) -> bool {
        let child_is_item = matches!(child, NodeKind::ListItem(_));
        match self {
            NodeKind::List(_) => child_is_item,
            NodeKind::Document
            | NodeKind::BlockQuote
            | NodeKind::Aside
            | NodeKind::ListItem(_)
            | NodeKind::CaptionFigure { .. } => !child_is_item,
            NodeKind::Table => matches!(
                child,
                NodeKind::TableHeader | NodeKind::TableBody | NodeKind::TableFooter
            ),
            NodeKind::TableHeader | NodeKind::TableBody | NodeKind::TableFooter => {
                matches!(child, NodeKind::TableRow)
            }
            NodeKind::TableRow => matches!(child, NodeKind::TableCell(_)),
            NodeKind::Custom(custom) => custom.container && !child_is_item,
            _ => false,
        }
    }

    /// Raw text awaiting span-level processing, if this node carries any.
    pub fn inline_text(&self) -> Option<&str> {
        match self {
            NodeKind::Paragraph { content }
            | NodeKind::Caption { content }
            | NodeKind::Heading(Heading { content, .. })
            | NodeKind::TableCell(TableCell { content, .. }) => Some(content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub attribute: Option<Attribute>,
}

/// The parsed document: an arena of nodes rooted at a `Document` node, plus
/// the link reference and footnote definitions found along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
    references: ReferenceRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
                attribute: None,
            }],
            references: ReferenceRegistry::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.last().copied()
    }

    pub fn attribute(&self, id: NodeId) -> Option<&Attribute> {
        self.nodes[id.0].attribute.as_ref()
    }

    /// Number of ancestors between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            depth += 1;
            cur = self.parent(p);
        }
        depth
    }

    /// Pre-order walk starting at (and including) `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    pub fn references(&self) -> &ReferenceRegistry {
        &self.references
    }

    pub(crate) fn references_mut(&mut self) -> &mut ReferenceRegistry {
        &mut self.references
    }

    /// Create a node as the last child of `parent`.
    pub(crate) fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            attribute: None,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Put a new container in `node`'s place and move `node` under it.
    pub(crate) fn wrap(&mut self, node: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.nodes[node.0].parent;
        self.nodes.push(Node {
            kind,
            parent,
            children: vec![node],
            attribute: None,
        });
        if let Some(p) = parent
            && let Some(slot) = self.nodes[p.0].children.iter_mut().find(|c| **c == node)
        {
            *slot = id;
        }
        self.nodes[node.0].parent = Some(id);
        id
    }

    /// Nested, serializable view of the tree below `id`.
    #[cfg(feature = "serde")]
    pub fn to_tree(&self, id: NodeId) -> TreeNode<'_> {
        let node = self.node(id);
        TreeNode {
            kind: &node.kind,
            attribute: node.attribute.as_ref(),
            children: node.children.iter().map(|c| self.to_tree(*c)).collect(),
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, indent: usize) -> fmt::Result {
        let node = self.node(id);
        write!(f, "{:width$}{}", "", node.kind.name(), width = indent * 2)?;
        match &node.kind {
            NodeKind::Heading(h) => {
                write!(f, " level={}", h.level)?;
                if let Some(id) = &h.id {
                    write!(f, " id={id:?}")?;
                }
                if h.is_special {
                    write!(f, " special")?;
                }
                if h.is_titleblock {
                    write!(f, " titleblock")?;
                }
                write!(f, " {:?}", h.content)?;
            }
            NodeKind::Paragraph { content } | NodeKind::Caption { content } => {
                write!(f, " {content:?}")?;
            }
            NodeKind::List(l) => {
                write!(f, " {:?}", l.list_type)?;
                write!(f, " {}", if l.tight { "tight" } else { "loose" })?;
                if l.start > 0 {
                    write!(f, " start={} delim={:?}", l.start, l.delimiter)?;
                }
            }
            NodeKind::ListItem(item) => {
                if item.is_term {
                    write!(f, " term")?;
                } else if item.list_type == ListType::Ordered {
                    write!(f, " {:?}", item.delimiter)?;
                } else if item.list_type == ListType::Unordered {
                    write!(f, " {:?}", item.bullet)?;
                }
            }
            NodeKind::CodeBlock(code) => {
                write!(f, " fenced={} info={:?} {:?}", code.is_fenced, code.info, code.literal)?;
            }
            NodeKind::HorizontalRule { literal }
            | NodeKind::HtmlBlock { literal }
            | NodeKind::MathBlock { literal } => write!(f, " {literal:?}")?,
            NodeKind::DocumentMatter { matter } => write!(f, " {matter:?}")?,
            NodeKind::TableCell(cell) => {
                if cell.is_header {
                    write!(f, " header")?;
                }
                if cell.align != Alignment::Default {
                    write!(f, " {:?}", cell.align)?;
                }
                if cell.colspan > 0 {
                    write!(f, " colspan={}", cell.colspan)?;
                }
                write!(f, " {:?}", cell.content)?;
            }
            NodeKind::CaptionFigure { id: Some(id) } => write!(f, " id={id:?}")?,
            NodeKind::Custom(custom) => write!(f, " {} {:?}", custom.name, custom.literal)?,
            _ => {}
        }
        if let Some(attr) = &node.attribute {
            write!(f, " {attr:?}")?;
        }
        writeln!(f)?;
        for child in &node.children {
            self.fmt_node(f, *child, indent + 1)?;
        }
        Ok(())
    }
}

/// Indented outline, one node per line.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root(), 0)
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(feature = "serde")]
#[derive(Debug, Serialize)]
pub struct TreeNode<'a> {
    #[serde(flatten)]
    pub kind: &'a NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<&'a Attribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode<'a>>,
}
