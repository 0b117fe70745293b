use crate::ast::{Document, NodeId, NodeKind};

/// Open containers, innermost last. The last entry is the tip: the node new
/// blocks are attached to. The document root is never closed.
pub(crate) struct ContainerStack {
    stack: Vec<NodeId>,
}

impl ContainerStack {
    pub(crate) fn new(root: NodeId) -> Self {
        Self { stack: vec![root] }
    }

    pub(crate) fn tip(&self) -> NodeId {
        // The root is pushed at construction and never popped.
        self.stack[self.stack.len() - 1]
    }

    pub(crate) fn push(&mut self, id: NodeId) {
        self.stack.push(id);
    }

    /// Close containers from the top down until the tip accepts `kind`.
    pub(crate) fn close_until_accepts(&mut self, doc: &Document, kind: &NodeKind) -> NodeId {
        while self.stack.len() > 1 && !doc.kind(self.tip()).can_contain(kind) {
            self.stack.pop();
        }
        if !doc.kind(self.tip()).can_contain(kind) {
            log::warn!("{} attached to the document root", kind.name());
        }
        self.tip()
    }

    /// Close `id` and everything opened after it. No-op if already closed.
    pub(crate) fn close(&mut self, id: NodeId) {
        if let Some(pos) = self.stack.iter().rposition(|open| *open == id)
            && pos > 0
        {
            self.stack.truncate(pos);
        }
    }

    /// Close everything but the root.
    pub(crate) fn close_all(&mut self) {
        self.stack.truncate(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_pops_everything_above() {
        let mut doc = Document::new();
        let root = doc.root();
        let quote = doc.append(root, NodeKind::BlockQuote);
        let para = doc.append(quote, NodeKind::Paragraph { content: String::new() });
        let mut stack = ContainerStack::new(root);
        stack.push(quote);
        stack.push(para);
        stack.close(quote);
        assert_eq!(stack.tip(), root);
    }

    #[test]
    fn leaves_are_closed_before_attaching() {
        let mut doc = Document::new();
        let root = doc.root();
        let para = doc.append(root, NodeKind::Paragraph { content: String::new() });
        let mut stack = ContainerStack::new(root);
        stack.push(para);
        let parent = stack.close_until_accepts(&doc, &NodeKind::BlockQuote);
        assert_eq!(parent, root);
    }

    #[test]
    fn root_is_never_closed() {
        let doc = Document::new();
        let mut stack = ContainerStack::new(doc.root());
        stack.close(doc.root());
        stack.close_all();
        assert_eq!(stack.tip(), doc.root());
    }
}
