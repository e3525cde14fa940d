//! Arena-backed chain of resolution nodes.
//!
//! A [`Chain`] owns its nodes in a `Vec` and links them with [`NodeId`]s, so a
//! node refers to its predecessor without owning it. The root node is always
//! at index 0 and holds the full document; every other node is appended after
//! its predecessor.

use crate::{
    selector::Selector,
    value::Value,
};

/// Index of a node inside its [`Chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Where a resolved value lives inside the previous node's value.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Key(String),
    Index(usize),
}

/// One resolution step.
#[derive(Debug, Clone)]
pub struct Node {
    pub selector: Selector,
    /// Resolved value. `None` until resolved, or when the step produced nothing.
    pub value: Option<Value>,
    /// Position of `value` inside the previous value, set by the resolver
    pub location: Option<Location>,
    previous: Option<NodeId>,
    next: Option<NodeId>,
}

impl Node {
    fn new(selector: Selector, value: Option<Value>, previous: Option<NodeId>) -> Self {
        Node {
            selector,
            value,
            location: None,
            previous,
            next: None,
        }
    }

    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }
}

/// The path from the document root to the addressed value.
#[derive(Debug, Clone)]
pub struct Chain {
    nodes: Vec<Node>,
}

impl Chain {
    /// Create a chain holding only the root node, seeded with `document`.
    pub fn new(document: Value) -> Self {
        Chain {
            nodes: vec![Node::new(Selector::root(), Some(document), None)],
        }
    }

    /// Create a chain and append every selector in order.
    pub fn with_selectors(document: Value, selectors: impl IntoIterator<Item = Selector>) -> Self {
        let mut chain = Chain::new(document);
        for selector in selectors {
            chain.push(selector);
        }
        chain
    }

    /// Append a step after the current terminal node.
    pub fn push(&mut self, selector: Selector) -> NodeId {
        let previous = self.terminal();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(selector, None, Some(previous)));
        self.nodes[previous.0].next = Some(id);
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn terminal(&self) -> NodeId {
        NodeId(self.nodes.len() - 1)
    }

    /// Number of nodes including the root.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Node ids from the root to the terminal, following `next` links.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(self.root()), |id| self.node(*id).next)
    }

    /// The current document held by the root node.
    pub fn document(&self) -> Option<&Value> {
        self.nodes[0].value.as_ref()
    }

    pub fn into_document(mut self) -> Value {
        self.nodes.swap_remove(0).value.unwrap_or(Value::Null)
    }

    /// Borrow a node mutably together with its predecessor.
    ///
    /// Returns `None` for the root node.
    pub fn with_previous_mut(&mut self, id: NodeId) -> Option<(&mut Node, &mut Node)> {
        let previous = self.nodes[id.0].previous?;
        // predecessors are always pushed first
        let (head, tail) = self.nodes.split_at_mut(id.0);
        Some((&mut head[previous.0], &mut tail[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::SelectorKind;

    #[test]
    fn test_links() {
        let mut chain = Chain::new(Value::empty_object());
        let a = chain.push(Selector::new(".a", SelectorKind::Property("a".into())));
        let b = chain.push(Selector::new(".[0]", SelectorKind::Index(0)));

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.node(chain.root()).previous(), None);
        assert_eq!(chain.node(chain.root()).next(), Some(a));
        assert_eq!(chain.node(a).previous(), Some(chain.root()));
        assert_eq!(chain.node(a).next(), Some(b));
        assert_eq!(chain.node(b).next(), None);
        assert_eq!(chain.terminal(), b);
        assert_eq!(chain.ids().collect::<Vec<_>>(), vec![chain.root(), a, b]);
    }

    #[test]
    fn test_root_has_no_previous() {
        let mut chain = Chain::new(Value::Null);
        let root = chain.root();
        assert!(chain.with_previous_mut(root).is_none());
        assert_eq!(chain.document(), Some(&Value::Null));
    }
}
