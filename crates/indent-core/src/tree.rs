//! The decision tree.
//!
//! Nodes live in an arena and refer to their children by [`NodeId`], so one subtree can be
//! wired under several parents. [`TreeBuilder`] only hands out ids of nodes that already exist
//! and a question may only point at such ids, which keeps every assembled tree acyclic.

use crate::action::Action;
use crate::document::Document;
use crate::indenter::IndentReason;
use crate::question::Question;
use crate::trace::{Direction, Trace};

/// Handle of a node inside an [`IndentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Branch on a question.
    Question {
        /// The predicate.
        question: Question,
        /// Followed when the question answers yes.
        yes: NodeId,
        /// Followed when the question answers no.
        no: NodeId,
    },
    /// Terminal edit.
    Action(Action),
}

impl Node {
    /// Rule name of the question or action.
    pub fn name(&self) -> &'static str {
        match self {
            Node::Question { question, .. } => question.name(),
            Node::Action(action) => action.name(),
        }
    }
}

/// An assembled, immutable decision tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl IndentTree {
    /// A tree made of a single action.
    pub fn single(action: Action) -> Self {
        let mut builder = TreeBuilder::new();
        let root = builder.action(action);
        builder.build(root)
    }

    /// Entry node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node. Ids from another tree may be out of range.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of distinct nodes (shared nodes count once).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a built tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk from the root to an action for the line containing `pos` and apply it.
    ///
    /// Returns the action's "caller moves the cursor" signal.
    pub fn evaluate(
        &self,
        doc: &mut Document,
        pos: usize,
        reason: IndentReason,
        trace: &mut Trace,
    ) -> bool {
        let mut id = self.root;
        loop {
            match &self.nodes[id.0] {
                Node::Question { question, yes, no } => {
                    let (direction, next) = if question.evaluate(doc, pos, reason) {
                        (Direction::Yes, *yes)
                    } else {
                        (Direction::No, *no)
                    };
                    tracing::trace!(rule = question.name(), decision = direction.as_str());
                    trace.record(question.name(), direction);
                    id = next;
                }
                Node::Action(action) => {
                    tracing::trace!(rule = action.name(), pos, "applying action");
                    trace.record(action.name(), Direction::Terminal);
                    return action.apply(doc, pos, reason);
                }
            }
        }
    }
}

/// Incremental constructor for [`IndentTree`]. Children are added before their parents.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a terminal action.
    pub fn action(&mut self, action: Action) -> NodeId {
        self.push(Node::Action(action))
    }

    /// Add a question branching to two existing nodes.
    ///
    /// # Panics
    ///
    /// Panics if `yes` or `no` was not returned by this builder.
    pub fn question(&mut self, question: Question, yes: NodeId, no: NodeId) -> NodeId {
        for child in [yes, no] {
            assert!(
                child.0 < self.nodes.len(),
                "node {} does not exist in this builder",
                child.0
            );
        }
        self.push(Node::Question { question, yes, no })
    }

    /// Finish the tree.
    ///
    /// # Panics
    ///
    /// Panics if `root` was not returned by this builder.
    pub fn build(self, root: NodeId) -> IndentTree {
        assert!(
            root.0 < self.nodes.len(),
            "root node {} does not exist in this builder",
            root.0
        );
        IndentTree {
            nodes: self.nodes,
            root,
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}
