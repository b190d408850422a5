//! Index-addressed view of a parsed HTML document
//!
//! The heuristics in this crate only ever need three things from markup:
//! walking up to a node's parent, reading the text below a node and reading
//! an element's attributes. `PageTree` flattens a `scraper` document into a
//! vector of nodes in document order and answers those queries by index.

use scraper::{Html, Node};
use std::collections::HashMap;

/// Position of a node inside a [`PageTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(usize);

impl NodeIdx {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    /// Document root, comments, doctypes and text inside `<script>`/`<style>`
    Other,
}

#[derive(Debug, Clone)]
struct TreeNode {
    parent: Option<NodeIdx>,
    /// One past the last node of this node's subtree
    end: usize,
    kind: NodeKind,
}

/// A parsed page, stored as a flat pre-order node list
///
/// Node 0 is the document root. Because nodes are stored in document order,
/// the subtree of node `i` is the contiguous range `i..end(i)`.
#[derive(Debug, Clone)]
pub struct PageTree {
    nodes: Vec<TreeNode>,
}

impl PageTree {
    /// Parses markup into a tree
    ///
    /// Parsing is lenient: malformed markup still yields a tree, possibly an
    /// empty one.
    pub fn parse(markup: &str) -> Self {
        Self::from_html(&Html::parse_document(markup))
    }

    /// Flattens an already parsed `scraper` document
    pub fn from_html(document: &Html) -> Self {
        let mut positions = HashMap::new();
        let mut nodes: Vec<TreeNode> = Vec::new();
        let mut last_child: Vec<Option<usize>> = Vec::new();

        for node in document.tree.root().descendants() {
            let idx = nodes.len();
            positions.insert(node.id(), idx);

            let parent = node
                .parent()
                .and_then(|p| positions.get(&p.id()).copied());

            let kind = match node.value() {
                Node::Element(element) => NodeKind::Element {
                    name: element.name().to_ascii_lowercase(),
                    attrs: element
                        .attrs()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                },
                Node::Text(text) => {
                    let hidden = parent
                        .map(|p| is_hidden_container(&nodes[p].kind))
                        .unwrap_or(false);
                    if hidden {
                        NodeKind::Other
                    } else {
                        NodeKind::Text(String::from(&**text))
                    }
                }
                _ => NodeKind::Other,
            };

            if let Some(p) = parent {
                last_child[p] = Some(idx);
            }
            nodes.push(TreeNode {
                parent: parent.map(NodeIdx),
                end: idx + 1,
                kind,
            });
            last_child.push(None);
        }

        // Children always follow their parent, so a reverse pass sees every
        // child's final `end` before the parent's.
        for idx in (0..nodes.len()).rev() {
            if let Some(child) = last_child[idx] {
                nodes[idx].end = nodes[child].end;
            }
        }

        Self { nodes }
    }

    /// The document root
    pub fn root(&self) -> NodeIdx {
        NodeIdx(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.nodes.get(idx.0).and_then(|n| n.parent)
    }

    /// Lowercase tag name, or `None` for non-element nodes
    pub fn tag_name(&self, idx: NodeIdx) -> Option<&str> {
        match &self.nodes.get(idx.0)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Value of an attribute on an element node
    pub fn attr(&self, idx: NodeIdx, attr_name: &str) -> Option<&str> {
        match &self.nodes.get(idx.0)?.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(attr_name))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// All nodes strictly below `idx`, in document order
    pub fn descendants(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        let end = self.nodes.get(idx.0).map(|n| n.end).unwrap_or(idx.0);
        (idx.0 + 1..end).map(NodeIdx)
    }

    /// Every element with the given tag name, in document order
    pub fn elements_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = NodeIdx> + 'a {
        (0..self.nodes.len())
            .map(NodeIdx)
            .filter(move |&idx| self.tag_name(idx) == Some(tag))
    }

    /// Concatenation of every text run below `idx`, unmodified
    pub fn text(&self, idx: NodeIdx) -> String {
        self.text_runs(idx).collect()
    }

    /// Concatenation of every text run below `idx`, each trimmed, empty
    /// runs skipped
    pub fn stripped_text(&self, idx: NodeIdx) -> String {
        self.text_runs(idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn text_runs(&self, idx: NodeIdx) -> impl Iterator<Item = &str> + '_ {
        let own = self.nodes.get(idx.0).into_iter();
        let below = self.descendants(idx).map(move |d| &self.nodes[d.0]);
        own.chain(below).filter_map(|node| match &node.kind {
            NodeKind::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Ancestors of `idx`, nearest first, ending at the document root
    pub fn ancestors(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        std::iter::successors(self.parent(idx), move |&n| self.parent(n))
    }

    /// Finds the nearest ancestor of `start` satisfying `predicate`
    ///
    /// At most `max_levels` ancestors are examined, starting with the
    /// immediate parent.
    pub fn find_ancestor<P>(
        &self,
        start: NodeIdx,
        max_levels: usize,
        mut predicate: P,
    ) -> Option<NodeIdx>
    where
        P: FnMut(NodeIdx) -> bool,
    {
        self.ancestors(start).take(max_levels).find(|&n| predicate(n))
    }
}

fn is_hidden_container(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::Element { name, .. } if name == "script" || name == "style")
}
