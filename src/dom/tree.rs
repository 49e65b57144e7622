//! Arena-backed document tree
//!
//! This module provides the live document tree that list virtualization and
//! region partitioning operate on, together with the structural primitives
//! they need: containment, ancestor lookup, wrap/unwrap, parent splitting
//! and node collapsing.
//!
//! # Design
//! Nodes live in a `Vec` arena and are addressed by `NodeId`. Detaching a
//! node never frees it, so ids stay valid for the lifetime of the
//! `Document` even while subtrees are moved around by an edit.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Node Identity and Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to a node inside a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the document arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element tags understood by the editing core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Document body (the editable root)
    Body,
    Div,
    P,
    /// Heading h1-h6
    Heading(u8),
    Blockquote,
    Pre,
    Hr,
    /// Ordered list container
    Ol,
    /// Unordered list container
    Ul,
    /// List item
    Li,
    Table,
    Tr,
    Td,
    Th,
    Span,
    Strong,
    Em,
    Del,
    Code,
    A,
    Br,
}

impl Tag {
    /// Lowercase HTML name of the tag.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Body => "body",
            Tag::Div => "div",
            Tag::P => "p",
            Tag::Heading(1) => "h1",
            Tag::Heading(2) => "h2",
            Tag::Heading(3) => "h3",
            Tag::Heading(4) => "h4",
            Tag::Heading(5) => "h5",
            Tag::Heading(_) => "h6",
            Tag::Blockquote => "blockquote",
            Tag::Pre => "pre",
            Tag::Hr => "hr",
            Tag::Ol => "ol",
            Tag::Ul => "ul",
            Tag::Li => "li",
            Tag::Table => "table",
            Tag::Tr => "tr",
            Tag::Td => "td",
            Tag::Th => "th",
            Tag::Span => "span",
            Tag::Strong => "strong",
            Tag::Em => "em",
            Tag::Del => "del",
            Tag::Code => "code",
            Tag::A => "a",
            Tag::Br => "br",
        }
    }

    /// Whether the tag lays out as a block.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Tag::Body
                | Tag::Div
                | Tag::P
                | Tag::Heading(_)
                | Tag::Blockquote
                | Tag::Pre
                | Tag::Hr
                | Tag::Ol
                | Tag::Ul
                | Tag::Li
                | Tag::Table
                | Tag::Tr
                | Tag::Td
                | Tag::Th
        )
    }

    /// Whether the tag is a list container (`ol` or `ul`).
    pub fn is_list(self) -> bool {
        matches!(self, Tag::Ol | Tag::Ul)
    }

    /// Whether the tag is a table cell (`td` or `th`).
    pub fn is_cell(self) -> bool {
        matches!(self, Tag::Td | Tag::Th)
    }

    /// Void elements never hold children.
    pub fn is_void(self) -> bool {
        matches!(self, Tag::Br | Tag::Hr)
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Tag),
    Text(String),
    /// Detached container whose children are spliced in when inserted
    Fragment,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    list_style: Option<String>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            list_style: None,
        }
    }
}

/// Where a node lies relative to another, in document order.
///
/// Returned by [`Document::relation`], which describes `other` as seen from
/// `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Same,
    /// `other` is an ancestor of `node`
    Contains,
    /// `other` is a descendant of `node`
    ContainedBy,
    /// `other` comes before `node` and is not its ancestor
    Preceding,
    /// `other` comes after `node` and is not its descendant
    Following,
    /// The two nodes live in different trees
    Disconnected,
}

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// A mutable document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding an empty `body`.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeKind::Element(Tag::Body))],
            root: NodeId(0),
        }
    }

    /// The `body` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────────

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: Tag) -> NodeId {
        self.alloc(NodeKind::Element(tag))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    /// Create an empty fragment.
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeKind::Fragment)
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: Tag) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    /// Copy a node without its children or position in the tree.
    pub fn clone_shallow(&mut self, id: NodeId) -> NodeId {
        let kind = self.data(id).kind.clone();
        let list_style = self.data(id).list_style.clone();
        let copy = self.alloc(kind);
        self.data_mut(copy).list_style = list_style;
        copy
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.data(id).kind
    }

    /// Tag of an element, `None` for text and fragments.
    pub fn tag(&self, id: NodeId) -> Option<Tag> {
        match self.data(id).kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    /// Whether `id` is an element with the given tag.
    pub fn is_element(&self, id: NodeId, tag: Tag) -> bool {
        self.tag(id) == Some(tag)
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.data(id).kind, NodeKind::Text(_))
    }

    /// Whether `id` is a block-level element.
    pub fn is_block(&self, id: NodeId) -> bool {
        self.tag(id).is_some_and(Tag::is_block)
    }

    /// Whether `id` is an `ol` or `ul`.
    pub fn is_list(&self, id: NodeId) -> bool {
        self.tag(id).is_some_and(Tag::is_list)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.data(id).kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Concatenated text of a subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut output = String::new();
        self.collect_text(id, &mut output);
        output
    }

    fn collect_text(&self, id: NodeId, output: &mut String) {
        if let NodeKind::Text(text) = &self.data(id).kind {
            output.push_str(text);
        }
        for &child in &self.data(id).children {
            self.collect_text(child, output);
        }
    }

    /// Length used by positions: characters for text, children otherwise.
    pub fn node_length(&self, id: NodeId) -> usize {
        match &self.data(id).kind {
            NodeKind::Text(text) => text.chars().count(),
            _ => self.data(id).children.len(),
        }
    }

    pub fn list_style(&self, id: NodeId) -> Option<&str> {
        self.data(id).list_style.as_deref()
    }

    pub fn set_list_style(&mut self, id: NodeId, style: Option<String>) {
        self.data_mut(id).list_style = style;
    }

    /// Change the tag of an element in place. Text nodes are left alone.
    pub fn set_tag(&mut self, id: NodeId, tag: Tag) {
        if let NodeKind::Element(current) = &mut self.data_mut(id).kind {
            *current = tag;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).children.first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).children.last().copied()
    }

    /// Index of `id` among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// All descendants of `id` (excluding `id`) in document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            result.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        result
    }

    /// Strict containment: `ancestor` is a proper ancestor of `node`.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Containment that treats a node as containing itself.
    pub fn contains_or_same(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.contains(ancestor, node)
    }

    /// Closest element at or above `node` matching `predicate`, without
    /// leaving `root` (`root` itself may match).
    pub fn closest_ancestor(
        &self,
        node: NodeId,
        root: NodeId,
        predicate: impl Fn(Tag) -> bool,
    ) -> Option<NodeId> {
        let mut current = if self.tag(node).is_some() {
            Some(node)
        } else {
            self.parent(node)
        };

        while let Some(id) = current {
            if !self.contains_or_same(root, id) {
                return None;
            }
            if self.tag(id).is_some_and(&predicate) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Path of child indexes from the topmost ancestor down to `id`.
    fn path(&self, id: NodeId) -> (NodeId, Vec<usize>) {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(self.index_in_parent(current).unwrap_or(0));
            current = parent;
        }
        path.reverse();
        (current, path)
    }

    /// Describe where `other` lies relative to `node`.
    pub fn relation(&self, node: NodeId, other: NodeId) -> Relation {
        if node == other {
            return Relation::Same;
        }

        let (node_top, node_path) = self.path(node);
        let (other_top, other_path) = self.path(other);
        if node_top != other_top {
            return Relation::Disconnected;
        }

        for (a, b) in node_path.iter().zip(other_path.iter()) {
            if a != b {
                return if b < a {
                    Relation::Preceding
                } else {
                    Relation::Following
                };
            }
        }

        if node_path.len() < other_path.len() {
            Relation::ContainedBy
        } else {
            Relation::Contains
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Remove a node from its parent. The node and its subtree stay alive.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.data(id).parent {
            self.data_mut(parent).children.retain(|&c| c != id);
            self.data_mut(id).parent = None;
        }
    }

    /// Insert `child` under `parent` before `reference` (append when `None`).
    ///
    /// A fragment is never inserted itself: its children are moved instead.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if matches!(self.data(child).kind, NodeKind::Fragment) {
            let moved = self.data(child).children.clone();
            for node in moved {
                self.insert_before(parent, node, reference);
            }
            return;
        }

        self.detach(child);
        let index = reference
            .filter(|&r| self.parent(r) == Some(parent))
            .and_then(|r| self.index_in_parent(r))
            .unwrap_or(self.data(parent).children.len());
        self.data_mut(parent).children.insert(index, child);
        self.data_mut(child).parent = Some(parent);
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Put `replacement` where `old` is and detach `old`.
    ///
    /// Returns `false` when `old` has no parent.
    pub fn replace_node(&mut self, old: NodeId, replacement: NodeId) -> bool {
        match self.parent(old) {
            Some(parent) => {
                self.insert_before(parent, replacement, Some(old));
                self.detach(old);
                true
            }
            None => false,
        }
    }

    /// Wrap `nodes` in a new element placed where the first node was.
    ///
    /// Returns `None` for an empty slice.
    pub fn wrap(&mut self, nodes: &[NodeId], tag: Tag) -> Option<NodeId> {
        let first = *nodes.first()?;
        let wrapper = self.create_element(tag);
        if let Some(parent) = self.parent(first) {
            self.insert_before(parent, wrapper, Some(first));
        }
        for &node in nodes {
            self.append_child(wrapper, node);
        }
        Some(wrapper)
    }

    /// Replace a node with its children. Returns the first moved child.
    pub fn unwrap(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let children = self.data(id).children.clone();
        for &child in &children {
            self.insert_before(parent, child, Some(id));
        }
        self.detach(id);
        children.first().copied()
    }

    /// Split the parent of `node` in two.
    ///
    /// With `split_before` the siblings before `node` move into a shallow copy
    /// of the parent inserted before it; otherwise the siblings after `node`
    /// move into a copy inserted after it. Returns the new copy, or `None`
    /// when nothing had to move.
    pub fn split_parent_node(&mut self, node: NodeId, split_before: bool) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let grandparent = self.parent(parent)?;
        let index = self.index_in_parent(node)?;

        let moving: Vec<NodeId> = if split_before {
            self.children(parent)[..index].to_vec()
        } else {
            self.children(parent)[index + 1..].to_vec()
        };
        if moving.is_empty() {
            return None;
        }

        let copy = self.clone_shallow(parent);
        for child in moving {
            self.append_child(copy, child);
        }
        let reference = if split_before {
            Some(parent)
        } else {
            self.next_sibling(parent)
        };
        self.insert_before(grandparent, copy, reference);
        Some(copy)
    }

    /// Split the parent of `node` on both sides so `node` becomes its only
    /// child. Returns that parent.
    pub fn split_balanced_node_range(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        self.parent(parent)?;
        self.split_parent_node(node, true);
        self.split_parent_node(node, false);
        Some(parent)
    }

    /// Lift `start` and `end` to a common level under `root` and return the
    /// sibling run between them.
    ///
    /// With `can_split_parent` the ancestors crossed on the way up are split
    /// so the run covers exactly the content from `start` to `end`.
    pub fn collapse_nodes(
        &mut self,
        root: NodeId,
        start: NodeId,
        end: NodeId,
        can_split_parent: bool,
    ) -> Vec<NodeId> {
        if !self.contains(root, start) || !self.contains(root, end) {
            return Vec::new();
        }

        let start = self.collapse_toward(root, start, end, true, can_split_parent);
        let end = self.collapse_toward(root, end, start, false, can_split_parent);

        if self.contains_or_same(start, end) {
            vec![start]
        } else if self.contains(end, start) {
            vec![end]
        } else if self.parent(start) == self.parent(end) {
            let Some(parent) = self.parent(start) else {
                return Vec::new();
            };
            let children = self.children(parent);
            match (
                children.iter().position(|&c| c == start),
                children.iter().position(|&c| c == end),
            ) {
                (Some(first), Some(last)) if first <= last => children[first..=last].to_vec(),
                _ => Vec::new(),
            }
        } else {
            Vec::new()
        }
    }

    fn collapse_toward(
        &mut self,
        root: NodeId,
        mut node: NodeId,
        track: NodeId,
        is_start: bool,
        can_split_parent: bool,
    ) -> NodeId {
        while let Some(parent) = self.parent(node) {
            if parent == root || self.contains(parent, track) {
                break;
            }
            if can_split_parent {
                self.split_parent_node(node, is_start);
            }
            node = parent;
        }
        node
    }

    /// Whether a node has no visible content.
    ///
    /// Text counts when it is non-empty (after trimming with `trim`); tables,
    /// list items and rules always count as visible.
    pub fn is_node_empty(&self, id: NodeId, trim: bool) -> bool {
        match &self.data(id).kind {
            NodeKind::Text(text) => {
                if trim {
                    text.trim().is_empty()
                } else {
                    text.is_empty()
                }
            }
            NodeKind::Element(tag) if matches!(tag, Tag::Table | Tag::Li | Tag::Hr) => false,
            _ => {
                let text = self.text_content(id);
                let text_empty = if trim {
                    text.trim().is_empty()
                } else {
                    text.is_empty()
                };
                text_empty
                    && !self.descendants(id).iter().any(|&d| {
                        matches!(self.tag(d), Some(Tag::Table | Tag::Li | Tag::Hr))
                    })
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::html::to_html;

    fn paragraphs(doc: &mut Document, texts: &[&str]) -> Vec<NodeId> {
        let root = doc.root();
        texts
            .iter()
            .map(|t| {
                let p = doc.append_element(root, Tag::P);
                doc.append_text(p, t);
                p
            })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_siblings_and_parent() {
        let mut doc = Document::new();
        let ps = paragraphs(&mut doc, &["a", "b", "c"]);

        assert_eq!(doc.next_sibling(ps[0]), Some(ps[1]));
        assert_eq!(doc.previous_sibling(ps[0]), None);
        assert_eq!(doc.previous_sibling(ps[2]), Some(ps[1]));
        assert_eq!(doc.parent(ps[1]), Some(doc.root()));
    }

    #[test]
    fn test_contains_is_strict() {
        let mut doc = Document::new();
        let ps = paragraphs(&mut doc, &["a"]);
        let text = doc.first_child(ps[0]).unwrap();

        assert!(doc.contains(doc.root(), text));
        assert!(!doc.contains(ps[0], ps[0]));
        assert!(doc.contains_or_same(ps[0], ps[0]));
    }

    #[test]
    fn test_relation_document_order() {
        let mut doc = Document::new();
        let ps = paragraphs(&mut doc, &["a", "b"]);
        let text_a = doc.first_child(ps[0]).unwrap();

        assert_eq!(doc.relation(ps[0], ps[1]), Relation::Following);
        assert_eq!(doc.relation(ps[1], ps[0]), Relation::Preceding);
        assert_eq!(doc.relation(ps[0], text_a), Relation::ContainedBy);
        assert_eq!(doc.relation(text_a, ps[0]), Relation::Contains);
        assert_eq!(doc.relation(ps[0], ps[0]), Relation::Same);

        let loose = doc.create_element(Tag::Div);
        assert_eq!(doc.relation(ps[0], loose), Relation::Disconnected);
    }

    #[test]
    fn test_closest_ancestor_stops_at_root() {
        let mut doc = Document::new();
        let root = doc.root();
        let quote = doc.append_element(root, Tag::Blockquote);
        let p = doc.append_element(quote, Tag::P);
        let text = doc.append_text(p, "x");

        assert_eq!(
            doc.closest_ancestor(text, root, |t| t == Tag::Blockquote),
            Some(quote)
        );
        assert_eq!(doc.closest_ancestor(text, p, |t| t == Tag::Blockquote), None);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_wrap_and_unwrap() {
        let mut doc = Document::new();
        let ps = paragraphs(&mut doc, &["a", "b", "c"]);

        let quote = doc.wrap(&ps[..2], Tag::Blockquote).unwrap();
        assert_eq!(
            to_html(&doc, doc.root()),
            "<blockquote><p>a</p><p>b</p></blockquote><p>c</p>"
        );

        doc.unwrap(quote);
        assert_eq!(to_html(&doc, doc.root()), "<p>a</p><p>b</p><p>c</p>");
        assert!(doc.wrap(&[], Tag::Div).is_none());
    }

    #[test]
    fn test_split_parent_node_before_and_after() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.append_element(root, Tag::Div);
        let a = doc.append_text(div, "a");
        let b = doc.append_text(div, "b");
        doc.append_text(div, "c");

        let before = doc.split_parent_node(b, true);
        assert!(before.is_some());
        assert_eq!(to_html(&doc, root), "<div>a</div><div>bc</div>");

        let after = doc.split_parent_node(b, false);
        assert!(after.is_some());
        assert_eq!(to_html(&doc, root), "<div>a</div><div>b</div><div>c</div>");

        // Nothing before `a` inside its parent
        assert!(doc.split_parent_node(a, true).is_none());
    }

    #[test]
    fn test_split_balanced_node_range() {
        let mut doc = Document::new();
        let root = doc.root();
        let quote = doc.append_element(root, Tag::Blockquote);
        let ps: Vec<NodeId> = ["a", "b", "c"]
            .iter()
            .map(|t| {
                let p = doc.append_element(quote, Tag::P);
                doc.append_text(p, t);
                p
            })
            .collect();

        let parent = doc.split_balanced_node_range(ps[1]);
        assert_eq!(parent, Some(quote));
        assert_eq!(
            to_html(&doc, root),
            "<blockquote><p>a</p></blockquote><blockquote><p>b</p></blockquote><blockquote><p>c</p></blockquote>"
        );
    }

    #[test]
    fn test_fragment_insertion_moves_children() {
        let mut doc = Document::new();
        let ps = paragraphs(&mut doc, &["a"]);
        let fragment = doc.create_fragment();
        let x = doc.append_element(fragment, Tag::Div);
        let y = doc.append_element(fragment, Tag::Hr);

        assert!(doc.replace_node(ps[0], fragment));
        assert_eq!(doc.children(doc.root()), &[x, y]);
        assert!(doc.children(fragment).is_empty());
        assert_eq!(doc.parent(ps[0]), None);
    }

    #[test]
    fn test_collapse_nodes_splits_ancestors() {
        let mut doc = Document::new();
        let root = doc.root();
        let p0 = doc.append_element(root, Tag::P);
        doc.append_text(p0, "a");
        let quote = doc.append_element(root, Tag::Blockquote);
        let p1 = doc.append_element(quote, Tag::P);
        doc.append_text(p1, "b");
        let p2 = doc.append_element(quote, Tag::P);
        doc.append_text(p2, "c");

        let nodes = doc.collapse_nodes(root, p0, p1, true);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0], p0);
        assert_eq!(nodes[1], quote);
        assert_eq!(
            to_html(&doc, root),
            "<p>a</p><blockquote><p>b</p></blockquote><blockquote><p>c</p></blockquote>"
        );
    }

    #[test]
    fn test_is_node_empty() {
        let mut doc = Document::new();
        let root = doc.root();
        let space = doc.append_text(root, "  \n");
        let div = doc.append_element(root, Tag::Div);
        let with_table = doc.append_element(root, Tag::Div);
        doc.append_element(with_table, Tag::Table);

        assert!(doc.is_node_empty(space, true));
        assert!(!doc.is_node_empty(space, false));
        assert!(doc.is_node_empty(div, true));
        assert!(!doc.is_node_empty(with_table, true));
    }
}
