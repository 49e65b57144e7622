//! Block enumeration and leaf traversal
//!
//! A block is either a block element with no block children, or a run of
//! adjacent inline siblings that sits next to block content. Tables can be
//! treated as opaque so that a whole table counts as one block.

use super::position::Position;
use super::tree::{Document, NodeId, Tag};

/// One block of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockElement {
    /// A block element and its content
    Node(NodeId),
    /// Inline siblings from `start` to `end` under one parent
    Run { start: NodeId, end: NodeId },
}

impl BlockElement {
    pub fn start_node(&self) -> NodeId {
        match *self {
            BlockElement::Node(node) => node,
            BlockElement::Run { start, .. } => start,
        }
    }

    pub fn end_node(&self) -> NodeId {
        match *self {
            BlockElement::Node(node) => node,
            BlockElement::Run { end, .. } => end,
        }
    }

    /// Nodes making up the block, in order.
    pub fn nodes(&self, doc: &Document) -> Vec<NodeId> {
        match *self {
            BlockElement::Node(node) => vec![node],
            BlockElement::Run { start, end } => {
                let mut nodes = vec![start];
                let mut current = start;
                while current != end {
                    match doc.next_sibling(current) {
                        Some(next) => {
                            nodes.push(next);
                            current = next;
                        }
                        None => break,
                    }
                }
                nodes
            }
        }
    }

    /// Whether `node` is part of this block.
    pub fn contains_node(&self, doc: &Document, node: NodeId) -> bool {
        self.nodes(doc)
            .into_iter()
            .any(|n| doc.contains_or_same(n, node))
    }

    /// Whether every node of the block is whitespace.
    pub fn is_blank(&self, doc: &Document) -> bool {
        match self {
            BlockElement::Node(_) => false,
            BlockElement::Run { .. } => self.nodes(doc).into_iter().all(|n| doc.is_node_empty(n, true)),
        }
    }

    /// Turn the block into a single element, wrapping a run in a `div`.
    pub fn collapse_to_single_element(&self, doc: &mut Document) -> NodeId {
        match *self {
            BlockElement::Node(node) => node,
            BlockElement::Run { start, .. } => {
                let nodes = self.nodes(doc);
                doc.wrap(&nodes, Tag::Div).unwrap_or(start)
            }
        }
    }
}

impl Document {
    fn has_block_child(&self, node: NodeId) -> bool {
        self.children(node).iter().any(|&c| self.is_block(c))
    }

    /// Every block under `root` in document order. `root` itself is never
    /// one of them.
    pub fn block_elements(&self, root: NodeId, opaque_tables: bool) -> Vec<BlockElement> {
        let mut blocks = Vec::new();
        if self.has_block_child(root) {
            self.collect_blocks(root, opaque_tables, &mut blocks);
        } else if let (Some(start), Some(end)) = (self.first_child(root), self.last_child(root)) {
            blocks.push(BlockElement::Run { start, end });
        }
        blocks
    }

    fn collect_blocks(&self, container: NodeId, opaque_tables: bool, blocks: &mut Vec<BlockElement>) {
        let mut run: Option<(NodeId, NodeId)> = None;

        for &child in self.children(container) {
            if self.is_block(child) {
                if let Some((start, end)) = run.take() {
                    blocks.push(BlockElement::Run { start, end });
                }
                let opaque = opaque_tables && self.is_element(child, Tag::Table);
                if opaque || !self.has_block_child(child) {
                    blocks.push(BlockElement::Node(child));
                } else {
                    self.collect_blocks(child, opaque_tables, blocks);
                }
            } else {
                run = Some(match run {
                    Some((start, _)) => (start, child),
                    None => (child, child),
                });
            }
        }

        if let Some((start, end)) = run {
            blocks.push(BlockElement::Run { start, end });
        }
    }

    /// Blocks from the one holding `start` to the one holding `end`.
    pub fn blocks_in_range(
        &self,
        root: NodeId,
        start: &Position,
        end: &Position,
        opaque_tables: bool,
    ) -> Vec<BlockElement> {
        let blocks = self.block_elements(root, opaque_tables);
        let first = blocks.iter().position(|b| b.contains_node(self, start.node));
        let last = blocks.iter().rposition(|b| b.contains_node(self, end.node));

        match (first, last) {
            (Some(first), Some(last)) if first <= last => blocks[first..=last].to_vec(),
            _ => Vec::new(),
        }
    }

    /// Next (or previous) leaf after `start` without leaving `root`.
    ///
    /// With `opaque_tables` a table is returned as a leaf instead of being
    /// descended into.
    pub fn leaf_sibling(
        &self,
        root: NodeId,
        start: NodeId,
        is_next: bool,
        opaque_tables: bool,
    ) -> Option<NodeId> {
        if !self.contains(root, start) {
            return None;
        }

        let sibling = |node: NodeId| {
            if is_next {
                self.next_sibling(node)
            } else {
                self.previous_sibling(node)
            }
        };

        let mut current = sibling(start);
        let mut parent = self.parent(start);
        while current.is_none() {
            match parent {
                Some(p) if p != root => {
                    current = sibling(p);
                    parent = self.parent(p);
                }
                _ => break,
            }
        }

        while let Some(node) = current {
            if opaque_tables && self.is_element(node, Tag::Table) {
                break;
            }
            let child = if is_next {
                self.first_child(node)
            } else {
                self.last_child(node)
            };
            match child {
                Some(child) => current = Some(child),
                None => break,
            }
        }

        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_elements_runs_and_nodes() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_text(root, "loose ");
        let b = doc.append_element(root, Tag::Strong);
        let p = doc.append_element(root, Tag::P);
        doc.append_text(p, "para");

        let blocks = doc.block_elements(root, true);
        assert_eq!(
            blocks,
            vec![BlockElement::Run { start: a, end: b }, BlockElement::Node(p)]
        );
    }

    #[test]
    fn test_block_elements_descends_into_containers() {
        let mut doc = Document::new();
        let root = doc.root();
        let ul = doc.append_element(root, Tag::Ul);
        let li = doc.append_element(ul, Tag::Li);
        doc.append_text(li, "item");
        let table = doc.append_element(root, Tag::Table);
        let tr = doc.append_element(table, Tag::Tr);
        let td = doc.append_element(tr, Tag::Td);

        assert_eq!(
            doc.block_elements(root, true),
            vec![BlockElement::Node(li), BlockElement::Node(table)]
        );
        assert_eq!(
            doc.block_elements(root, false),
            vec![BlockElement::Node(li), BlockElement::Node(td)]
        );
    }

    #[test]
    fn test_inline_only_root_is_one_run() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_text(root, "a");
        let b = doc.append_text(root, "b");

        assert_eq!(doc.block_elements(root, true), vec![BlockElement::Run { start: a, end: b }]);
    }

    #[test]
    fn test_collapse_run_wraps_in_div() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_text(root, "a");
        let b = doc.append_text(root, "b");

        let div = BlockElement::Run { start: a, end: b }.collapse_to_single_element(&mut doc);
        assert!(doc.is_element(div, Tag::Div));
        assert_eq!(doc.children(div), &[a, b]);
    }

    #[test]
    fn test_leaf_sibling_skips_into_tables_only_when_transparent() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, Tag::P);
        let text = doc.append_text(p, "before");
        let table = doc.append_element(root, Tag::Table);
        let tr = doc.append_element(table, Tag::Tr);
        let td = doc.append_element(tr, Tag::Td);
        let cell_text = doc.append_text(td, "cell");

        assert_eq!(doc.leaf_sibling(root, text, true, true), Some(table));
        assert_eq!(doc.leaf_sibling(root, text, true, false), Some(cell_text));
        assert_eq!(doc.leaf_sibling(root, table, false, true), Some(text));
        assert_eq!(doc.leaf_sibling(root, table, true, true), None);
    }
}
