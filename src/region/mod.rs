//! Selection regions
//!
//! A selection that crosses table cells is split into regions: contiguous
//! areas of the document that never cross a cell boundary. Each region is
//! a root node, optionally fenced by a table before and a table after, and
//! clipped to the selection.
//!
//! Regions are produced in two steps. [`boundary`] finds the table cells
//! the selection touches and arranges them in a tree; [`emitter`] walks that
//! tree in document order and emits one region per gap between tables.

pub mod boundary;
pub mod emitter;

use crate::dom::{BlockElement, Document, NodeId, Position, Relation, SelectionRange, Tag};

pub use boundary::{build_boundary_tree, BoundaryGroup, BoundaryNode, BoundaryTree};
pub use emitter::{emit_regions, Phase};

/// Split a selection under `root` into table-cell-safe regions.
pub fn get_regions_from_range(doc: &Document, root: NodeId, range: &SelectionRange) -> Vec<Region> {
    let tree = build_boundary_tree(doc, root, range);
    emit_regions(doc, &tree, root, range)
}

/// A contiguous editable area of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    root: NodeId,
    /// Table right before the region, inside `root`
    before: Option<NodeId>,
    /// Table right after the region, inside `root`
    after: Option<NodeId>,
    start: Option<Position>,
    end: Option<Position>,
}

impl Region {
    /// Region of `root` between the two fences, clipped to `range`.
    pub fn new(
        doc: &Document,
        root: NodeId,
        range: &SelectionRange,
        before: Option<NodeId>,
        after: Option<NodeId>,
    ) -> Self {
        let first = match before {
            Some(fence) => doc.leaf_sibling(root, fence, true, true),
            None => doc.first_child(root),
        };
        let last = match after {
            Some(fence) => doc.leaf_sibling(root, fence, false, true),
            None => doc.last_child(root),
        };

        let (start, end) = match (first, last) {
            (Some(first), Some(last)) => {
                let region_start = Position::begin(first).normalize(doc);
                let region_end = Position::end(doc, last).normalize(doc);
                let (selection_start, selection_end) = range.normalized(doc);

                let start = if selection_start.is_after(doc, &region_start) {
                    selection_start
                } else {
                    region_start
                };
                let end = if selection_end.is_after(doc, &region_end) {
                    region_end
                } else {
                    selection_end
                };
                (Some(start), Some(end))
            }
            _ => (None, None),
        };

        Self {
            root,
            before,
            after,
            start,
            end,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn fence_before(&self) -> Option<NodeId> {
        self.before
    }

    pub fn fence_after(&self) -> Option<NodeId> {
        self.after
    }

    /// Clipped selection start, `None` for a region with no content.
    pub fn start(&self) -> Option<&Position> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&Position> {
        self.end.as_ref()
    }

    /// Whether `node` lies inside the region, fences excluded.
    pub fn contains(&self, doc: &Document, node: NodeId) -> bool {
        doc.contains(self.root, node)
            && self
                .before
                .map_or(true, |fence| doc.relation(fence, node) == Relation::Following)
            && self
                .after
                .map_or(true, |fence| doc.relation(fence, node) == Relation::Preceding)
    }

    /// Whether both ends of `block` lie inside the region.
    pub fn contains_block(&self, doc: &Document, block: &BlockElement) -> bool {
        self.contains(doc, block.start_node()) && self.contains(doc, block.end_node())
    }

    /// Blocks covered by the clipped selection, tables treated as opaque.
    pub fn selected_block_elements(&self, doc: &Document) -> Vec<BlockElement> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => doc.blocks_in_range(self.root, start, end, true),
            _ => Vec::new(),
        }
    }

    /// Next (or previous) leaf after `node`, staying inside the region.
    pub fn leaf_sibling_in_region(&self, doc: &Document, node: NodeId, is_next: bool) -> Option<NodeId> {
        doc.leaf_sibling(self.root, node, is_next, true)
            .filter(|&leaf| self.contains(doc, leaf))
    }

    /// Collapse the first and last of `nodes` to a sibling run, splitting
    /// ancestors as needed. Both ends must be inside the region.
    pub fn collapse_nodes(&self, doc: &mut Document, nodes: &[NodeId]) -> Vec<NodeId> {
        let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) else {
            return Vec::new();
        };
        if !self.contains(doc, first) || !self.contains(doc, last) {
            return Vec::new();
        }
        doc.collapse_nodes(self.root, first, last, true)
    }

    /// Closest matching element at or above `node`, if `node` is inside the
    /// region. The search never leaves the region root.
    pub fn find_closest_element_ancestor(
        &self,
        doc: &Document,
        node: NodeId,
        predicate: impl Fn(Tag) -> bool,
    ) -> Option<NodeId> {
        if !self.contains(doc, node) {
            return None;
        }
        doc.closest_ancestor(node, self.root, predicate)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
