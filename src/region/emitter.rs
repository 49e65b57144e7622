//! Region emission
//!
//! Walks the boundary tree in document order. A boundary without tables
//! becomes one region as a whole; otherwise a [`Region`] is emitted for
//! every gap between consecutive tables of the boundary, but only while the
//! walk is inside the selection. The walk state is a [`Phase`] threaded
//! through each call: it turns `InSelection` on entering the cell that holds
//! the selection start and `AfterSelection` on leaving the cell that holds
//! the selection end.

use super::boundary::BoundaryTree;
use super::Region;
use crate::dom::{Document, NodeId, SelectionRange, Tag};
use log::debug;

/// Where the walk is relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BeforeSelection,
    InSelection,
    AfterSelection,
}

/// Emit the regions of a boundary tree, in document order.
pub fn emit_regions(
    doc: &Document,
    tree: &BoundaryTree,
    root: NodeId,
    range: &SelectionRange,
) -> Vec<Region> {
    let (start, end) = range.normalized(doc);
    let emitter = Emitter {
        doc,
        tree,
        range,
        start_cell: doc
            .closest_ancestor(start.node, root, Tag::is_cell)
            .unwrap_or(root),
        end_cell: doc
            .closest_ancestor(end.node, root, Tag::is_cell)
            .unwrap_or(root),
    };

    let mut regions = Vec::new();
    if !tree.is_empty() {
        emitter.walk(BoundaryTree::ROOT, Phase::BeforeSelection, &mut regions);
    }
    regions
}

struct Emitter<'a> {
    doc: &'a Document,
    tree: &'a BoundaryTree,
    range: &'a SelectionRange,
    start_cell: NodeId,
    end_cell: NodeId,
}

impl Emitter<'_> {
    fn walk(&self, index: usize, phase: Phase, regions: &mut Vec<Region>) -> Phase {
        let boundary = self.tree.node(index);
        let mut phase = if phase == Phase::BeforeSelection && boundary.node == self.start_cell {
            Phase::InSelection
        } else {
            phase
        };

        if boundary.groups.is_empty() {
            regions.push(Region::new(self.doc, boundary.node, self.range, None, None));
        } else {
            for i in 0..=boundary.groups.len() {
                if phase == Phase::AfterSelection {
                    break;
                }
                if phase == Phase::InSelection {
                    let before = i.checked_sub(1).map(|p| boundary.groups[p].table);
                    let after = boundary.groups.get(i).map(|g| g.table);
                    self.emit(regions, boundary.node, before, after);
                }
                if let Some(group) = boundary.groups.get(i) {
                    for &member in &group.members {
                        phase = self.walk(member, phase, regions);
                        if phase == Phase::AfterSelection {
                            break;
                        }
                    }
                }
            }
        }

        if boundary.node == self.end_cell {
            Phase::AfterSelection
        } else {
            phase
        }
    }

    fn emit(&self, regions: &mut Vec<Region>, root: NodeId, before: Option<NodeId>, after: Option<NodeId>) {
        if fences_are_valid(self.doc, root, before, after) {
            regions.push(Region::new(self.doc, root, self.range, before, after));
        } else {
            debug!(
                "Dropping empty region in {} between {:?} and {:?}",
                root, before, after
            );
        }
    }
}

/// Whether the gap between two fences under `root` holds any content.
fn fences_are_valid(doc: &Document, root: NodeId, before: Option<NodeId>, after: Option<NodeId>) -> bool {
    if doc.first_child(root).is_none() {
        return false;
    }

    let before_next = before.and_then(|fence| doc.leaf_sibling(root, fence, true, true));
    let after_previous = after.and_then(|fence| doc.leaf_sibling(root, fence, false, true));

    let before_valid = before.map_or(true, |fence| {
        doc.contains(root, fence) && before_next.is_some_and(|leaf| doc.contains(root, leaf))
    });
    let after_valid = after.map_or(true, |fence| {
        doc.contains(root, fence) && after_previous.is_some_and(|leaf| doc.contains(root, leaf))
    });

    let pair_valid = match (before, after) {
        (Some(before), Some(after)) => {
            !doc.contains_or_same(before, after)
                && !after_previous.is_some_and(|leaf| doc.contains_or_same(before, leaf))
                && !doc.contains_or_same(after, before)
                && !before_next.is_some_and(|leaf| doc.contains_or_same(after, leaf))
        }
        _ => true,
    };

    before_valid && after_valid && pair_valid
}
