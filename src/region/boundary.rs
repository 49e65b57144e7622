//! Region boundary tree
//!
//! Every table cell the selection touches becomes a boundary node, attached
//! under the boundary that encloses its table. Cells of one table are
//! grouped together so the emitter knows which table fences each gap.
//! Tables lying wholly inside the selection are opaque: their cells never
//! become boundaries.

use crate::dom::{intersects_selection, Document, NodeId, SelectionRange, SelectionScope, Tag};
use log::debug;

/// A node that regions are carved out of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryNode {
    /// The region root (document root or a table cell)
    pub node: NodeId,
    /// Child boundaries grouped by table, in document order
    pub groups: Vec<BoundaryGroup>,
}

/// Child boundaries that sit in the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryGroup {
    pub table: NodeId,
    /// Indexes into the owning [`BoundaryTree`]
    pub members: Vec<usize>,
}

/// Arena of boundary nodes; index 0 is the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryTree {
    nodes: Vec<BoundaryNode>,
}

impl BoundaryTree {
    pub const ROOT: usize = 0;

    pub fn node(&self, index: usize) -> &BoundaryNode {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: NodeId) -> usize {
        self.nodes.push(BoundaryNode {
            node,
            groups: Vec::new(),
        });
        self.nodes.len() - 1
    }
}

/// Build the boundary tree for a selection under `root`.
pub fn build_boundary_tree(doc: &Document, root: NodeId, range: &SelectionRange) -> BoundaryTree {
    let (start, end) = range.normalized(doc);
    let descendants = doc.descendants(root);

    let opaque_tables: Vec<NodeId> = descendants
        .iter()
        .copied()
        .filter(|&n| doc.is_element(n, Tag::Table))
        .filter(|&n| intersects_selection(doc, n, &start, &end, SelectionScope::InSelection))
        .collect();

    let mut tree = BoundaryTree { nodes: Vec::new() };
    tree.push(root);

    let cells = descendants
        .iter()
        .copied()
        .filter(|&n| doc.tag(n).is_some_and(Tag::is_cell))
        .filter(|&n| intersects_selection(doc, n, &start, &end, SelectionScope::OnSelection));

    for cell in cells {
        let Some(table) = doc.closest_ancestor(cell, root, |t| t == Tag::Table) else {
            continue;
        };
        if opaque_tables.contains(&table) {
            continue;
        }

        let index = tree.push(cell);
        let owner = (0..index)
            .rev()
            .find(|&i| doc.contains(tree.nodes[i].node, table));

        match owner {
            Some(owner) => {
                let groups = &mut tree.nodes[owner].groups;
                match groups.iter_mut().find(|g| g.table == table) {
                    Some(group) => group.members.push(index),
                    None => groups.push(BoundaryGroup {
                        table,
                        members: vec![index],
                    }),
                }
            }
            None => debug!("Cell {} has no enclosing boundary", cell),
        }
    }

    tree
}
