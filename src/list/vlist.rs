//! Flattened list view
//!
//! A `VList` turns a repaired list tree into a flat sequence of
//! [`ListItem`]s. Indentation and type changes only touch item levels and
//! kinds; [`VList::write_back`] then rebuilds the nested containers from
//! the sequence in one pass.

use super::normalize::{normalize_list, NormalizedList};
use super::{Indentation, ListItem, ListKind};
use crate::dom::{Document, NodeId, Position, Relation, Tag};
use crate::error::{Error, Result};
use log::debug;

/// Flattened view of one list container.
#[derive(Debug, Clone)]
pub struct VList {
    root: NodeId,
    items: Vec<ListItem>,
}

impl VList {
    /// Repair `list` and flatten it.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAListContainer` when `list` is not `ol`/`ul`.
    pub fn new(doc: &mut Document, list: NodeId) -> Result<Self> {
        let normalized = normalize_list(doc, list)?;
        Ok(Self::from_normalized(doc, normalized))
    }

    /// Flatten an already repaired list.
    pub fn from_normalized(doc: &Document, list: NormalizedList) -> Self {
        let mut vlist = Self {
            root: list.root(),
            items: Vec::new(),
        };
        vlist.populate_items(doc, list.root(), 1);
        vlist
    }

    /// Virtualize a run of plain sibling blocks.
    ///
    /// A temporary `ol` is inserted before the first node to anchor the
    /// rebuilt tree; every node becomes a level 0 item. Returns `None` for
    /// an empty run.
    ///
    /// # Errors
    ///
    /// Returns `Error::DetachedNode` when the first node has no parent.
    pub fn from_nodes(doc: &mut Document, nodes: &[NodeId]) -> Result<Option<Self>> {
        let Some(&first) = nodes.first() else {
            return Ok(None);
        };
        let parent = doc.parent(first).ok_or(Error::DetachedNode(first))?;

        let anchor = doc.create_element(Tag::Ol);
        doc.insert_before(parent, anchor, Some(first));

        let mut vlist = Self {
            root: anchor,
            items: Vec::new(),
        };
        for &node in nodes {
            vlist.append_item(node, ListKind::None);
        }
        Ok(Some(vlist))
    }

    fn populate_items(&mut self, doc: &Document, list: NodeId, level: usize) {
        let kind = ListKind::of_container(doc, list);
        for &child in doc.children(list) {
            if doc.is_list(child) {
                self.populate_items(doc, child, level + 1);
            } else {
                self.items.push(ListItem {
                    node: child,
                    level,
                    kind,
                });
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The list container this view was built from.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// Kind of the root container.
    pub fn root_list_kind(&self, doc: &Document) -> ListKind {
        ListKind::of_container(doc, self.root)
    }

    /// Whether `node` is inside the list or one of its items.
    pub fn contains(&self, doc: &Document, node: NodeId) -> bool {
        doc.contains(self.root, node)
            || self
                .items
                .iter()
                .any(|item| doc.contains_or_same(item.node, node))
    }

    /// Node of the first (or last) item.
    pub fn first_or_last_node(&self, is_last: bool) -> Option<NodeId> {
        let item = if is_last {
            self.items.last()
        } else {
            self.items.first()
        };
        item.map(|i| i.node)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edits
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a plain block. Level is 0 for `ListKind::None`, 1 otherwise.
    pub fn append_item(&mut self, node: NodeId, kind: ListKind) {
        let level = if kind == ListKind::None { 0 } else { 1 };
        self.items.push(ListItem { node, level, kind });
    }

    /// Append a list item at `level`, wrapping `node` in an `li` if needed.
    pub fn append_list_item(&mut self, doc: &mut Document, node: NodeId, kind: ListKind, level: usize) {
        let node = if doc.is_element(node, Tag::Li) {
            node
        } else {
            doc.wrap(&[node], Tag::Li).unwrap_or(node)
        };
        self.items.push(ListItem { node, level, kind });
    }

    /// Indent or outdent every item between `start` and `end`.
    ///
    /// Levels never go below 0.
    pub fn set_indentation(
        &mut self,
        doc: &mut Document,
        start: &Position,
        end: &Position,
        direction: Indentation,
    ) {
        let Some((first, last)) = find_list_items(doc, &self.items, start, end) else {
            return;
        };

        for item in &mut self.items[first..=last] {
            item.level = match direction {
                Indentation::Increase => item.level + 1,
                Indentation::Decrease => item.level.saturating_sub(1),
            };
        }
        self.merge_orphans(doc, last);
    }

    /// Turn every item between `start` and `end` into `target` items.
    ///
    /// When every selected item is already a `target` item at level 1 or
    /// deeper, the change toggles off instead: every selected item is
    /// outdented by one.
    pub fn change_list_type(
        &mut self,
        doc: &mut Document,
        start: &Position,
        end: &Position,
        target: ListKind,
    ) {
        let Some((first, last)) = find_list_items(doc, &self.items, start, end) else {
            return;
        };

        let apply = self.items[first..=last]
            .iter()
            .any(|item| item.level == 0 || item.kind != target);

        for item in &mut self.items[first..=last] {
            if apply {
                item.level = item.level.max(1);
                item.kind = target;
            } else {
                item.level = item.level.saturating_sub(1);
            }
        }
        self.merge_orphans(doc, last);
    }

    /// Append the items of `other` and absorb its container.
    ///
    /// `other`'s container is detached from the tree; its items are now
    /// owned by this list.
    pub fn merge_vlist(&mut self, doc: &mut Document, other: VList) {
        let old_len = self.items.len();
        self.items.extend(other.items);
        if old_len > 0 {
            self.merge_orphans(doc, old_len - 1);
        }
        if doc.parent(other.root).is_some() {
            debug!("Merging list {} into {}", other.root, self.root);
            doc.detach(other.root);
        }
    }

    /// Fold the non-`li` items following an `li` at the same level and kind
    /// into that `li`.
    fn merge_orphans(&mut self, doc: &mut Document, index: usize) {
        let Some(anchor) = self.items.get(index).copied() else {
            return;
        };
        if !doc.is_element(anchor.node, Tag::Li) {
            return;
        }

        let mut end = index + 1;
        while let Some(item) = self.items.get(end) {
            if item.level == anchor.level
                && item.kind == anchor.kind
                && !doc.is_element(item.node, Tag::Li)
            {
                end += 1;
            } else {
                break;
            }
        }
        if end == index + 1 {
            return;
        }

        let orphans: Vec<NodeId> = self.items.drain(index + 1..end).map(|i| i.node).collect();
        if let Some(wrapper) = doc.wrap(&orphans, Tag::Div) {
            doc.append_child(anchor.node, wrapper);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write Back
    // ─────────────────────────────────────────────────────────────────────────

    /// Rebuild the tree from the item sequence and replace the original
    /// container with the result.
    ///
    /// Ordered containers get `styles[depth % styles.len()]` as their
    /// list-style-type. Items at level 0 are demoted to plain blocks.
    ///
    /// # Errors
    ///
    /// Returns `Error::DetachedNode` when the container has no parent. The
    /// tree is untouched in that case.
    pub fn write_back(self, doc: &mut Document, styles: &[Option<String>]) -> Result<()> {
        if doc.parent(self.root).is_none() {
            return Err(Error::DetachedNode(self.root));
        }

        let fragment = doc.create_fragment();
        // stack[d] is the open container at depth d, kinds[d] its kind
        let mut stack: Vec<NodeId> = vec![fragment];
        let mut kinds: Vec<ListKind> = vec![ListKind::None];

        for item in &self.items {
            let mut keep = (stack.len() - 1).min(item.level);
            if keep == item.level && keep > 0 && kinds[keep] != item.kind {
                keep -= 1;
            }
            stack.truncate(keep + 1);
            kinds.truncate(keep + 1);

            for depth in keep..item.level {
                let container = doc.create_element(item.kind.container_tag());
                if item.kind == ListKind::Ordered && !styles.is_empty() {
                    let style = styles[depth % styles.len()].clone();
                    doc.set_list_style(container, style);
                }
                if let Some(&parent) = stack.last() {
                    doc.append_child(parent, container);
                }
                stack.push(container);
                kinds.push(item.kind);
            }

            let Some(&parent) = stack.last() else {
                continue;
            };
            if item.level == 0 {
                demote_item(doc, parent, item.node);
            } else if doc.is_element(item.node, Tag::Li) {
                doc.append_child(parent, item.node);
            } else {
                let li = doc.create_element(Tag::Li);
                doc.append_child(li, item.node);
                doc.append_child(parent, li);
            }
        }

        doc.replace_node(self.root, fragment);
        Ok(())
    }
}

/// Put a level 0 item into `parent` as plain content.
fn demote_item(doc: &mut Document, parent: NodeId, node: NodeId) {
    if doc.is_element(node, Tag::Li) {
        let children = doc.children(node).to_vec();
        if !children.is_empty() && children.iter().all(|&c| doc.is_block(c)) {
            for child in children {
                doc.append_child(parent, child);
            }
            doc.detach(node);
        } else {
            doc.set_tag(node, Tag::Div);
            doc.append_child(parent, node);
        }
    } else if doc.is_block(node) {
        doc.append_child(parent, node);
    } else {
        let div = doc.create_element(Tag::Div);
        doc.append_child(div, node);
        doc.append_child(parent, div);
    }
}

/// Locate the items covered by `start`..`end`.
///
/// An item is matched when it contains (or is) the position's node. A
/// missing end defaults to the list edge. When neither end falls in an item
/// but the whole list lies between them, every item is covered.
pub fn find_list_items(
    doc: &Document,
    items: &[ListItem],
    start: &Position,
    end: &Position,
) -> Option<(usize, usize)> {
    let (first_item, last_item) = (items.first()?, items.last()?);

    let start_index = items
        .iter()
        .rposition(|item| doc.contains_or_same(item.node, start.node));
    let end_index = items
        .iter()
        .rposition(|item| doc.contains_or_same(item.node, end.node));

    match (start_index, end_index) {
        (Some(first), Some(last)) if first <= last => Some((first, last)),
        (Some(_), Some(_)) => None,
        (Some(first), None) => Some((first, items.len() - 1)),
        (None, Some(last)) => Some((0, last)),
        (None, None) => {
            let starts_before = matches!(
                doc.relation(first_item.node, start.node),
                Relation::Preceding | Relation::Contains
            );
            let ends_after = matches!(
                doc.relation(last_item.node, end.node),
                Relation::Following | Relation::Contains
            );
            (starts_before && ends_after).then_some((0, items.len() - 1))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
