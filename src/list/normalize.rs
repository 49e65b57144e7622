//! List repair
//!
//! Browsers and hand-written HTML produce lists that do not match the
//! container/item shape the flattener expects. Repair runs before any
//! list is viewed:
//!
//! 1. Stray non-item content in a list container is moved into the item
//!    before it, wrapped in a `div`.
//! 2. Items nested inside other items (rather than through a child list)
//!    are hoisted until their parent is a list container.
//! 3. A list container held directly by an item is lifted out to follow
//!    that item, so every nested list is a child of a list container.
//!
//! Repair is idempotent.

use crate::dom::{Document, NodeId, Tag};
use crate::error::{Error, Result};
use log::debug;

/// A list container whose subtree has been repaired.
///
/// Only [`normalize_list`] creates one, so viewing a list always happens
/// after repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedList(NodeId);

impl NormalizedList {
    pub fn root(&self) -> NodeId {
        self.0
    }
}

/// Repair `list` in place.
///
/// # Errors
///
/// Returns `Error::NotAListContainer` when `list` is not `ol`/`ul`. The tree
/// is untouched in that case.
pub fn normalize_list(doc: &mut Document, list: NodeId) -> Result<NormalizedList> {
    if !doc.is_list(list) {
        return Err(Error::NotAListContainer(list));
    }

    let nested: Vec<NodeId> = doc
        .descendants(list)
        .into_iter()
        .filter(|&n| doc.is_list(n))
        .collect();
    move_child_nodes_to_li(doc, list);
    for container in nested {
        move_child_nodes_to_li(doc, container);
    }

    for item in list_items(doc, list) {
        move_li_to_list(doc, item);
    }

    for item in list_items(doc, list) {
        lift_nested_lists(doc, item);
    }

    Ok(NormalizedList(list))
}

fn list_items(doc: &Document, list: NodeId) -> Vec<NodeId> {
    doc.descendants(list)
        .into_iter()
        .filter(|&n| doc.is_element(n, Tag::Li))
        .collect()
}

/// Move non-empty content that is a direct child of `list` into the
/// preceding item.
fn move_child_nodes_to_li(doc: &mut Document, list: NodeId) {
    let mut current_item: Option<NodeId> = None;
    let mut wrapper: Option<NodeId> = None;

    for child in doc.children(list).to_vec() {
        if doc.is_element(child, Tag::Li) {
            current_item = Some(child);
            wrapper = None;
        } else if doc.is_list(child) {
            current_item = None;
            wrapper = None;
        } else if let Some(item) = current_item {
            if doc.is_node_empty(child, true) {
                continue;
            }
            let target = match wrapper {
                Some(div) => div,
                None => {
                    let div = doc.append_element(item, Tag::Div);
                    wrapper = Some(div);
                    div
                }
            };
            doc.append_child(target, child);
        }
    }
}

/// Hoist `item` out of non-list ancestors.
fn move_li_to_list(doc: &mut Document, item: NodeId) {
    loop {
        let Some(parent) = doc.parent(item) else {
            return;
        };
        if doc.is_list(parent) || doc.parent(parent).is_none() {
            return;
        }

        doc.split_parent_node(item, true);

        let further = doc.children(parent)[1..].to_vec();
        if let Some(&first) = further.first() {
            let moving = if doc.is_block(first) {
                further
            } else {
                doc.wrap(&further, Tag::Div).into_iter().collect()
            };
            for node in moving {
                doc.append_child(item, node);
            }
        }

        debug!("Hoisting list item {} out of {}", item, parent);
        doc.unwrap(parent);
    }
}

/// Move list containers held by `item` out to follow it.
///
/// Content after a lifted list stays at the item's depth in a copy of the
/// item. An item left with no children is removed.
fn lift_nested_lists(doc: &mut Document, item: NodeId) {
    let mut current = item;

    loop {
        let Some(parent) = doc.parent(current) else {
            return;
        };
        let Some(nested) = doc
            .children(current)
            .iter()
            .copied()
            .find(|&c| doc.is_list(c))
        else {
            return;
        };

        let rest = doc.split_parent_node(nested, false);
        let reference = doc.next_sibling(current);
        doc.insert_before(parent, nested, reference);

        if doc.children(current).is_empty() {
            doc.detach(current);
        }

        match rest {
            Some(copy) => current = copy,
            None => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::html::to_html;

    fn list_with_items(doc: &mut Document, tag: Tag, items: &[&str]) -> NodeId {
        let root = doc.root();
        let list = doc.append_element(root, tag);
        for text in items {
            let li = doc.append_element(list, Tag::Li);
            doc.append_text(li, text);
        }
        list
    }

    #[test]
    fn test_rejects_non_list_root() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.append_element(root, Tag::Div);

        let result = normalize_list(&mut doc, div);
        assert!(matches!(result, Err(Error::NotAListContainer(n)) if n == div));
    }

    #[test]
    fn test_stray_content_moves_into_previous_item() {
        let mut doc = Document::new();
        let list = list_with_items(&mut doc, Tag::Ol, &["a"]);
        doc.append_text(list, "stray");
        doc.append_text(list, " more");
        let li = doc.append_element(list, Tag::Li);
        doc.append_text(li, "b");

        normalize_list(&mut doc, list).unwrap();
        assert_eq!(
            to_html(&doc, doc.root()),
            "<ol><li>a<div>stray more</div></li><li>b</li></ol>"
        );
    }

    #[test]
    fn test_item_inside_item_is_hoisted() {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc.append_element(root, Tag::Ol);
        let outer = doc.append_element(list, Tag::Li);
        doc.append_text(outer, "line 1");
        let inner = doc.append_element(outer, Tag::Li);
        doc.append_text(inner, "line 2");
        doc.append_text(outer, "line 3");

        normalize_list(&mut doc, list).unwrap();
        assert_eq!(
            to_html(&doc, root),
            "<ol><li>line 1</li><li>line 2<div>line 3</div></li></ol>"
        );
    }

    #[test]
    fn test_nested_list_inside_item_is_lifted() {
        let mut doc = Document::new();
        let list = list_with_items(&mut doc, Tag::Ul, &["a"]);
        let item = doc.first_child(list).unwrap();
        let nested = doc.append_element(item, Tag::Ul);
        let li = doc.append_element(nested, Tag::Li);
        doc.append_text(li, "b");

        normalize_list(&mut doc, list).unwrap();
        assert_eq!(
            to_html(&doc, doc.root()),
            "<ul><li>a</li><ul><li>b</li></ul></ul>"
        );
    }

    #[test]
    fn test_content_after_lifted_list_keeps_item_depth() {
        let mut doc = Document::new();
        let list = list_with_items(&mut doc, Tag::Ol, &["a"]);
        let item = doc.first_child(list).unwrap();
        let nested = doc.append_element(item, Tag::Ol);
        let li = doc.append_element(nested, Tag::Li);
        doc.append_text(li, "b");
        let p = doc.append_element(item, Tag::P);
        doc.append_text(p, "tail");

        normalize_list(&mut doc, list).unwrap();
        assert_eq!(
            to_html(&doc, doc.root()),
            "<ol><li>a</li><ol><li>b</li></ol><li><p>tail</p></li></ol>"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut doc = Document::new();
        let list = list_with_items(&mut doc, Tag::Ol, &["a", "b"]);
        doc.append_text(list, "stray");

        normalize_list(&mut doc, list).unwrap();
        let once = to_html(&doc, doc.root());
        normalize_list(&mut doc, list).unwrap();
        assert_eq!(to_html(&doc, doc.root()), once);
    }
}
