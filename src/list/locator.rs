//! List location
//!
//! Partitions the selected blocks of a region into sections (whole list
//! containers or runs of plain blocks), then virtualizes and merges them,
//! pulling in a list directly before or after the selection so adjacent
//! lists join up.

use super::VList;
use crate::dom::{BlockElement, Document, NodeId, Tag};
use crate::error::Result;
use crate::region::Region;
use log::debug;

/// A slice of the selection inside one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// A top-level list container inside the region
    List(NodeId),
    /// Consecutive blocks that are not in any list
    Blocks(Vec<BlockElement>),
}

/// Outermost list container holding `node` without leaving `region`.
fn top_level_list(doc: &Document, region: &Region, node: NodeId) -> Option<NodeId> {
    let mut list = region.find_closest_element_ancestor(doc, node, Tag::is_list)?;
    while let Some(parent) = doc.parent(list) {
        match region.find_closest_element_ancestor(doc, parent, Tag::is_list) {
            Some(outer) => list = outer,
            None => break,
        }
    }
    Some(list)
}

/// Partition the selected blocks of `region` into sections.
///
/// Whitespace-only runs are skipped and each list container appears at most
/// once. The tree is not modified.
pub fn create_list_sections(doc: &Document, region: &Region) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut used_lists: Vec<NodeId> = Vec::new();

    for block in region.selected_block_elements(doc) {
        if block.is_blank(doc) {
            continue;
        }

        match top_level_list(doc, region, block.start_node()) {
            Some(list) => {
                if !used_lists.contains(&list) {
                    used_lists.push(list);
                    sections.push(Section::List(list));
                }
            }
            None => match sections.last_mut() {
                Some(Section::Blocks(blocks)) => blocks.push(block),
                _ => sections.push(Section::Blocks(vec![block])),
            },
        }
    }

    sections
}

/// Build one list covering the selection in `region`.
///
/// A list immediately before or after the selection is merged in as well.
/// Returns `None` when the region has nothing to virtualize.
pub fn create_merged_vlist(doc: &mut Document, region: &Region) -> Result<Option<VList>> {
    let mut sections = create_list_sections(doc, region);
    if sections.is_empty() {
        return Ok(None);
    }

    let before = adjacent_list(doc, region, &sections, false);
    let after = adjacent_list(doc, region, &sections, true);
    if let Some(list) = before {
        if !sections.contains(&Section::List(list)) {
            sections.insert(0, Section::List(list));
        }
    }
    if let Some(list) = after {
        if !sections.contains(&Section::List(list)) {
            sections.push(Section::List(list));
        }
    }

    let mut merged: Option<VList> = None;
    for section in sections {
        let vlist = match section {
            Section::List(list) => Some(VList::new(doc, list)?),
            Section::Blocks(blocks) => {
                let nodes: Vec<NodeId> = blocks
                    .iter()
                    .map(|block| block.collapse_to_single_element(doc))
                    .collect();
                let run = region.collapse_nodes(doc, &nodes);
                VList::from_nodes(doc, &run)?
            }
        };

        if let Some(vlist) = vlist {
            merged = Some(match merged.take() {
                Some(mut target) => {
                    target.merge_vlist(doc, vlist);
                    target
                }
                None => vlist,
            });
        }
    }

    Ok(merged)
}

/// The list for the single node `node`, if it is inside one.
pub fn create_vlist_from_node(doc: &mut Document, region: &Region, node: NodeId) -> Result<Option<VList>> {
    match top_level_list(doc, region, node) {
        Some(list) => Ok(Some(VList::new(doc, list)?)),
        None => Ok(None),
    }
}

/// Top-level list of the block just before (or after) the sections, if
/// that block lies inside the region.
fn adjacent_list(doc: &Document, region: &Region, sections: &[Section], is_next: bool) -> Option<NodeId> {
    let section = if is_next {
        sections.last()?
    } else {
        sections.first()?
    };
    let blocks = doc.block_elements(region.root(), true);

    let index = match section {
        Section::List(list) => {
            let inside = |b: &BlockElement| doc.contains_or_same(*list, b.start_node());
            if is_next {
                blocks.iter().rposition(inside)
            } else {
                blocks.iter().position(inside)
            }
        }
        Section::Blocks(selected) => {
            let edge = if is_next {
                selected.last()?
            } else {
                selected.first()?
            };
            blocks.iter().position(|b| b == edge)
        }
    }?;

    let neighbour = if is_next {
        blocks.get(index + 1)?
    } else {
        blocks.get(index.checked_sub(1)?)?
    };
    if !region.contains_block(doc, neighbour) {
        return None;
    }

    let list = top_level_list(doc, region, neighbour.start_node())?;
    debug!("Found adjacent list {} next to the selection", list);
    Some(list)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::html::to_html;
    use crate::dom::SelectionRange;
    use crate::list::{ListKind, VList};

    fn paragraph(doc: &mut Document, text: &str) -> (NodeId, NodeId) {
        let root = doc.root();
        let p = doc.append_element(root, Tag::P);
        let t = doc.append_text(p, text);
        (p, t)
    }

    fn list(doc: &mut Document, tag: Tag, items: &[&str]) -> (NodeId, Vec<NodeId>) {
        let root = doc.root();
        let list = doc.append_element(root, tag);
        let texts = items
            .iter()
            .map(|t| {
                let li = doc.append_element(list, Tag::Li);
                doc.append_text(li, t)
            })
            .collect();
        (list, texts)
    }

    fn whole_region(doc: &Document, start: NodeId, end: NodeId) -> Region {
        let range = SelectionRange::spanning(doc, start, end);
        Region::new(doc, doc.root(), &range, None, None)
    }

    #[test]
    fn test_sections_split_lists_and_blocks() {
        let mut doc = Document::new();
        let (p1, t1) = paragraph(&mut doc, "one");
        let (ol, _) = list(&mut doc, Tag::Ol, &["a", "b"]);
        let (p2, t2) = paragraph(&mut doc, "two");

        let region = whole_region(&doc, t1, t2);
        assert_eq!(
            create_list_sections(&doc, &region),
            vec![
                Section::Blocks(vec![BlockElement::Node(p1)]),
                Section::List(ol),
                Section::Blocks(vec![BlockElement::Node(p2)]),
            ]
        );
    }

    #[test]
    fn test_sections_use_each_list_once() {
        let mut doc = Document::new();
        let (ol, texts) = list(&mut doc, Tag::Ol, &["a", "b", "c"]);

        let region = whole_region(&doc, texts[0], texts[2]);
        assert_eq!(create_list_sections(&doc, &region), vec![Section::List(ol)]);
    }

    #[test]
    fn test_sections_resolve_nested_list_to_top_level() {
        let mut doc = Document::new();
        let (ol, _) = list(&mut doc, Tag::Ol, &["a"]);
        let nested = doc.append_element(ol, Tag::Ul);
        let li = doc.append_element(nested, Tag::Li);
        let text = doc.append_text(li, "deep");

        let region = whole_region(&doc, text, text);
        assert_eq!(create_list_sections(&doc, &region), vec![Section::List(ol)]);
    }

    #[test]
    fn test_merged_vlist_pulls_in_adjacent_list() {
        let mut doc = Document::new();
        let (ol, _) = list(&mut doc, Tag::Ol, &["a", "b"]);
        let (_, text) = paragraph(&mut doc, "c");

        let region = whole_region(&doc, text, text);
        let vlist = create_merged_vlist(&mut doc, &region).unwrap().unwrap();

        assert_eq!(vlist.root(), ol);
        assert_eq!(vlist.items().len(), 3);
        assert_eq!(vlist.items()[2].level, 0);
        assert_eq!(vlist.items()[2].kind, ListKind::None);
    }

    #[test]
    fn test_merged_vlist_numbering_joins_previous_list() {
        let mut doc = Document::new();
        list(&mut doc, Tag::Ol, &["a", "b"]);
        let (_, text) = paragraph(&mut doc, "c");
        let root = doc.root();

        let region = whole_region(&doc, text, text);
        let mut vlist = create_merged_vlist(&mut doc, &region).unwrap().unwrap();
        let range = SelectionRange::spanning(&doc, text, text);
        vlist.change_list_type(&mut doc, range.start(), range.end(), ListKind::Ordered);
        vlist.write_back(&mut doc, &[None]).unwrap();

        assert_eq!(
            to_html(&doc, root),
            "<ol><li>a</li><li>b</li><li><p>c</p></li></ol>"
        );
    }

    #[test]
    fn test_merged_vlist_empty_region_is_none() {
        let mut doc = Document::new();
        let root = doc.root();
        let space = doc.append_text(root, "   ");

        let region = whole_region(&doc, space, space);
        assert!(create_merged_vlist(&mut doc, &region).unwrap().is_none());
    }

    #[test]
    fn test_vlist_from_node() {
        let mut doc = Document::new();
        let (ol, texts) = list(&mut doc, Tag::Ol, &["a"]);
        let (_, plain) = paragraph(&mut doc, "plain");

        let region = whole_region(&doc, texts[0], plain);
        let vlist: Option<VList> = create_vlist_from_node(&mut doc, &region, texts[0]).unwrap();
        assert_eq!(vlist.map(|v| v.root()), Some(ol));
        assert!(create_vlist_from_node(&mut doc, &region, plain).unwrap().is_none());
    }
}
