//! Editing commands
//!
//! Entry points that apply list edits to a selection. Each command splits
//! the selection into regions first, so a selection crossing table cells is
//! edited cell by cell and never restructures a table.

use crate::config::Settings;
use crate::dom::{BlockElement, Document, NodeId, SelectionRange, Tag};
use crate::error::Result;
use crate::list::{create_list_sections, create_merged_vlist, Indentation, ListKind, Section, VList};
use crate::region::{get_regions_from_range, Region};
use log::{debug, info};

/// Turn the selection into a `kind` list, or back into plain blocks when it
/// already is one.
///
/// Returns the number of regions edited.
pub fn toggle_list_type(
    doc: &mut Document,
    root: NodeId,
    range: &SelectionRange,
    kind: ListKind,
    settings: &Settings,
) -> Result<usize> {
    let (start, end) = range.normalized(doc);
    let regions = get_regions_from_range(doc, root, range);
    let mut edited = 0;

    for region in &regions {
        if let Some(mut vlist) = create_merged_vlist(doc, region)? {
            vlist.change_list_type(doc, &start, &end, kind);
            vlist.write_back(doc, &settings.ordered_list_styles)?;
            edited += 1;
        }
    }

    info!("Toggled {:?} list in {} region(s)", kind, edited);
    Ok(edited)
}

/// Toggle a bulleted list.
pub fn toggle_bullet(doc: &mut Document, root: NodeId, range: &SelectionRange, settings: &Settings) -> Result<usize> {
    toggle_list_type(doc, root, range, ListKind::Unordered, settings)
}

/// Toggle a numbered list.
pub fn toggle_numbering(
    doc: &mut Document,
    root: NodeId,
    range: &SelectionRange,
    settings: &Settings,
) -> Result<usize> {
    toggle_list_type(doc, root, range, ListKind::Ordered, settings)
}

/// Indent or outdent the selection.
///
/// List items change level. Plain blocks are wrapped in a `blockquote` when
/// indenting and pulled out of their enclosing `blockquote` when outdenting.
pub fn set_indentation(
    doc: &mut Document,
    root: NodeId,
    range: &SelectionRange,
    direction: Indentation,
    settings: &Settings,
) -> Result<usize> {
    let (start, end) = range.normalized(doc);
    let regions = get_regions_from_range(doc, root, range);
    let mut edited = 0;

    for region in &regions {
        let sections = create_list_sections(doc, region);
        if sections.is_empty() {
            continue;
        }

        for section in sections {
            match section {
                Section::List(list) => {
                    let mut vlist = VList::new(doc, list)?;
                    vlist.set_indentation(doc, &start, &end, direction);
                    vlist.write_back(doc, &settings.ordered_list_styles)?;
                }
                Section::Blocks(blocks) => match direction {
                    Indentation::Increase => indent_blocks(doc, region, &blocks),
                    Indentation::Decrease => outdent_blocks(doc, region, &blocks),
                },
            }
        }
        edited += 1;
    }

    info!("Changed indentation ({:?}) in {} region(s)", direction, edited);
    Ok(edited)
}

fn indent_blocks(doc: &mut Document, region: &Region, blocks: &[BlockElement]) {
    let (Some(first), Some(last)) = (blocks.first(), blocks.last()) else {
        return;
    };
    let nodes = region.collapse_nodes(doc, &[first.start_node(), last.end_node()]);
    if let Some(quote) = doc.wrap(&nodes, Tag::Blockquote) {
        debug!("Indented {} node(s) into {}", nodes.len(), quote);
    }
}

fn outdent_blocks(doc: &mut Document, region: &Region, blocks: &[BlockElement]) {
    for block in blocks {
        let mut node = block.collapse_to_single_element(doc);
        let Some(quote) = region.find_closest_element_ancestor(doc, node, |t| t == Tag::Blockquote) else {
            continue;
        };

        if node == quote {
            let children = doc.children(quote).to_vec();
            match doc.wrap(&children, Tag::Div) {
                Some(div) => node = div,
                None => continue,
            }
        }

        while region.contains(doc, node) && !doc.is_element(node, Tag::Blockquote) {
            match doc.split_balanced_node_range(node) {
                Some(parent) => node = parent,
                None => break,
            }
        }

        if region.contains(doc, node) && doc.is_element(node, Tag::Blockquote) {
            doc.unwrap(node);
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
                doc.append_text(p, t)
            })
            .collect()
    }

    #[test]
    fn test_toggle_numbering_round_trip() {
        let mut doc = Document::new();
        let root = doc.root();
        let texts = paragraphs(&mut doc, &["First", "Second"]);
        let range = SelectionRange::spanning(&doc, texts[0], texts[1]);
        let settings = Settings::default();

        assert_eq!(toggle_numbering(&mut doc, root, &range, &settings).unwrap(), 1);
        assert_eq!(
            to_html(&doc, root),
            "<ol><li><p>First</p></li><li><p>Second</p></li></ol>"
        );

        toggle_numbering(&mut doc, root, &range, &settings).unwrap();
        assert_eq!(to_html(&doc, root), "<p>First</p><p>Second</p>");
    }

    #[test]
    fn test_toggle_bullet_converts_numbered_list() {
        let mut doc = Document::new();
        let root = doc.root();
        let ol = doc.append_element(root, Tag::Ol);
        let li = doc.append_element(ol, Tag::Li);
        let text = doc.append_text(li, "item");
        let range = SelectionRange::spanning(&doc, text, text);

        toggle_bullet(&mut doc, root, &range, &Settings::default()).unwrap();
        assert_eq!(to_html(&doc, root), "<ul><li>item</li></ul>");
    }

    #[test]
    fn test_indent_and_outdent_plain_blocks() {
        let mut doc = Document::new();
        let root = doc.root();
        let texts = paragraphs(&mut doc, &["a", "b"]);
        let range = SelectionRange::spanning(&doc, texts[0], texts[1]);
        let settings = Settings::default();

        set_indentation(&mut doc, root, &range, Indentation::Increase, &settings).unwrap();
        assert_eq!(
            to_html(&doc, root),
            "<blockquote><p>a</p><p>b</p></blockquote>"
        );

        set_indentation(&mut doc, root, &range, Indentation::Decrease, &settings).unwrap();
        assert_eq!(to_html(&doc, root), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_outdent_splits_quote_around_block() {
        let mut doc = Document::new();
        let root = doc.root();
        let quote = doc.append_element(root, Tag::Blockquote);
        let mut texts = Vec::new();
        for t in ["a", "b", "c"] {
            let p = doc.append_element(quote, Tag::P);
            texts.push(doc.append_text(p, t));
        }
        let range = SelectionRange::spanning(&doc, texts[1], texts[1]);

        set_indentation(&mut doc, root, &range, Indentation::Decrease, &Settings::default())
            .unwrap();
        assert_eq!(
            to_html(&doc, root),
            "<blockquote><p>a</p></blockquote><p>b</p><blockquote><p>c</p></blockquote>"
        );
    }

    #[test]
    fn test_indent_list_item() {
        let mut doc = Document::new();
        let root = doc.root();
        let ol = doc.append_element(root, Tag::Ol);
        let mut texts = Vec::new();
        for t in ["a", "b"] {
            let li = doc.append_element(ol, Tag::Li);
            texts.push(doc.append_text(li, t));
        }
        let range = SelectionRange::spanning(&doc, texts[1], texts[1]);

        set_indentation(&mut doc, root, &range, Indentation::Increase, &Settings::default())
            .unwrap();
        assert_eq!(
            to_html(&doc, root),
            "<ol><li>a</li><ol style=\"list-style-type: lower-alpha\"><li>b</li></ol></ol>"
        );
    }

    #[test]
    fn test_toggle_inside_table_cell_keeps_table() {
        let mut doc = Document::new();
        let root = doc.root();
        let table = doc.append_element(root, Tag::Table);
        let tr = doc.append_element(table, Tag::Tr);
        let td = doc.append_element(tr, Tag::Td);
        let text = doc.append_text(td, "cell");
        let range = SelectionRange::spanning(&doc, text, text);

        assert_eq!(
            toggle_bullet(&mut doc, root, &range, &Settings::default()).unwrap(),
            1
        );
        assert_eq!(
            to_html(&doc, root),
            "<table><tr><td><ul><li><div>cell</div></li></ul></td></tr></table>"
        );
    }
}
