//! List virtualization
//!
//! Nested `ol`/`ul`/`li` structures are flattened into a sequence of
//! [`ListItem`]s, edited as a flat sequence, and rebuilt into a tree.
//!
//! # Example
//!
//! ```ignore
//! let mut vlist = VList::new(&mut doc, list)?;
//! vlist.set_indentation(&mut doc, &start, &end, Indentation::Increase);
//! vlist.write_back(&mut doc, &settings.ordered_list_styles)?;
//! ```

mod locator;
mod normalize;
mod vlist;

pub use locator::{create_list_sections, create_merged_vlist, create_vlist_from_node, Section};
pub use normalize::{normalize_list, NormalizedList};
pub use vlist::{find_list_items, VList};

use crate::dom::{Document, NodeId, Tag};

/// Kind of list an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Not in a list
    None,
    Ordered,
    Unordered,
}

impl ListKind {
    /// Kind implied by a list container (`ul` is unordered, anything else ordered).
    pub fn of_container(doc: &Document, container: NodeId) -> Self {
        if doc.is_element(container, Tag::Ul) {
            ListKind::Unordered
        } else {
            ListKind::Ordered
        }
    }

    /// Container tag used when rebuilding a list of this kind.
    pub fn container_tag(self) -> Tag {
        match self {
            ListKind::Ordered => Tag::Ol,
            ListKind::Unordered | ListKind::None => Tag::Ul,
        }
    }
}

/// One flattened list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem {
    /// Usually an `li`; plain blocks appear at level 0
    pub node: NodeId,
    /// Nesting depth, 0 meaning outside any list
    pub level: usize,
    pub kind: ListKind,
}

/// Direction of an indentation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indentation {
    Increase,
    Decrease,
}
