//! Caret positions and selection ranges.

use super::tree::{Document, NodeId, Relation};

/// A point in the document: a node plus an offset inside it.
///
/// For text nodes the offset counts characters; for elements it counts
/// children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub node: NodeId,
    pub offset: usize,
    pub is_at_end: bool,
}

impl Position {
    /// Position before all content of `node`.
    pub fn begin(node: NodeId) -> Self {
        Self {
            node,
            offset: 0,
            is_at_end: false,
        }
    }

    /// Position after all content of `node`.
    pub fn end(doc: &Document, node: NodeId) -> Self {
        Self::new(doc, node, doc.node_length(node))
    }

    /// Position at `offset`, clamped to the length of `node`.
    pub fn new(doc: &Document, node: NodeId, offset: usize) -> Self {
        let length = doc.node_length(node);
        let offset = offset.min(length);
        Self {
            node,
            offset,
            is_at_end: length > 0 && offset == length,
        }
    }

    /// Descend to the deepest node the position points into.
    pub fn normalize(&self, doc: &Document) -> Position {
        let mut node = self.node;
        let mut offset = self.offset;

        while !doc.is_text(node) {
            let children = doc.children(node);
            let next = if self.is_at_end {
                children.last()
            } else {
                children.get(offset)
            };
            match next {
                Some(&child) => {
                    node = child;
                    offset = 0;
                }
                None => break,
            }
        }

        if self.is_at_end {
            Position::end(doc, node)
        } else {
            Position {
                node,
                offset,
                is_at_end: false,
            }
        }
    }

    pub fn equal_to(&self, other: &Position) -> bool {
        self.node == other.node && self.offset == other.offset
    }

    /// Whether this position comes strictly after `other`.
    pub fn is_after(&self, doc: &Document, other: &Position) -> bool {
        if self.node == other.node {
            self.offset > other.offset
        } else {
            doc.relation(other.node, self.node) == Relation::Following
        }
    }
}

/// An ordered pair of positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRange {
    start: Position,
    end: Position,
}

impl SelectionRange {
    /// Build a range from two ends in either order.
    pub fn new(doc: &Document, a: Position, b: Position) -> Self {
        if a.normalize(doc).is_after(doc, &b.normalize(doc)) {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    /// Range from the beginning of `start` to the end of `end`.
    pub fn spanning(doc: &Document, start: NodeId, end: NodeId) -> Self {
        Self::new(doc, Position::begin(start), Position::end(doc, end))
    }

    pub fn collapsed(position: Position) -> Self {
        Self {
            start: position.clone(),
            end: position,
        }
    }

    pub fn start(&self) -> &Position {
        &self.start
    }

    pub fn end(&self) -> &Position {
        &self.end
    }

    /// Both ends, normalized to leaf nodes.
    pub fn normalized(&self, doc: &Document) -> (Position, Position) {
        (self.start.normalize(doc), self.end.normalize(doc))
    }
}

/// How a node has to relate to a selection to be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionScope {
    /// The node lies inside an end node or wholly between the ends
    InSelection,
    /// Like `InSelection`, and also nodes holding either end
    OnSelection,
}

/// Whether `node` intersects the selection between `start` and `end`.
///
/// A node qualifies when it sits inside an end node, or when the start lies
/// before it and the end after it. `OnSelection` also accepts nodes holding
/// an end of the selection.
pub fn intersects_selection(
    doc: &Document,
    node: NodeId,
    start: &Position,
    end: &Position,
    scope: SelectionScope,
) -> bool {
    let to_start = doc.relation(node, start.node);
    let to_end = doc.relation(node, end.node);

    let is_target = |relation: Relation| match relation {
        Relation::Same | Relation::Contains => true,
        Relation::ContainedBy => scope == SelectionScope::OnSelection,
        _ => false,
    };
    let start_before = matches!(to_start, Relation::Preceding | Relation::Contains);

    is_target(to_start) || is_target(to_end) || (start_before && to_end == Relation::Following)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tag;

    #[test]
    fn test_normalize_descends_to_leaf() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, Tag::P);
        let text = doc.append_text(p, "hello");

        let begin = Position::begin(root).normalize(&doc);
        assert_eq!(begin.node, text);
        assert_eq!(begin.offset, 0);

        let end = Position::end(&doc, root).normalize(&doc);
        assert_eq!(end.node, text);
        assert_eq!(end.offset, 5);
        assert!(end.is_at_end);
    }

    #[test]
    fn test_is_after() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_text(root, "ab");
        let b = doc.append_text(root, "cd");

        assert!(Position::new(&doc, a, 2).is_after(&doc, &Position::new(&doc, a, 1)));
        assert!(Position::begin(b).is_after(&doc, &Position::end(&doc, a)));
        assert!(!Position::begin(a).is_after(&doc, &Position::begin(b)));
    }

    #[test]
    fn test_range_orders_ends() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_text(root, "ab");
        let b = doc.append_text(root, "cd");

        let range = SelectionRange::new(&doc, Position::begin(b), Position::begin(a));
        assert_eq!(range.start().node, a);
        assert_eq!(range.end().node, b);
    }

    #[test]
    fn test_intersects_selection_scopes() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = doc.append_element(root, Tag::P);
        let a = doc.append_text(first, "a");
        let middle = doc.append_element(root, Tag::Table);
        let last = doc.append_element(root, Tag::P);
        let b = doc.append_text(last, "b");
        let after = doc.append_element(root, Tag::P);

        let start = Position::begin(a);
        let end = Position::end(&doc, b);

        assert!(intersects_selection(&doc, middle, &start, &end, SelectionScope::InSelection));
        assert!(!intersects_selection(&doc, first, &start, &end, SelectionScope::InSelection));
        assert!(intersects_selection(&doc, first, &start, &end, SelectionScope::OnSelection));
        assert!(!intersects_selection(&doc, after, &start, &end, SelectionScope::OnSelection));
    }
}
