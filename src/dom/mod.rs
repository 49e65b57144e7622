//! Document tree module
//!
//! The in-memory tree edited by list and region operations, with caret
//! positions, block enumeration and HTML rendering.

mod block;
pub mod html;
mod position;
mod tree;

pub use block::BlockElement;
pub use position::{intersects_selection, Position, SelectionRange, SelectionScope};
pub use tree::{Document, NodeId, NodeKind, Relation, Tag};
