//! listscope - structural list editing for rich-text documents
//!
//! Flattens nested lists into an editable item sequence, splits selections
//! into table-cell-safe regions, and applies indentation and list-type
//! commands across them.

pub mod commands;
pub mod config;
pub mod dom;
pub mod error;
pub mod list;
pub mod markdown;
pub mod region;

pub use commands::{set_indentation, toggle_bullet, toggle_list_type, toggle_numbering};
pub use error::{Error, Result};
