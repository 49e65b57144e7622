//! Markdown import module
//!
//! Parses markdown with comrak, a CommonMark + GFM compatible parser, and
//! builds an editable document tree from it.
//!
//! # Example
//! ```ignore
//! use crate::markdown::parse_markdown;
//!
//! let doc = parse_markdown("1. one\n2. two")?;
//! ```

mod parser;

pub use parser::{parse_markdown, parse_markdown_with_options};
