//! Configuration module for listscope
//!
//! This module handles user preferences (ordered list styles, markdown
//! import options), including serialization to/from JSON and persistent
//! storage in platform-specific directories.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
