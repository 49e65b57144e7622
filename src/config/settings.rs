//! Settings and configuration types for listscope
//!
//! This module defines the user preferences consulted by list editing and
//! markdown import. Settings are serialized to JSON for persistence.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Markdown Import Settings
// ─────────────────────────────────────────────────────────────────────────────

/// GFM extensions enabled when importing markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownSettings {
    /// Pipe tables
    pub tables: bool,
    /// `~~strikethrough~~`
    pub strikethrough: bool,
    /// `- [ ] task` items
    pub tasklist: bool,
}

impl Default for MarkdownSettings {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklist: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences.
///
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `list-style-type` cycled through by ordered list depth.
    /// `None` leaves the browser default for that depth.
    pub ordered_list_styles: Vec<Option<String>>,

    /// Markdown import options
    pub markdown: MarkdownSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ordered_list_styles: Self::default_ordered_list_styles(),
            markdown: MarkdownSettings::default(),
        }
    }
}

impl Settings {
    /// Maximum number of entries in the ordered list style cycle.
    pub const MAX_ORDERED_LIST_STYLES: usize = 9;

    /// The default style cycle: decimal, then letters, then roman numerals.
    pub fn default_ordered_list_styles() -> Vec<Option<String>> {
        vec![
            None,
            Some("lower-alpha".to_string()),
            Some("lower-roman".to_string()),
        ]
    }

    /// Sanitize settings after loading a possibly hand-edited file.
    pub fn sanitize(&mut self) {
        // Blank style names mean "no style"
        for style in &mut self.ordered_list_styles {
            if style.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *style = None;
            } else if let Some(s) = style {
                *s = s.trim().to_string();
            }
        }

        if self.ordered_list_styles.is_empty() {
            self.ordered_list_styles = Self::default_ordered_list_styles();
        }
        self.ordered_list_styles
            .truncate(Self::MAX_ORDERED_LIST_STYLES);
    }

    /// Load settings and sanitize them to ensure validity.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
