//! HTML Serialization
//!
//! Renders document subtrees as HTML, either as a bare fragment or as a
//! standalone page.

use super::tree::{Document, NodeId, NodeKind};

// ─────────────────────────────────────────────────────────────────────────────
// Fragment Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render the children of `node`.
pub fn to_html(doc: &Document, node: NodeId) -> String {
    let mut output = String::new();
    for &child in doc.children(node) {
        write_node(doc, child, &mut output);
    }
    output
}

/// Render `node` including its own tag.
pub fn outer_html(doc: &Document, node: NodeId) -> String {
    let mut output = String::new();
    write_node(doc, node, &mut output);
    output
}

fn write_node(doc: &Document, node: NodeId, output: &mut String) {
    match doc.kind(node) {
        NodeKind::Text(text) => output.push_str(&html_escape(text)),
        NodeKind::Fragment => {
            for &child in doc.children(node) {
                write_node(doc, child, output);
            }
        }
        NodeKind::Element(tag) => {
            let name = tag.name();
            output.push('<');
            output.push_str(name);
            if let Some(style) = doc.list_style(node) {
                output.push_str(&format!(
                    " style=\"list-style-type: {}\"",
                    html_escape(style)
                ));
            }
            output.push('>');

            if tag.is_void() {
                return;
            }

            for &child in doc.children(node) {
                write_node(doc, child, output);
            }
            output.push_str("</");
            output.push_str(name);
            output.push('>');
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render the whole document as a standalone HTML page.
pub fn generate_html_document(doc: &Document, title: Option<&str>) -> String {
    let doc_title = title.unwrap_or("Document");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="generator" content="listscope">
    <title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = html_escape(doc_title),
        body = to_html(doc, doc.root()),
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
