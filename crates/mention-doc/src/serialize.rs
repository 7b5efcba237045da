#![forbid(unsafe_code)]

//! One-way document-to-HTML serialization.
//!
//! Produces the minimal HTML string the backend stores: escaped text,
//! `<p>`-wrapped paragraphs with trimmed edges, mentions as anchors. The
//! output lands in both text and attribute positions downstream, so the
//! full five-character escape set (`& < > " '`) is applied everywhere.

use std::borrow::Cow;

use htmlize::escape_attribute;

use crate::node::{trim_full, Document, Inline, Paragraph};

/// Serialize the whole document: concatenated paragraphs, no separators.
#[must_use]
pub fn to_html(doc: &Document) -> String {
    doc.blocks.iter().map(paragraph).collect()
}

fn paragraph(block: &Paragraph) -> String {
    let children: String = block.children.iter().map(inline).collect();
    format!("<p>{}</p>", trim_full(&children))
}

fn inline(node: &Inline) -> Cow<'_, str> {
    match node {
        Inline::Text(run) => escape_attribute(&run.text),
        Inline::Mention(m) => {
            let text = escape_attribute(&m.text);
            if m.url.is_empty() {
                text
            } else {
                Cow::Owned(format!(
                    "<a href=\"{}\">{}</a>",
                    escape_attribute(&m.url),
                    text
                ))
            }
        }
    }
}
