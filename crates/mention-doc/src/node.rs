#![forbid(unsafe_code)]

//! Document node model.
//!
//! A [`Document`] is an ordered sequence of [`Paragraph`] blocks; a paragraph
//! is an ordered sequence of [`Inline`] nodes. Callers branch on the
//! [`Inline`] tag, never on runtime type inspection.

use unicode_segmentation::UnicodeSegmentation;

/// A run of plain, editable text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    /// The text content.
    pub text: String,
}

impl TextRun {
    /// Create a text run.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An atomic mention of a user.
///
/// A mention is non-divisible and non-editable as a unit: the caret treats it
/// as a single position boundary and may not enter its interior. `text` is a
/// snapshot of the user's display name at insertion time; renaming the user
/// afterwards does not retroactively change already-inserted mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mention {
    /// Display name of the mentioned user.
    pub name: String,
    /// Target URL the mention links to. Empty means absent: the mention
    /// serializes as bare text instead of an anchor.
    pub url: String,
    /// Rendered text, snapshotted from the display name at insertion.
    pub text: String,
}

impl Mention {
    /// Create a mention whose rendered text snapshots the display name.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            text: name.clone(),
            name,
            url: url.into(),
        }
    }
}

/// An inline node: plain text or an atomic mention token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inline {
    /// Plain editable text.
    Text(TextRun),
    /// Atomic mention token.
    Mention(Mention),
}

impl Inline {
    /// Create a text inline.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextRun::new(text))
    }

    /// Number of caret units this node occupies: one per extended grapheme
    /// cluster for text, exactly one for a mention.
    #[must_use]
    pub fn units(&self) -> usize {
        match self {
            Self::Text(run) => run.text.graphemes(true).count(),
            Self::Mention(_) => 1,
        }
    }
}

/// A block node holding a sequence of inline children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paragraph {
    /// Inline children in document order.
    pub children: Vec<Inline>,
}

impl Paragraph {
    /// Create an empty paragraph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caret unit length of the paragraph.
    #[must_use]
    pub fn units(&self) -> usize {
        self.children.iter().map(Inline::units).sum()
    }

    /// Merge adjacent text runs and drop empty ones.
    ///
    /// Editing operations call this after every structural change so a
    /// paragraph never holds two adjacent text runs or an empty run.
    pub(crate) fn normalize(&mut self) {
        let mut merged: Vec<Inline> = Vec::with_capacity(self.children.len());
        for child in self.children.drain(..) {
            match child {
                Inline::Text(run) if run.text.is_empty() => {}
                Inline::Text(run) => {
                    if let Some(Inline::Text(prev)) = merged.last_mut() {
                        prev.text.push_str(&run.text);
                    } else {
                        merged.push(Inline::Text(run));
                    }
                }
                mention @ Inline::Mention(_) => merged.push(mention),
            }
        }
        self.children = merged;
    }
}

/// An ordered sequence of paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Block nodes in document order.
    pub blocks: Vec<Paragraph>,
}

impl Document {
    /// Create a document with one empty paragraph, the mount state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: vec![Paragraph::new()],
        }
    }

    /// Concatenated text of all text runs. Mention text is excluded.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            for child in &block.children {
                if let Inline::Text(run) = child {
                    out.push_str(&run.text);
                }
            }
        }
        out
    }

    /// Whether a mention with this exact display name exists anywhere.
    #[must_use]
    pub fn contains_mention(&self, name: &str) -> bool {
        self.blocks.iter().any(|block| {
            block
                .children
                .iter()
                .any(|child| matches!(child, Inline::Mention(m) if m.name == name))
        })
    }

    /// Whether the document has nothing to submit.
    ///
    /// True iff there are no mention nodes and the plain text trims to empty.
    /// The trim set is whitespace plus U+FEFF, matching the host platform's
    /// notion of trimmable characters around the line-break marker.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        let has_mention = self
            .blocks
            .iter()
            .any(|b| b.children.iter().any(|c| matches!(c, Inline::Mention(_))));
        !has_mention && trim_full(&self.plain_text()).is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim whitespace and U+FEFF from both ends.
pub(crate) fn trim_full(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}
