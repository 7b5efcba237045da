#![forbid(unsafe_code)]

//! Editing buffer: a document plus a caret.
//!
//! The caret addresses the document in **unit space**: every extended
//! grapheme cluster of a text run is one unit and every mention node is one
//! atomic unit, so the caret can sit before or after a mention but never
//! inside it. Grapheme-cluster aware for correct Unicode handling.
//!
//! All mutations happen synchronously within a single event; there is no
//! overlapping mutation of the document.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::DocError;
use crate::node::{Document, Inline, Mention, Paragraph};

/// Caret position: a block index and a unit offset within that block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Caret {
    /// Index of the paragraph holding the caret.
    pub block: usize,
    /// Unit offset within the paragraph.
    pub offset: usize,
}

/// What sits immediately after the caret, for trigger detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Following<'a> {
    /// Nothing: the caret is at the end of its paragraph.
    Empty,
    /// Text continues; the slice is the rest of the current run.
    Text(&'a str),
    /// An atomic node (mention) follows directly.
    Node,
}

/// Where a unit offset lands inside a paragraph.
enum Place {
    /// Inside (or at an edge of) the text run at `inline`, `byte` bytes in.
    Text { inline: usize, byte: usize },
    /// At a node boundary, before the child at `inline`
    /// (`inline == children.len()` is the paragraph end).
    Gap { inline: usize },
}

/// The unit at a given offset.
enum UnitRef {
    /// One grapheme of the text run at `inline`, spanning `start..end` bytes.
    Grapheme {
        inline: usize,
        start: usize,
        end: usize,
    },
    /// The mention node at `inline`.
    Mention { inline: usize },
}

/// A document with a caret and the editing operations of the composer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Buffer {
    doc: Document,
    caret: Caret,
}

impl Buffer {
    /// Create a buffer holding one empty paragraph, caret at its start.
    #[must_use]
    pub fn new() -> Self {
        Self {
            doc: Document::new(),
            caret: Caret::default(),
        }
    }

    /// The underlying document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Current caret position.
    #[must_use]
    pub fn caret(&self) -> Caret {
        self.caret
    }

    /// Unit length of the paragraph holding the caret.
    #[must_use]
    pub fn current_units(&self) -> usize {
        self.block().units()
    }

    /// Reset to one empty paragraph with the caret at its start.
    pub fn reset(&mut self) {
        self.doc = Document::new();
        self.caret = Caret::default();
    }

    // --- Text editing ---

    /// Insert a single character at the caret.
    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Insert text at the caret.
    ///
    /// Control characters other than `\n` are dropped; `\n` is a line break
    /// within the current paragraph. Adjacent text runs are merged afterwards.
    pub fn insert_str(&mut self, text: &str) {
        let clean: String = text.chars().filter(|c| !c.is_control() || *c == '\n').collect();
        if clean.is_empty() {
            return;
        }

        let offset = self.caret.offset.min(self.current_units());
        let before = self.current_units();
        let block = self.block_mut();
        match place(block, offset) {
            Place::Text { inline, byte } => {
                if let Inline::Text(run) = &mut block.children[inline] {
                    run.text.insert_str(byte, &clean);
                }
            }
            Place::Gap { inline } => {
                block.children.insert(inline, Inline::text(clean));
            }
        }
        block.normalize();
        let after = self.current_units();
        // A combining mark can merge into the preceding grapheme, in which
        // case the unit count (and the caret) stays where it was.
        self.caret.offset = (offset + after.saturating_sub(before)).min(after);
    }

    /// Delete the unit before the caret. A mention is removed whole.
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.caret.offset == 0 {
            return false;
        }
        let target = self.caret.offset - 1;
        if self.remove_unit(target) {
            self.caret.offset = target;
            true
        } else {
            false
        }
    }

    /// Delete the unit after the caret. A mention is removed whole.
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        self.remove_unit(self.caret.offset)
    }

    fn remove_unit(&mut self, offset: usize) -> bool {
        let block = self.block_mut();
        let Some(unit) = unit_ref(block, offset) else {
            return false;
        };
        match unit {
            UnitRef::Grapheme { inline, start, end } => {
                if let Inline::Text(run) = &mut block.children[inline] {
                    run.text.drain(start..end);
                }
            }
            UnitRef::Mention { inline } => {
                block.children.remove(inline);
            }
        }
        block.normalize();
        true
    }

    // --- Mention insertion ---

    /// Replace a unit range in the caret's paragraph with a single mention.
    ///
    /// The range must lie inside one text run (trigger spans always do). An
    /// empty range degenerates to a zero-width insert at its start. On
    /// success the caret lands immediately after the inserted node.
    pub fn replace_units(&mut self, range: Range<usize>, mention: Mention) -> Result<(), DocError> {
        let len = self.current_units();
        if range.start > range.end || range.end > len {
            return Err(DocError::UnitOutOfBounds {
                position: range.end.max(range.start),
                len,
            });
        }
        if range.is_empty() {
            self.caret.offset = range.start;
            self.insert_mention(mention);
            return Ok(());
        }

        let block = self.block_mut();
        let (first, last) = match (unit_ref(block, range.start), unit_ref(block, range.end - 1)) {
            (
                Some(UnitRef::Grapheme {
                    inline: a, start, ..
                }),
                Some(UnitRef::Grapheme { inline: b, end, .. }),
            ) if a == b => ((a, start), end),
            _ => {
                return Err(DocError::RangeCrossesNode {
                    start: range.start,
                    end: range.end,
                });
            }
        };
        let (inline, byte_start) = first;
        let byte_end = last;

        let (left, right) = match &block.children[inline] {
            Inline::Text(run) => (
                run.text[..byte_start].to_string(),
                run.text[byte_end..].to_string(),
            ),
            Inline::Mention(_) => {
                return Err(DocError::RangeCrossesNode {
                    start: range.start,
                    end: range.end,
                });
            }
        };
        splice_run(block, inline, left, mention, right);
        self.caret.offset = range.start + 1;
        Ok(())
    }

    /// Insert a mention at the caret, splitting the current run if needed.
    ///
    /// The caret lands immediately after the inserted node.
    pub fn insert_mention(&mut self, mention: Mention) {
        let offset = self.caret.offset.min(self.current_units());
        let block = self.block_mut();
        match place(block, offset) {
            Place::Text { inline, byte } => {
                if let Inline::Text(run) = &block.children[inline] {
                    let left = run.text[..byte].to_string();
                    let right = run.text[byte..].to_string();
                    splice_run(block, inline, left, mention, right);
                } else {
                    block.children.insert(inline, Inline::Mention(mention));
                    block.normalize();
                }
            }
            Place::Gap { inline } => {
                block.children.insert(inline, Inline::Mention(mention));
                block.normalize();
            }
        }
        self.caret.offset = offset + 1;
    }

    // --- Caret movement ---

    /// Move one unit left. Returns `true` if the caret moved.
    pub fn move_left(&mut self) -> bool {
        if self.caret.offset > 0 {
            self.caret.offset -= 1;
            true
        } else {
            false
        }
    }

    /// Move one unit right. Returns `true` if the caret moved.
    pub fn move_right(&mut self) -> bool {
        if self.caret.offset < self.current_units() {
            self.caret.offset += 1;
            true
        } else {
            false
        }
    }

    /// Move to the start of the current paragraph.
    pub fn move_home(&mut self) {
        self.caret.offset = 0;
    }

    /// Move to the end of the current paragraph.
    pub fn move_end(&mut self) {
        self.caret.offset = self.current_units();
    }

    /// Move to the very end of the document.
    pub fn move_doc_end(&mut self) {
        self.caret.block = self.doc.blocks.len().saturating_sub(1);
        self.caret.offset = self.current_units();
    }

    // --- Trigger context ---

    /// Text of the caret's run up to the caret.
    ///
    /// `None` when the caret sits at a node boundary rather than in a run.
    #[must_use]
    pub fn text_before_caret(&self) -> Option<&str> {
        let block = self.block();
        match place(block, self.caret.offset.min(block.units())) {
            Place::Text { inline, byte } => match &block.children[inline] {
                Inline::Text(run) => Some(&run.text[..byte]),
                Inline::Mention(_) => None,
            },
            Place::Gap { .. } => None,
        }
    }

    /// What sits immediately after the caret.
    #[must_use]
    pub fn following(&self) -> Following<'_> {
        let block = self.block();
        match place(block, self.caret.offset.min(block.units())) {
            Place::Text { inline, byte } => {
                let Inline::Text(run) = &block.children[inline] else {
                    return Following::Node;
                };
                let rest = &run.text[byte..];
                if !rest.is_empty() {
                    Following::Text(rest)
                } else {
                    match block.children.get(inline + 1) {
                        None => Following::Empty,
                        Some(Inline::Mention(_)) => Following::Node,
                        Some(Inline::Text(next)) => Following::Text(&next.text),
                    }
                }
            }
            Place::Gap { inline } => match block.children.get(inline) {
                None => Following::Empty,
                Some(Inline::Mention(_)) => Following::Node,
                Some(Inline::Text(run)) => Following::Text(&run.text),
            },
        }
    }

    // --- Internal helpers ---

    fn block(&self) -> &Paragraph {
        let idx = self.caret.block.min(self.doc.blocks.len() - 1);
        &self.doc.blocks[idx]
    }

    fn block_mut(&mut self) -> &mut Paragraph {
        let idx = self.caret.block.min(self.doc.blocks.len() - 1);
        &mut self.doc.blocks[idx]
    }
}

/// Replace the run at `inline` with `left`, the mention, and `right`,
/// dropping empty sides, then re-normalize.
fn splice_run(block: &mut Paragraph, inline: usize, left: String, mention: Mention, right: String) {
    block.children.remove(inline);
    let mut at = inline;
    if !left.is_empty() {
        block.children.insert(at, Inline::text(left));
        at += 1;
    }
    block.children.insert(at, Inline::Mention(mention));
    if !right.is_empty() {
        block.children.insert(at + 1, Inline::text(right));
    }
    block.normalize();
}

fn grapheme_byte_offset(s: &str, grapheme_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(grapheme_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn place(block: &Paragraph, offset: usize) -> Place {
    let mut remaining = offset;
    for (i, child) in block.children.iter().enumerate() {
        match child {
            Inline::Text(run) => {
                let count = run.text.graphemes(true).count();
                if remaining <= count {
                    return Place::Text {
                        inline: i,
                        byte: grapheme_byte_offset(&run.text, remaining),
                    };
                }
                remaining -= count;
            }
            Inline::Mention(_) => {
                if remaining == 0 {
                    return Place::Gap { inline: i };
                }
                remaining -= 1;
            }
        }
    }
    Place::Gap {
        inline: block.children.len(),
    }
}

fn unit_ref(block: &Paragraph, offset: usize) -> Option<UnitRef> {
    let mut remaining = offset;
    for (i, child) in block.children.iter().enumerate() {
        match child {
            Inline::Text(run) => {
                let count = run.text.graphemes(true).count();
                if remaining < count {
                    return Some(UnitRef::Grapheme {
                        inline: i,
                        start: grapheme_byte_offset(&run.text, remaining),
                        end: grapheme_byte_offset(&run.text, remaining + 1),
                    });
                }
                remaining -= count;
            }
            Inline::Mention(_) => {
                if remaining == 0 {
                    return Some(UnitRef::Mention { inline: i });
                }
                remaining -= 1;
            }
        }
    }
    None
}
