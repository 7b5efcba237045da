#![forbid(unsafe_code)]

//! Trigger detection and suggestion state.
//!
//! While the user types, the composer watches for an unconsumed `@` followed
//! by a partial name directly before the caret. When one is present, a
//! [`SuggestionState`] tracks the trigger span, the query, the filtered
//! candidate list, and the highlighted entry. The state is pure derived
//! data: it is recomputed after every document change and never persisted.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use mention_core::UserDirectory;
use mention_doc::{Buffer, Following};

/// Default cap on the number of suggested candidates.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// An `@` followed by letters, digits, or punctuation, Unicode-aware so
/// multi-byte scripts can be mentioned.
static TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([\p{L}\p{N}\p{P}]+)$").expect("trigger pattern compiles"));

/// Ephemeral suggestion state, alive while a trigger span is under the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionState {
    /// Paragraph holding the trigger span.
    block: usize,
    /// Unit range of the `@query` span, from the `@` to the caret.
    trigger: Range<usize>,
    /// Text after the `@`, used for filtering.
    query: String,
    /// Candidate names, external order, truncated to the cap.
    candidates: Vec<String>,
    /// Index of the highlighted candidate.
    highlighted: usize,
}

impl SuggestionState {
    /// Unit range of the trigger span within its paragraph.
    #[must_use]
    pub fn trigger(&self) -> Range<usize> {
        self.trigger.clone()
    }

    /// Paragraph index of the trigger span.
    #[must_use]
    pub fn block(&self) -> usize {
        self.block
    }

    /// The query text after the `@`.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Candidate names in external order.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Index of the highlighted candidate.
    #[must_use]
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// The highlighted candidate name, if the list is non-empty.
    #[must_use]
    pub fn highlighted_candidate(&self) -> Option<&str> {
        self.candidates.get(self.highlighted).map(String::as_str)
    }

    /// Move the highlight down, wrapping from the last entry to the first.
    pub fn select_next(&mut self) {
        if self.candidates.is_empty() {
            self.highlighted = 0;
        } else {
            self.highlighted = (self.highlighted + 1) % self.candidates.len();
        }
    }

    /// Move the highlight up, wrapping from the first entry to the last.
    pub fn select_prev(&mut self) {
        if self.candidates.is_empty() {
            self.highlighted = 0;
        } else {
            self.highlighted =
                (self.highlighted + self.candidates.len() - 1) % self.candidates.len();
        }
    }
}

/// Re-derive the suggestion state from the buffer and user snapshot.
///
/// The word-unit before the caret must match the trigger pattern and the
/// text after the caret must be empty or start with whitespace, so typing
/// in the middle of an existing word never triggers. A mention node directly
/// after the caret blocks the trigger the same way a letter would.
pub(crate) fn detect(
    buf: &Buffer,
    users: &UserDirectory,
    max: usize,
) -> Option<SuggestionState> {
    let before = buf.text_before_caret()?;
    let word = before.rsplit(char::is_whitespace).next().unwrap_or("");
    let captures = TRIGGER.captures(word)?;
    let query = captures.get(1).map(|m| m.as_str())?;

    match buf.following() {
        Following::Empty => {}
        Following::Text(rest) => {
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
        }
        Following::Node => return None,
    }

    let caret = buf.caret();
    let span = word.graphemes(true).count();
    let candidates = users
        .filter(query)
        .map(|u| u.name.clone())
        .take(max)
        .collect();

    Some(SuggestionState {
        block: caret.block,
        trigger: caret.offset - span..caret.offset,
        query: query.to_string(),
        candidates,
        highlighted: 0,
    })
}
