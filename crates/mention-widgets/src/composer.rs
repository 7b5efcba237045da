#![forbid(unsafe_code)]

//! The mention-aware comment composer.
//!
//! [`MentionComposer`] owns the document being typed, the caret, and the
//! ephemeral suggestion state. The host feeds it input events and reads
//! the [`Outcome`]: navigation and edits report `Changed`, a plain Enter on
//! a non-blank document reports `Submitted` with the serialized HTML.
//!
//! Submission is fire-and-forget: the composer resets its own state
//! optimistically and never observes delivery. Failure handling belongs to
//! the host's transport layer.

use mention_core::{Event, KeyCode, KeyEvent, KeyEventKind, UserDirectory};
use mention_doc::{to_html, Buffer, Caret, Document, Mention};

use crate::suggest::{self, SuggestionState, DEFAULT_MAX_SUGGESTIONS};

/// A line break within a paragraph.
///
/// The zero-width no-break space after the `\n` keeps the break from being
/// treated as a trailing, ignorable character by downstream renderers; it
/// must survive serialization for interop.
const LINE_BREAK: &str = "\n\u{FEFF}";

/// A serialized comment ready for the host's submit callback.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Submission {
    /// Minimal HTML rendering of the document.
    pub html: String,
    /// The translation under discussion, if any.
    pub translation: Option<i64>,
}

/// Result of feeding one event to the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The event was not for us; the host may handle it.
    Ignored,
    /// Document, caret, or suggestion state changed; re-render.
    Changed,
    /// A comment was submitted. The composer has already reset itself.
    Submitted(Submission),
}

/// Mention-aware rich text composer widget.
#[derive(Debug, Clone)]
pub struct MentionComposer {
    buffer: Buffer,
    users: UserDirectory,
    suggestion: Option<SuggestionState>,
    translation: Option<i64>,
    placeholder: String,
    max_suggestions: usize,
    focused: bool,
}

impl Default for MentionComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl MentionComposer {
    /// Create an empty composer: one empty paragraph, caret at its start.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Buffer::new(),
            users: UserDirectory::new(),
            suggestion: None,
            translation: None,
            placeholder: String::new(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            focused: false,
        }
    }

    // --- Builder methods ---

    /// Set the mentionable-user snapshot (builder).
    #[must_use]
    pub fn with_users(mut self, users: UserDirectory) -> Self {
        self.users = users;
        self
    }

    /// Set the translation the comment refers to (builder).
    #[must_use]
    pub fn with_translation(mut self, translation: Option<i64>) -> Self {
        self.translation = translation;
        self
    }

    /// Set the placeholder text (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Cap the number of suggested candidates (builder).
    #[must_use]
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max.max(1);
        self
    }

    /// Set whether the composer is focused (builder).
    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    // --- State access ---

    /// The document being composed.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.buffer.document()
    }

    /// Current caret position.
    #[must_use]
    pub fn caret(&self) -> Caret {
        self.buffer.caret()
    }

    /// Active suggestion state, if a trigger span is under the caret.
    ///
    /// The host shows the popup only when this is `Some` and
    /// [`SuggestionState::candidates`] is non-empty.
    #[must_use]
    pub fn suggestions(&self) -> Option<&SuggestionState> {
        self.suggestion.as_ref()
    }

    /// Placeholder text for an empty composer.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Whether the composer is focused.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Replace the user snapshot and re-derive the suggestion state.
    pub fn set_users(&mut self, users: UserDirectory) {
        self.users = users;
        self.refresh_suggestion();
    }

    /// Set the translation the next submission refers to.
    pub fn set_translation(&mut self, translation: Option<i64>) {
        self.translation = translation;
    }

    // --- Event handling ---

    /// Handle an input event.
    pub fn handle_event(&mut self, event: &Event) -> Outcome {
        match event {
            Event::Key(key)
                if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat =>
            {
                self.handle_key(key)
            }
            Event::Paste(paste) => {
                self.buffer.insert_str(&paste.text);
                self.refresh_suggestion();
                #[cfg(feature = "tracing")]
                self.trace_edit("paste");
                Outcome::Changed
            }
            Event::Focus(focused) => {
                if self.focused == *focused {
                    Outcome::Ignored
                } else {
                    self.focused = *focused;
                    Outcome::Changed
                }
            }
            _ => Outcome::Ignored,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Outcome {
        if self.suggestion.is_some()
            && let Some(outcome) = self.handle_suggestion_key(key)
        {
            return outcome;
        }
        self.handle_editor_key(key)
    }

    /// Suggestion navigation, active only while a trigger span is set.
    ///
    /// Returns `None` for keys the suggestion list does not consume; those
    /// fall through to the normal editing path.
    fn handle_suggestion_key(&mut self, key: &KeyEvent) -> Option<Outcome> {
        match key.code {
            KeyCode::Down => {
                if let Some(state) = &mut self.suggestion {
                    state.select_next();
                }
                Some(Outcome::Changed)
            }
            KeyCode::Up => {
                if let Some(state) = &mut self.suggestion {
                    state.select_prev();
                }
                Some(Outcome::Changed)
            }
            KeyCode::Tab | KeyCode::Enter => {
                self.commit_highlighted();
                Some(Outcome::Changed)
            }
            KeyCode::Escape => {
                self.suggestion = None;
                Some(Outcome::Changed)
            }
            _ => None,
        }
    }

    fn handle_editor_key(&mut self, key: &KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Enter if key.shift() => {
                self.buffer.insert_str(LINE_BREAK);
                self.refresh_suggestion();
                #[cfg(feature = "tracing")]
                self.trace_edit("line_break");
                Outcome::Changed
            }
            KeyCode::Enter => match self.submit() {
                Some(submission) => Outcome::Submitted(submission),
                None => Outcome::Ignored,
            },
            KeyCode::Char(c) if !key.ctrl() && !key.meta() => {
                self.buffer.insert_char(c);
                self.refresh_suggestion();
                #[cfg(feature = "tracing")]
                self.trace_edit("insert_char");
                Outcome::Changed
            }
            KeyCode::Backspace => {
                if self.buffer.delete_back() {
                    self.refresh_suggestion();
                    #[cfg(feature = "tracing")]
                    self.trace_edit("delete_back");
                    Outcome::Changed
                } else {
                    Outcome::Ignored
                }
            }
            KeyCode::Delete => {
                if self.buffer.delete_forward() {
                    self.refresh_suggestion();
                    #[cfg(feature = "tracing")]
                    self.trace_edit("delete_forward");
                    Outcome::Changed
                } else {
                    Outcome::Ignored
                }
            }
            KeyCode::Left => self.moved(Buffer::move_left),
            KeyCode::Right => self.moved(Buffer::move_right),
            KeyCode::Home => {
                self.buffer.move_home();
                self.refresh_suggestion();
                Outcome::Changed
            }
            KeyCode::End => {
                self.buffer.move_end();
                self.refresh_suggestion();
                Outcome::Changed
            }
            _ => Outcome::Ignored,
        }
    }

    fn moved(&mut self, op: fn(&mut Buffer) -> bool) -> Outcome {
        if op(&mut self.buffer) {
            self.refresh_suggestion();
            Outcome::Changed
        } else {
            Outcome::Ignored
        }
    }

    // --- Mention commit ---

    /// Commit the candidate at `index`, the mouse-selection path.
    ///
    /// Closes the suggestion list either way; an out-of-range index or a
    /// candidate that no longer resolves in the directory is a silent no-op
    /// on the document.
    pub fn commit_suggestion(&mut self, index: usize) -> bool {
        let Some(state) = self.suggestion.take() else {
            return false;
        };
        let Some(name) = state.candidates().get(index).cloned() else {
            return false;
        };
        self.commit_name(&name, &state)
    }

    fn commit_highlighted(&mut self) {
        let Some(state) = self.suggestion.take() else {
            return;
        };
        if let Some(name) = state.highlighted_candidate().map(str::to_owned) {
            self.commit_name(&name, &state);
        }
    }

    /// Replace the trigger span with a mention for `name`, then one space.
    ///
    /// The suggestion list is already closed by the callers; a failed commit
    /// leaves it closed, matching the mouse path.
    fn commit_name(&mut self, name: &str, state: &SuggestionState) -> bool {
        // The candidate list derives from this same directory, but a stale
        // snapshot can leave a name behind; tolerate it instead of failing.
        let mention = match self.users.find(name) {
            Some(user) => Mention::new(user.name.clone(), user.url.clone()),
            None => return false,
        };
        let committed = self.buffer.replace_units(state.trigger(), mention).is_ok();
        if committed {
            self.buffer.insert_str(" ");
        }
        self.refresh_suggestion();
        #[cfg(feature = "tracing")]
        self.trace_edit("commit_mention");
        committed
    }

    // --- External mention insertion ---

    /// Mention `name` at the caret unless the document already mentions them,
    /// then focus the composer with the caret at the document's end.
    ///
    /// Used for the "mention the assigned contact" shortcut; calling it twice
    /// with the same name inserts the mention exactly once.
    pub fn mention_contact(&mut self, name: &str) {
        if !self.buffer.document().contains_mention(name)
            && let Some(user) = self.users.find(name)
        {
            let mention = Mention::new(user.name.clone(), user.url.clone());
            self.buffer.insert_mention(mention);
            self.buffer.insert_str(" ");
            #[cfg(feature = "tracing")]
            self.trace_edit("mention_contact");
        }
        self.focused = true;
        self.buffer.move_doc_end();
        self.refresh_suggestion();
    }

    /// Apply a pending contact-person mention, if one is set.
    ///
    /// Returns `true` when the pending value was consumed so the host can
    /// clear it and not re-apply on the next render.
    pub fn apply_contact_person(&mut self, contact: Option<&str>) -> bool {
        match contact {
            Some(name) if !name.is_empty() => {
                self.mention_contact(name);
                true
            }
            _ => false,
        }
    }

    // --- Submission ---

    /// Serialize and reset, unless the document is blank.
    ///
    /// Blank means no mentions and whitespace-only plain text; in that case
    /// nothing is emitted and the document is left untouched.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.buffer.document().is_blank() {
            return None;
        }
        let html = to_html(self.buffer.document());
        self.buffer.reset();
        self.suggestion = None;
        #[cfg(feature = "tracing")]
        self.trace_edit("submit");
        Some(Submission {
            html,
            translation: self.translation,
        })
    }

    // --- Internal helpers ---

    fn refresh_suggestion(&mut self) {
        self.suggestion = suggest::detect(&self.buffer, &self.users, self.max_suggestions);
    }

    #[cfg(feature = "tracing")]
    fn trace_edit(&self, operation: &'static str) {
        let _span = tracing::debug_span!(
            "composer.edit",
            operation,
            caret = self.buffer.caret().offset,
            units = self.buffer.current_units(),
            suggesting = self.suggestion.is_some()
        )
        .entered();
    }
}
