#![forbid(unsafe_code)]

//! Mentionable public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for hosts. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! ```
//! use mentionable::prelude::*;
//!
//! let users: UserDirectory =
//!     vec![User::new("Amy Alvarez", "/contributors/amy", "/avatars/amy.png")].into();
//! let mut composer = MentionComposer::new()
//!     .with_users(users)
//!     .with_translation(Some(42));
//!
//! for ch in "hi @am".chars() {
//!     composer.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(ch))));
//! }
//! assert!(composer.suggestions().is_some());
//!
//! // Enter commits the highlighted candidate while suggesting...
//! composer.handle_event(&Event::Key(KeyEvent::new(KeyCode::Enter)));
//! // ...and submits once the suggestion list is closed.
//! let Outcome::Submitted(submission) =
//!     composer.handle_event(&Event::Key(KeyEvent::new(KeyCode::Enter)))
//! else {
//!     panic!("expected a submission");
//! };
//! assert_eq!(
//!     submission.html,
//!     "<p>hi <a href=\"/contributors/amy\">Amy Alvarez</a></p>"
//! );
//! ```

// --- Core re-exports -------------------------------------------------------

pub use mention_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};
pub use mention_core::geometry::{Point, Rect, Size};
pub use mention_core::user::{User, UserDirectory};

// --- Document re-exports ---------------------------------------------------

pub use mention_doc::{
    Buffer, Caret, DocError, Document, Following, Inline, Mention, Paragraph, TextRun, to_html,
};

// --- Widget re-exports -----------------------------------------------------

pub use mention_widgets::{
    DEFAULT_MAX_SUGGESTIONS, MentionComposer, Outcome, Placement, Segment, Submission,
    SuggestionOverlay, SuggestionState, mark_search_terms,
};

/// Commonly used types, in one import.
pub mod prelude {
    pub use crate::{
        Event, Inline, KeyCode, KeyEvent, Mention, MentionComposer, Modifiers, Outcome, Rect, Size,
        Submission, SuggestionOverlay, SuggestionState, User, UserDirectory,
    };
}
