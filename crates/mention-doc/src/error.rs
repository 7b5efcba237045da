#![forbid(unsafe_code)]

//! Error types for document edits.

use thiserror::Error;

/// Failure of a low-level document edit.
///
/// These are precondition violations on unit addressing. The composer treats
/// them as silent no-ops; they surface as errors here so the buffer API is
/// honest about what it requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocError {
    /// A unit index or range end lies past the end of the paragraph.
    #[error("unit position {position} out of bounds (paragraph has {len} units)")]
    UnitOutOfBounds {
        /// The offending unit index.
        position: usize,
        /// Unit length of the paragraph.
        len: usize,
    },

    /// A range to be replaced crosses a node boundary.
    ///
    /// Replacement targets (trigger spans) always live inside a single text
    /// run; a range touching a mention or spanning two runs is malformed.
    #[error("unit range {start}..{end} crosses an inline node boundary")]
    RangeCrossesNode {
        /// Range start in units.
        start: usize,
        /// Range end in units.
        end: usize,
    },
}
