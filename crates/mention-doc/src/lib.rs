#![forbid(unsafe_code)]

//! Structured rich-text document for the mention composer.
//!
//! The document is an ordered sequence of paragraphs, each holding a run of
//! inline nodes: plain text and atomic mention tokens. [`Buffer`] pairs a
//! document with a caret and provides the editing operations the composer
//! needs; [`serialize`] renders the document to a minimal HTML string for
//! transmission. The HTML transform is one-way: freshly composed comments
//! always start from an empty document, nothing ever parses HTML back in.

pub mod buffer;
pub mod error;
pub mod node;
pub mod serialize;

pub use buffer::{Buffer, Caret, Following};
pub use error::DocError;
pub use node::{Document, Inline, Mention, Paragraph, TextRun};
pub use serialize::to_html;
