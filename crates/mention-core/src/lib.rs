#![forbid(unsafe_code)]

//! Core types for the mention composer.
//!
//! This crate holds the pieces every other crate depends on: canonical input
//! events, pixel-space geometry for overlay placement, and the ordered user
//! directory that candidate suggestions are drawn from.

pub mod event;
pub mod geometry;
pub mod user;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};
pub use geometry::{Point, Rect, Size};
pub use user::{User, UserDirectory};
