//! Designer state management module.
//!
//! This module contains the state shared between the render loop, the
//! terminal event handler and the store worker:
//! - `Designer`: the document under design, its selection and preview values
//! - Preview navigation (focused field, option cursor)
//! - State error handling

mod designer;
mod error;
mod preview;

pub use designer::{Designer, RequestKind, StoreEventSender};
pub use error::StateError;
pub use preview::CHECKED_VALUE;
