//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Store events: saving and listing forms on the store worker
//! - Terminal events: key presses and ticks driving the preview

pub mod store;
pub mod terminal;
