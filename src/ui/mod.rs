//! User interface module.
//!
//! This module handles the form preview rendering using the `ratatui` library, including:
//! - Terminal rendering and layout
//! - Color schemes
//! - Widget components (spinner, styling)
//! - Panels (form preview, saved forms, log, footer)

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod theme;
mod widgets;

pub const SPINNER_FRAME_COUNT: usize = widgets::spinner::FRAMES.len();

pub use render::render;
pub use theme::{ColorSpec, Theme};
