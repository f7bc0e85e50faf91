//! Design form definitions, preview them in the terminal and save them to a
//! document store.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod form;
pub mod logger;
pub mod state;
pub mod store;
pub mod ui;
