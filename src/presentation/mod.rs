//! Presentation layer handling terminal UI and user input.
//!
//! This module draws the template picker and wizard with ratatui and maps
//! crossterm key events onto application actions.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
