//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame layout, sidebar, status bar and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color scheme and text styling
//! - `tabs`: Content of the schedule, upload and logs views

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
