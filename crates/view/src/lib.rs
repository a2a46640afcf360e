//! Terminal view system for bufnav.
//!
//! This crate implements `ViewSystem` on top of ratatui and crossterm:
//! - `TextPanel` - a text buffer with wrapping and a highlighted line
//! - `Bindings` - key and mouse bindings, global or per panel
//! - `Screen` - panels, focus, stacking order and the main loop
//! - `render_screen` - drawing panels bottom to top

pub mod bindings;
pub mod render;
pub mod screen;
pub mod text_panel;

pub use bindings::{Binding, Bindings};
pub use render::{frame_rect, render_screen};
pub use screen::Screen;
pub use text_panel::{wrap_line, TextPanel, ViewRow};
