//! Core types and traits for bufnav.
//!
//! This crate provides the foundational abstractions shared by the
//! selection logic and the terminal view system:
//! - `PanelRole` and `Geometry` - which panel, and where
//! - `ViewSystem` - the panel operations the selection core relies on
//! - `Host` - callbacks the view system invokes on the application
//! - `EventHandler` - polling of terminal events

pub mod event;
pub mod panel;
pub mod view;

pub use event::{Event, EventHandler};
pub use panel::{Geometry, LineStats, PanelOptions, PanelRole, Placement};
pub use view::{
    Action, Control, Host, KeyBinding, Termination, Trigger, ViewError, ViewSystem,
};
