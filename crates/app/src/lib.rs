//! Application core for bufnav.
//!
//! This crate holds the master-detail behavior and talks to the terminal
//! only through the `ViewSystem` trait:
//! - `SelectionTracker` - the selected master line
//! - `RefreshCoordinator` - detail and stats panels follow the selection
//! - `EventDispatcher` - bindings and the actions they run
//! - `Layout` - panel placement
//! - `App` - the `Host` the view system calls back into

pub mod app;
pub mod dispatch;
pub mod layout;
pub mod refresh;
pub mod selection;

pub use app::{init_logging, App};
pub use dispatch::{EventDispatcher, KeyMap};
pub use layout::Layout;
pub use refresh::RefreshCoordinator;
pub use selection::{SelectionObserver, SelectionTracker};
