//! Selection tracking for the master list.

use bufnav_core::{PanelRole, ViewSystem};
use bufnav_logger as logger;

/// Receives every selection change, synchronously.
pub trait SelectionObserver {
    fn selection_changed(&mut self, view: &mut dyn ViewSystem, selection: Option<usize>);
}

/// Owns the selected master line.
///
/// The view system is the authority on cursor position (it clamps at the
/// list ends), so after every step the tracker reads the position back
/// instead of counting on its own.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    current: Option<usize>,
}

impl SelectionTracker {
    /// Start with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected master line, `None` when nothing is selected.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Move toward the end of the list and notify.
    pub fn step_down(&mut self, view: &mut dyn ViewSystem, observer: &mut dyn SelectionObserver) {
        if let Err(e) = view.step_line_down(PanelRole::Master) {
            logger::debug(format!("Step down skipped: {}", e));
        }
        self.resync(view, observer);
    }

    /// Move toward the start of the list and notify.
    pub fn step_up(&mut self, view: &mut dyn ViewSystem, observer: &mut dyn SelectionObserver) {
        if let Err(e) = view.step_line_up(PanelRole::Master) {
            logger::debug(format!("Step up skipped: {}", e));
        }
        self.resync(view, observer);
    }

    /// Re-read the master cursor (e.g. after a mouse pick) and notify.
    pub fn resync(&mut self, view: &mut dyn ViewSystem, observer: &mut dyn SelectionObserver) {
        match view.line_stats(PanelRole::Master) {
            Ok(stats) => self.current = stats.line_index,
            Err(e) => logger::debug(format!("Selection unchanged: {}", e)),
        }
        logger::debug(format!("Selection: {:?}", self.current));
        observer.selection_changed(view, self.current);
    }
}
