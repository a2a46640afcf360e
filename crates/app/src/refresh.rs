//! Keeping the detail and stats panels in sync with the selection.

use bufnav_core::{PanelRole, ViewError, ViewSystem};
use bufnav_logger as logger;
use bufnav_records::{format_detail, format_stats, DataSource};

use crate::selection::SelectionObserver;

/// Rewrites the dependent panels from the data source.
///
/// A missing panel is not an error here: the layout may not have created
/// it yet, so the write is skipped and the other panel is still updated.
#[derive(Debug)]
pub struct RefreshCoordinator {
    source: DataSource,
}

impl RefreshCoordinator {
    pub fn new(source: DataSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Replace the detail and stats panel contents for `selection`.
    ///
    /// Running it twice for the same selection leaves the same contents.
    pub fn refresh(&self, view: &mut dyn ViewSystem, selection: Option<usize>) {
        let detail = selection
            .and_then(|index| self.source.get(index))
            .map(format_detail);
        fill_panel(view, PanelRole::Detail, detail.as_deref());

        match view.line_stats(PanelRole::Master) {
            Ok(stats) => {
                let text = format_stats(stats.line_index, stats.buffer_lines, stats.view_lines);
                fill_panel(view, PanelRole::Stats, Some(&text));
            }
            Err(e) => skip(PanelRole::Stats, &e),
        }
    }
}

impl SelectionObserver for RefreshCoordinator {
    fn selection_changed(&mut self, view: &mut dyn ViewSystem, selection: Option<usize>) {
        self.refresh(view, selection);
    }
}

/// Clear a panel and write `text` into it, if any.
fn fill_panel(view: &mut dyn ViewSystem, role: PanelRole, text: Option<&str>) {
    if let Err(e) = view.clear(role) {
        skip(role, &e);
        return;
    }
    if let Some(text) = text {
        if let Err(e) = view.write(role, text) {
            skip(role, &e);
        }
    }
}

fn skip(role: PanelRole, error: &ViewError) {
    logger::debug(format!("Refresh of {} skipped: {}", role, error));
}
