//! Panel placement.

use bufnav_config::LayoutSettings;
use bufnav_core::{Geometry, PanelOptions, PanelRole, ViewError, ViewSystem};
use bufnav_logger as logger;

/// Where the three panels go, and what the master list shows.
#[derive(Debug)]
pub struct Layout {
    master: Geometry,
    detail: Geometry,
    stats: Geometry,
    master_text: String,
}

impl Layout {
    pub fn new(settings: &LayoutSettings, master_text: String) -> Self {
        Self {
            master: settings.master.into(),
            detail: settings.detail.into(),
            stats: settings.stats.into(),
            master_text,
        }
    }

    pub fn geometry(&self, role: PanelRole) -> Geometry {
        match role {
            PanelRole::Master => self.master,
            PanelRole::Detail => self.detail,
            PanelRole::Stats => self.stats,
        }
    }

    fn options(role: PanelRole) -> PanelOptions {
        match role {
            PanelRole::Master => PanelOptions::titled("val").highlight().wrap(),
            PanelRole::Detail => PanelOptions::titled("props").wrap(),
            PanelRole::Stats => PanelOptions::titled("buf line").wrap(),
        }
    }

    /// Create or reposition every panel.
    ///
    /// The master panel gets focus and its list only when first created, so
    /// running this on every frame does not duplicate content. Returns true
    /// when any panel was created.
    pub fn apply(&self, view: &mut dyn ViewSystem) -> Result<bool, ViewError> {
        let mut created = false;
        let mut master_created = false;

        for role in PanelRole::ALL {
            let placement = view.set_panel(role, self.geometry(role), Self::options(role))?;
            if !placement.is_created() {
                continue;
            }
            created = true;
            if role == PanelRole::Master {
                master_created = true;
                view.write(role, &self.master_text)?;
            }
            logger::info(format!("Panel {} placed at {}", role, self.geometry(role)));
        }

        // After the loop, so panels created later stay below the master
        if master_created {
            view.set_current_panel(PanelRole::Master)?;
            view.raise_panel_to_top(PanelRole::Master)?;
        }

        Ok(created)
    }
}
