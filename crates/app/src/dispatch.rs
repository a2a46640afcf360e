//! Binding registration and action handling.

use anyhow::{Context, Result};
use crossterm::event::MouseButton;

use bufnav_config::KeySettings;
use bufnav_core::{Action, Control, KeyBinding, PanelRole, Trigger, ViewError, ViewSystem};
use bufnav_keyboard::parse_binding;
use bufnav_logger as logger;

use crate::selection::{SelectionObserver, SelectionTracker};

/// Parsed key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    pub quit: KeyBinding,
    pub down: KeyBinding,
    pub up: KeyBinding,
}

impl KeyMap {
    /// Parse the configured key strings.
    pub fn from_settings(keys: &KeySettings) -> Result<Self> {
        Ok(Self {
            quit: parse_key("quit", &keys.quit)?,
            down: parse_key("down", &keys.down)?,
            up: parse_key("up", &keys.up)?,
        })
    }
}

fn parse_key(name: &str, value: &str) -> Result<KeyBinding> {
    parse_binding(value).with_context(|| format!("Invalid key binding for '{}'", name))
}

/// Maps input to selection changes.
#[derive(Debug)]
pub struct EventDispatcher {
    keys: KeyMap,
    mouse: bool,
}

impl EventDispatcher {
    pub fn new(keys: KeyMap, mouse: bool) -> Self {
        Self { keys, mouse }
    }

    pub fn keys(&self) -> &KeyMap {
        &self.keys
    }

    /// Register every binding with the view system.
    ///
    /// Quit is global; stepping and clicking only apply to the master panel.
    pub fn register(&self, view: &mut dyn ViewSystem) -> Result<(), ViewError> {
        view.register_binding(None, Trigger::Key(self.keys.quit), Action::Quit)?;
        view.register_binding(
            Some(PanelRole::Master),
            Trigger::Key(self.keys.down),
            Action::CursorDown,
        )?;
        view.register_binding(
            Some(PanelRole::Master),
            Trigger::Key(self.keys.up),
            Action::CursorUp,
        )?;
        if self.mouse {
            view.register_binding(
                Some(PanelRole::Master),
                Trigger::Mouse(MouseButton::Left),
                Action::MouseSelect,
            )?;
        }
        Ok(())
    }

    /// Run one bound action.
    pub fn handle(
        &self,
        view: &mut dyn ViewSystem,
        action: Action,
        source: Option<PanelRole>,
        tracker: &mut SelectionTracker,
        observer: &mut dyn SelectionObserver,
    ) -> Result<Control, ViewError> {
        match action {
            Action::Quit => {
                logger::info("Quit requested");
                Ok(Control::Quit)
            }
            Action::CursorDown => {
                tracker.step_down(view, observer);
                Ok(Control::Continue)
            }
            Action::CursorUp => {
                tracker.step_up(view, observer);
                Ok(Control::Continue)
            }
            Action::MouseSelect => {
                let role = source.unwrap_or(PanelRole::Master);
                // Focus and stacking change before the refresh
                view.set_current_panel(role)?;
                view.raise_panel_to_top(role)?;
                tracker.resync(view, observer);
                Ok(Control::Continue)
            }
        }
    }
}
