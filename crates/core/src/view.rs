//! The view system contract.
//!
//! Selection and refresh logic only ever talk to panels through
//! `ViewSystem`, so it can run against the terminal host or a test double.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton};
use thiserror::Error;

use crate::panel::{Geometry, LineStats, PanelOptions, PanelRole, Placement};

/// A key with required modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// The key code (e.g., Char('c'), Down)
    pub code: KeyCode,
    /// Required modifiers (e.g., CONTROL)
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a Ctrl+key binding.
    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    /// Create a key binding without modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Check if a key event matches this binding.
    ///
    /// Modifiers must be equal. For character keys a shift the binding does
    /// not ask for is ignored, since the character case already carries it.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let mut modifiers = key.modifiers;
        if matches!(key.code, KeyCode::Char(_)) && !self.modifiers.contains(KeyModifiers::SHIFT) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        self.code == key.code && modifiers == self.modifiers
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("shift+")?;
        }
        match self.code {
            KeyCode::Char(ch) => write!(f, "{}", ch),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Input that fires a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Key(KeyBinding),
    Mouse(MouseButton),
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Key(key) => write!(f, "key {}", key),
            Trigger::Mouse(button) => write!(f, "mouse {:?}", button),
        }
    }
}

/// What a binding does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Stop the main loop
    Quit,
    /// Move the master selection one line down
    CursorDown,
    /// Move the master selection one line up
    CursorUp,
    /// Focus the clicked panel and pick up its cursor position
    MouseSelect,
}

/// Handler verdict for the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep processing events
    Continue,
    /// Stop the loop with `Termination::Quit`
    Quit,
}

/// Why the main loop returned without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A quit binding fired
    Quit,
}

/// Errors reported by the view system.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The panel has not been created yet.
    #[error("unknown panel: {0}")]
    UnknownPanel(PanelRole),

    /// Frame corners do not leave room for content.
    #[error("invalid geometry {geometry} for panel {role}")]
    InvalidGeometry { role: PanelRole, geometry: Geometry },

    /// The trigger is already bound in that scope.
    #[error("{trigger} is already bound in scope {}", scope_name(.scope))]
    DuplicateBinding {
        scope: Option<PanelRole>,
        trigger: Trigger,
    },
}

impl ViewError {
    /// Lookup misses are expected while the first layout pass is running.
    pub fn is_unknown_panel(&self) -> bool {
        matches!(self, ViewError::UnknownPanel(_))
    }
}

fn scope_name(scope: &Option<PanelRole>) -> &'static str {
    scope.map(PanelRole::name).unwrap_or("global")
}

/// Operations the view system provides to the selection core.
pub trait ViewSystem {
    /// Create the panel or update its geometry if it already exists.
    ///
    /// Options are applied on creation only.
    fn set_panel(
        &mut self,
        role: PanelRole,
        geometry: Geometry,
        options: PanelOptions,
    ) -> Result<Placement, ViewError>;

    /// Move the panel cursor one buffer line down, clamped at the last line.
    fn step_line_down(&mut self, role: PanelRole) -> Result<(), ViewError>;

    /// Move the panel cursor one buffer line up; from the first line this
    /// leaves no line selected.
    fn step_line_up(&mut self, role: PanelRole) -> Result<(), ViewError>;

    /// Current line position and line counts, computed on every call.
    fn line_stats(&self, role: PanelRole) -> Result<LineStats, ViewError>;

    /// Drop all buffer content.
    fn clear(&mut self, role: PanelRole) -> Result<(), ViewError>;

    /// Append text to the buffer.
    fn write(&mut self, role: PanelRole, text: &str) -> Result<(), ViewError>;

    /// Make the panel the receiver of key events.
    fn set_current_panel(&mut self, role: PanelRole) -> Result<(), ViewError>;

    /// Panel that currently receives key events.
    fn current_panel(&self) -> Option<PanelRole>;

    /// Draw the panel above its siblings.
    fn raise_panel_to_top(&mut self, role: PanelRole) -> Result<(), ViewError>;

    /// Bind a trigger to an action, globally (`None`) or for one panel.
    fn register_binding(
        &mut self,
        scope: Option<PanelRole>,
        trigger: Trigger,
        action: Action,
    ) -> Result<(), ViewError>;
}

/// Callbacks the view system invokes on its owner.
pub trait Host {
    /// (Re)establish panel geometry. Called before every frame.
    fn layout(&mut self, view: &mut dyn ViewSystem) -> anyhow::Result<()>;

    /// Run the action of a binding that fired on `source`.
    fn handle(
        &mut self,
        view: &mut dyn ViewSystem,
        action: Action,
        source: Option<PanelRole>,
    ) -> Result<Control, ViewError>;
}
