//! Key and mouse binding registry.

use crossterm::event::{KeyEvent, MouseButton};

use bufnav_core::{Action, PanelRole, Trigger, ViewError};

/// A registered binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Panel the binding is limited to; `None` for global bindings
    pub scope: Option<PanelRole>,
    pub trigger: Trigger,
    pub action: Action,
}

/// Bindings in registration order.
#[derive(Debug, Default)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding. The same trigger may be bound once per scope.
    pub fn register(
        &mut self,
        scope: Option<PanelRole>,
        trigger: Trigger,
        action: Action,
    ) -> Result<(), ViewError> {
        if self
            .entries
            .iter()
            .any(|b| b.scope == scope && b.trigger == trigger)
        {
            return Err(ViewError::DuplicateBinding { scope, trigger });
        }
        self.entries.push(Binding {
            scope,
            trigger,
            action,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the binding for a key press.
    ///
    /// Bindings scoped to the focused panel win over global ones.
    pub fn resolve_key(&self, key: &KeyEvent, focused: Option<PanelRole>) -> Option<Binding> {
        self.resolve(focused, |trigger| match trigger {
            Trigger::Key(binding) => binding.matches(key),
            Trigger::Mouse(_) => false,
        })
    }

    /// Find the binding for a mouse button pressed over `target`.
    pub fn resolve_mouse(&self, button: MouseButton, target: Option<PanelRole>) -> Option<Binding> {
        self.resolve(target, |trigger| *trigger == Trigger::Mouse(button))
    }

    fn resolve(
        &self,
        panel: Option<PanelRole>,
        matches: impl Fn(&Trigger) -> bool,
    ) -> Option<Binding> {
        let scoped = panel.and_then(|role| {
            self.entries
                .iter()
                .find(|b| b.scope == Some(role) && matches(&b.trigger))
        });
        scoped
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|b| b.scope.is_none() && matches(&b.trigger))
            })
            .copied()
    }
}
