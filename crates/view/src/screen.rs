//! The terminal view system.
//!
//! `Screen` owns the panels, focus, stacking order and bindings, resolves
//! terminal events to bindings, and runs the main loop.

use std::collections::HashMap;

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::Backend, style::Color, Terminal};

use bufnav_core::{
    Action, Control, Event, EventHandler, Geometry, Host, LineStats, PanelOptions, PanelRole,
    Placement, Termination, Trigger, ViewError, ViewSystem,
};
use bufnav_logger as logger;

use crate::bindings::Bindings;
use crate::render::render_screen;
use crate::text_panel::TextPanel;

/// Panels, focus and bindings of the running viewer.
pub struct Screen {
    panels: HashMap<PanelRole, TextPanel>,
    /// Drawing order, bottom first.
    stack: Vec<PanelRole>,
    current: Option<PanelRole>,
    bindings: Bindings,
    selected_fg: Color,
}

impl Screen {
    /// Create an empty screen.
    pub fn new() -> Self {
        Self {
            panels: HashMap::new(),
            stack: Vec::new(),
            current: None,
            bindings: Bindings::new(),
            selected_fg: Color::Green,
        }
    }

    /// Color for the focused frame and the highlighted line.
    pub fn with_selected_fg(mut self, color: Color) -> Self {
        self.selected_fg = color;
        self
    }

    pub fn selected_fg(&self) -> Color {
        self.selected_fg
    }

    pub fn panel(&self, role: PanelRole) -> Option<&TextPanel> {
        self.panels.get(&role)
    }

    /// Panels in drawing order, bottom first.
    pub fn stack(&self) -> &[PanelRole] {
        &self.stack
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Topmost panel whose frame contains the cell.
    pub fn panel_at(&self, column: u16, row: u16) -> Option<PanelRole> {
        self.stack.iter().rev().copied().find(|role| {
            self.panels
                .get(role)
                .is_some_and(|panel| panel.geometry().contains(column, row))
        })
    }

    fn panel_mut(&mut self, role: PanelRole) -> Result<&mut TextPanel, ViewError> {
        self.panels
            .get_mut(&role)
            .ok_or(ViewError::UnknownPanel(role))
    }

    /// Resolve one terminal event to a binding and run it on the host.
    pub fn dispatch(&mut self, event: &Event, host: &mut dyn Host) -> Result<Control, ViewError> {
        match event {
            Event::Key(key) => {
                let source = self.current;
                match self.bindings.resolve_key(key, source) {
                    Some(binding) => host.handle(self, binding.action, source),
                    None => Ok(Control::Continue),
                }
            }
            Event::Mouse(mouse) => self.dispatch_mouse(mouse, host),
            Event::Resize(width, height) => {
                logger::debug(format!("Terminal resized to {}x{}", width, height));
                Ok(Control::Continue)
            }
            Event::Tick => Ok(Control::Continue),
        }
    }

    fn dispatch_mouse(
        &mut self,
        mouse: &MouseEvent,
        host: &mut dyn Host,
    ) -> Result<Control, ViewError> {
        let MouseEventKind::Down(button) = mouse.kind else {
            return Ok(Control::Continue);
        };

        let target = self.panel_at(mouse.column, mouse.row);
        if button == MouseButton::Left {
            if let Some(panel) = target.and_then(|role| self.panels.get_mut(&role)) {
                if let Some(row) = panel.geometry().content_row(mouse.column, mouse.row) {
                    panel.pick_row(row);
                }
            }
        }

        match self.bindings.resolve_mouse(button, target) {
            Some(binding) => host.handle(self, binding.action, target),
            None => Ok(Control::Continue),
        }
    }

    /// Lay out, draw and dispatch until a handler asks to quit.
    pub fn run_main_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &EventHandler,
        host: &mut dyn Host,
    ) -> Result<Termination> {
        loop {
            host.layout(self)?;
            terminal.draw(|frame| render_screen(self, frame.area(), frame.buffer_mut()))?;

            let event = events.next()?;
            if self.dispatch(&event, host)? == Control::Quit {
                logger::info("Main loop stopped by quit binding");
                return Ok(Termination::Quit);
            }
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewSystem for Screen {
    fn set_panel(
        &mut self,
        role: PanelRole,
        geometry: Geometry,
        options: PanelOptions,
    ) -> Result<Placement, ViewError> {
        if !geometry.is_valid() {
            return Err(ViewError::InvalidGeometry { role, geometry });
        }

        if let Some(panel) = self.panels.get_mut(&role) {
            panel.set_geometry(geometry);
            return Ok(Placement::Existing);
        }

        logger::debug(format!("Created panel {} at {}", role, geometry));
        self.panels.insert(role, TextPanel::new(geometry, options));
        self.stack.push(role);
        Ok(Placement::Created)
    }

    fn step_line_down(&mut self, role: PanelRole) -> Result<(), ViewError> {
        self.panel_mut(role)?.step_line_down();
        Ok(())
    }

    fn step_line_up(&mut self, role: PanelRole) -> Result<(), ViewError> {
        self.panel_mut(role)?.step_line_up();
        Ok(())
    }

    fn line_stats(&self, role: PanelRole) -> Result<LineStats, ViewError> {
        self.panels
            .get(&role)
            .map(TextPanel::line_stats)
            .ok_or(ViewError::UnknownPanel(role))
    }

    fn clear(&mut self, role: PanelRole) -> Result<(), ViewError> {
        self.panel_mut(role)?.clear();
        Ok(())
    }

    fn write(&mut self, role: PanelRole, text: &str) -> Result<(), ViewError> {
        self.panel_mut(role)?.write(text);
        Ok(())
    }

    fn set_current_panel(&mut self, role: PanelRole) -> Result<(), ViewError> {
        if !self.panels.contains_key(&role) {
            return Err(ViewError::UnknownPanel(role));
        }
        self.current = Some(role);
        Ok(())
    }

    fn current_panel(&self) -> Option<PanelRole> {
        self.current
    }

    fn raise_panel_to_top(&mut self, role: PanelRole) -> Result<(), ViewError> {
        let position = self
            .stack
            .iter()
            .position(|r| *r == role)
            .ok_or(ViewError::UnknownPanel(role))?;
        let role = self.stack.remove(position);
        self.stack.push(role);
        Ok(())
    }

    fn register_binding(
        &mut self,
        scope: Option<PanelRole>,
        trigger: Trigger,
        action: Action,
    ) -> Result<(), ViewError> {
        self.bindings.register(scope, trigger, action)?;
        logger::debug(format!(
            "Bound {} in {} to {:?}",
            trigger,
            scope.map(PanelRole::name).unwrap_or("global"),
            action
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bufnav_core::KeyBinding;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Host that records every handled action.
    #[derive(Default)]
    struct Recorder {
        handled: Vec<(Action, Option<PanelRole>)>,
    }

    impl Host for Recorder {
        fn layout(&mut self, _view: &mut dyn ViewSystem) -> anyhow::Result<()> {
            Ok(())
        }

        fn handle(
            &mut self,
            _view: &mut dyn ViewSystem,
            action: Action,
            source: Option<PanelRole>,
        ) -> Result<Control, ViewError> {
            self.handled.push((action, source));
            Ok(match action {
                Action::Quit => Control::Quit,
                _ => Control::Continue,
            })
        }
    }

    fn screen_with_panels() -> Screen {
        let mut screen = Screen::new();
        screen
            .set_panel(
                PanelRole::Master,
                Geometry::new(0, 0, 20, 11),
                PanelOptions::titled("val").highlight().wrap(),
            )
            .unwrap();
        screen
            .set_panel(
                PanelRole::Detail,
                Geometry::new(21, 0, 60, 5),
                PanelOptions::titled("props").wrap(),
            )
            .unwrap();
        screen
            .write(PanelRole::Master, "alpha\nbeta\ngamma")
            .unwrap();
        screen
    }

    fn mouse_down(button: MouseButton, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_set_panel_created_then_existing() {
        let mut screen = Screen::new();
        let geometry = Geometry::new(0, 0, 20, 11);
        let first = screen
            .set_panel(PanelRole::Master, geometry, PanelOptions::titled("val"))
            .unwrap();
        assert_eq!(first, Placement::Created);

        let moved = Geometry::new(0, 0, 30, 11);
        let second = screen
            .set_panel(PanelRole::Master, moved, PanelOptions::titled("ignored"))
            .unwrap();
        assert_eq!(second, Placement::Existing);

        let panel = screen.panel(PanelRole::Master).unwrap();
        assert_eq!(panel.geometry(), moved);
        assert_eq!(panel.options().title, "val");
        assert_eq!(screen.stack(), &[PanelRole::Master]);
    }

    #[test]
    fn test_set_panel_invalid_geometry() {
        let mut screen = Screen::new();
        let err = screen
            .set_panel(
                PanelRole::Stats,
                Geometry::new(10, 10, 11, 11),
                PanelOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, ViewError::InvalidGeometry { .. }));
        assert!(screen.panel(PanelRole::Stats).is_none());
    }

    #[test]
    fn test_unknown_panel_errors() {
        let mut screen = Screen::new();
        assert!(screen.line_stats(PanelRole::Detail).unwrap_err().is_unknown_panel());
        assert!(screen.clear(PanelRole::Detail).unwrap_err().is_unknown_panel());
        assert!(screen.write(PanelRole::Detail, "x").unwrap_err().is_unknown_panel());
        assert!(screen.step_line_down(PanelRole::Master).unwrap_err().is_unknown_panel());
        assert!(screen.set_current_panel(PanelRole::Master).unwrap_err().is_unknown_panel());
        assert!(screen.raise_panel_to_top(PanelRole::Master).unwrap_err().is_unknown_panel());
        assert_eq!(screen.current_panel(), None);
    }

    #[test]
    fn test_raise_panel_to_top() {
        let mut screen = screen_with_panels();
        assert_eq!(screen.stack(), &[PanelRole::Master, PanelRole::Detail]);
        screen.raise_panel_to_top(PanelRole::Master).unwrap();
        assert_eq!(screen.stack(), &[PanelRole::Detail, PanelRole::Master]);
    }

    #[test]
    fn test_panel_at_prefers_topmost() {
        let mut screen = Screen::new();
        screen
            .set_panel(PanelRole::Master, Geometry::new(0, 0, 20, 10), PanelOptions::default())
            .unwrap();
        screen
            .set_panel(PanelRole::Detail, Geometry::new(10, 0, 30, 10), PanelOptions::default())
            .unwrap();
        assert_eq!(screen.panel_at(15, 5), Some(PanelRole::Detail));
        screen.raise_panel_to_top(PanelRole::Master).unwrap();
        assert_eq!(screen.panel_at(15, 5), Some(PanelRole::Master));
        assert_eq!(screen.panel_at(5, 5), Some(PanelRole::Master));
        assert_eq!(screen.panel_at(50, 5), None);
    }

    #[test]
    fn test_key_dispatch_uses_focus() {
        let mut screen = screen_with_panels();
        screen
            .register_binding(
                Some(PanelRole::Master),
                Trigger::Key(KeyBinding::plain(KeyCode::Down)),
                Action::CursorDown,
            )
            .unwrap();
        let mut host = Recorder::default();
        let down = Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));

        // Nothing focused: scoped binding does not fire
        assert_eq!(screen.dispatch(&down, &mut host).unwrap(), Control::Continue);
        assert!(host.handled.is_empty());

        screen.set_current_panel(PanelRole::Master).unwrap();
        screen.dispatch(&down, &mut host).unwrap();
        assert_eq!(
            host.handled,
            vec![(Action::CursorDown, Some(PanelRole::Master))]
        );
    }

    #[test]
    fn test_quit_dispatch() {
        let mut screen = screen_with_panels();
        screen
            .register_binding(
                None,
                Trigger::Key(KeyBinding::ctrl(KeyCode::Char('c'))),
                Action::Quit,
            )
            .unwrap();
        let mut host = Recorder::default();
        let quit = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(screen.dispatch(&quit, &mut host).unwrap(), Control::Quit);
    }

    #[test]
    fn test_mouse_click_picks_row_and_fires_binding() {
        let mut screen = screen_with_panels();
        screen
            .register_binding(
                Some(PanelRole::Master),
                Trigger::Mouse(MouseButton::Left),
                Action::MouseSelect,
            )
            .unwrap();
        let mut host = Recorder::default();

        // Row 2 of the terminal is content row 1 of the master panel: "beta"
        screen
            .dispatch(&mouse_down(MouseButton::Left, 5, 2), &mut host)
            .unwrap();
        assert_eq!(screen.panel(PanelRole::Master).unwrap().cursor(), Some(1));
        assert_eq!(
            host.handled,
            vec![(Action::MouseSelect, Some(PanelRole::Master))]
        );
    }

    #[test]
    fn test_mouse_click_on_border_keeps_cursor() {
        let mut screen = screen_with_panels();
        let mut host = Recorder::default();
        screen
            .dispatch(&mouse_down(MouseButton::Left, 0, 2), &mut host)
            .unwrap();
        assert_eq!(screen.panel(PanelRole::Master).unwrap().cursor(), None);
        assert!(host.handled.is_empty());
    }

    #[test]
    fn test_mouse_click_elsewhere_without_binding() {
        let mut screen = screen_with_panels();
        screen
            .register_binding(
                Some(PanelRole::Master),
                Trigger::Mouse(MouseButton::Left),
                Action::MouseSelect,
            )
            .unwrap();
        let mut host = Recorder::default();
        screen
            .dispatch(&mouse_down(MouseButton::Left, 30, 2), &mut host)
            .unwrap();
        assert!(host.handled.is_empty());
    }
}
