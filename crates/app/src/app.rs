//! The viewer application: wires configuration, data and the view system.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ratatui::{backend::Backend, style::Color, Terminal};

use bufnav_config::{Config, GeneralSettings};
use bufnav_core::{Action, Control, EventHandler, Host, PanelRole, Termination, ViewError, ViewSystem};
use bufnav_logger::{self as logger, LogLevel};
use bufnav_records::{format_master_list, DataSource};
use bufnav_view::Screen;

use crate::dispatch::{EventDispatcher, KeyMap};
use crate::layout::Layout;
use crate::refresh::RefreshCoordinator;
use crate::selection::SelectionTracker;

/// Start file logging as configured. Unknown levels fall back to info.
pub fn init_logging(config: &Config) {
    let level = config.logging.min_level.parse::<LogLevel>();
    logger::init(config.log_file_path(), *level.as_ref().unwrap_or(&LogLevel::Info));
    logger::info(format!("bufnav {} started", env!("CARGO_PKG_VERSION")));
    if let Err(e) = level {
        logger::warn(format!("{}, logging at info", e));
    }
}

/// Main application structure
#[derive(Debug)]
pub struct App {
    layout: Layout,
    tracker: SelectionTracker,
    coordinator: RefreshCoordinator,
    dispatcher: EventDispatcher,
    tick_rate: Duration,
    selected_fg: Color,
}

impl App {
    /// Build the application, loading records from the configured file or
    /// falling back to the built-in sample.
    pub fn new(config: &Config) -> Result<Self> {
        let source = load_source(&config.general)?;
        Self::with_source(config, source)
    }

    /// Build the application around an already loaded data source.
    pub fn with_source(config: &Config, source: DataSource) -> Result<Self> {
        let keys = KeyMap::from_settings(&config.keys)?;
        let selected_fg = Color::from_str(&config.theme.selected_fg)
            .map_err(|_| anyhow!("Invalid selected_fg color '{}'", config.theme.selected_fg))?;
        logger::info(format!("Loaded {} records", source.len()));

        Ok(Self {
            layout: Layout::new(&config.layout, format_master_list(&source)),
            tracker: SelectionTracker::new(),
            coordinator: RefreshCoordinator::new(source),
            dispatcher: EventDispatcher::new(keys, config.general.mouse),
            tick_rate: Duration::from_millis(config.general.tick_rate_ms),
            selected_fg,
        })
    }

    /// Selected master line.
    pub fn selection(&self) -> Option<usize> {
        self.tracker.current()
    }

    pub fn source(&self) -> &DataSource {
        self.coordinator.source()
    }

    pub fn selected_fg(&self) -> Color {
        self.selected_fg
    }

    /// Register the bindings with the view system.
    pub fn install(&self, view: &mut dyn ViewSystem) -> Result<()> {
        self.dispatcher
            .register(view)
            .context("Failed to register key bindings")
    }

    /// Run the application until the quit binding fires.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<Termination> {
        let mut screen = Screen::new().with_selected_fg(self.selected_fg);
        self.install(&mut screen)?;

        let events = EventHandler::new(self.tick_rate);
        logger::info("Main loop started");
        screen.run_main_loop(terminal, &events, self)
    }
}

impl Host for App {
    fn layout(&mut self, view: &mut dyn ViewSystem) -> Result<()> {
        let created = self.layout.apply(view).context("Failed to place panels")?;
        if created {
            self.coordinator.refresh(view, self.tracker.current());
        }
        Ok(())
    }

    fn handle(
        &mut self,
        view: &mut dyn ViewSystem,
        action: Action,
        source: Option<PanelRole>,
    ) -> Result<Control, ViewError> {
        self.dispatcher.handle(
            view,
            action,
            source,
            &mut self.tracker,
            &mut self.coordinator,
        )
    }
}

fn load_source(general: &GeneralSettings) -> Result<DataSource> {
    match general.data_file {
        Some(ref path) => DataSource::load(Path::new(path))
            .with_context(|| format!("Failed to load records from {}", path)),
        None => Ok(DataSource::sample()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bufnav_core::Event;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn panel_text(screen: &Screen, role: PanelRole) -> String {
        screen.panel(role).unwrap().content().to_string()
    }

    fn started() -> (App, Screen) {
        let mut app = App::new(&Config::default()).unwrap();
        let mut screen = Screen::new();
        app.install(&mut screen).unwrap();
        app.layout(&mut screen).unwrap();
        (app, screen)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_defaults_use_sample_records() {
        let app = App::new(&Config::default()).unwrap();
        assert_eq!(app.source(), &DataSource::sample());
        assert_eq!(app.selection(), None);
        assert_eq!(app.selected_fg(), Color::Green);
    }

    #[test]
    fn test_first_layout_refreshes_stats_only() {
        let (_app, screen) = started();
        assert_eq!(panel_text(&screen, PanelRole::Detail), "");
        assert_eq!(
            panel_text(&screen, PanelRole::Stats),
            "buf line index: -1\nbuf lines count: 5\nview lines count: 6\n"
        );
        assert_eq!(screen.current_panel(), Some(PanelRole::Master));
    }

    #[test]
    fn test_repeated_layout_is_stable() {
        let (mut app, mut screen) = started();
        screen.dispatch(&key(KeyCode::Down), &mut app).unwrap();
        let detail = panel_text(&screen, PanelRole::Detail);

        app.layout(&mut screen).unwrap();
        app.layout(&mut screen).unwrap();
        assert_eq!(panel_text(&screen, PanelRole::Detail), detail);
        assert_eq!(screen.line_stats(PanelRole::Master).unwrap().buffer_lines, 5);
    }

    #[test]
    fn test_navigation_through_host() {
        let (mut app, mut screen) = started();

        screen.dispatch(&key(KeyCode::Down), &mut app).unwrap();
        screen.dispatch(&key(KeyCode::Down), &mut app).unwrap();
        assert_eq!(app.selection(), Some(1));
        assert_eq!(
            panel_text(&screen, PanelRole::Detail),
            "ID: 4\nprop1: test1\nprop2: test2\nprop3: test3"
        );
        assert_eq!(
            panel_text(&screen, PanelRole::Stats),
            "buf line index: 1\nbuf lines count: 5\nview lines count: 6\n"
        );

        let quit = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(screen.dispatch(&quit, &mut app).unwrap(), Control::Quit);
    }

    #[test]
    fn test_install_twice_fails() {
        let (app, mut screen) = started();
        let err = app.install(&mut screen).unwrap_err();
        assert!(err.to_string().contains("register key bindings"));
    }

    #[test]
    fn test_invalid_layout_is_fatal() {
        let mut config = Config::default();
        config.layout.master = [0, 0, 1, 11];
        let mut app = App::new(&config).unwrap();
        assert!(app.layout(&mut Screen::new()).is_err());
    }

    #[test]
    fn test_invalid_color_is_fatal() {
        let mut config = Config::default();
        config.theme.selected_fg = "not a color".to_string();
        assert!(App::new(&config).is_err());
    }

    #[test]
    fn test_records_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[[record]]\nid = 7\nvalue = \"seven\"\nprop1 = \"a\"\n\n[[record]]\nid = 8\nvalue = \"eight\"\n"
        )
        .unwrap();

        let mut config = Config::default();
        config.general.data_file = Some(file.path().to_string_lossy().into_owned());
        let app = App::new(&config).unwrap();
        assert_eq!(app.source().len(), 2);
        assert_eq!(app.source().get(0).unwrap().value, "seven");
    }

    #[test]
    fn test_missing_records_file_is_fatal() {
        let mut config = Config::default();
        config.general.data_file = Some("/nonexistent/bufnav/records.toml".to_string());
        let err = App::new(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to load records"));
    }

    #[test]
    fn test_multiline_record_value_is_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[[record]]\nid = 1\nvalue = \"two\\nlines\"\n\n[[record]]\nid = 2\nvalue = \"b\"\n"
        )
        .unwrap();

        let mut config = Config::default();
        config.general.data_file = Some(file.path().to_string_lossy().into_owned());
        let err = App::new(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("line break"));
    }

    #[test]
    fn test_one_master_line_per_record() {
        let (app, screen) = started();
        let stats = screen.line_stats(PanelRole::Master).unwrap();
        assert_eq!(stats.buffer_lines, app.source().len());
    }

    #[test]
    fn test_screen_renders_after_layout() {
        let (_app, screen) = started();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| bufnav_view::render_screen(&screen, frame.area(), frame.buffer_mut()))
            .unwrap();
        let buf = terminal.backend().buffer();
        let top: String = (0..80).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(top.contains("val"));
        assert!(top.contains("props"));
    }
}
