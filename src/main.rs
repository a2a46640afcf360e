use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use bufnav_app::{init_logging, App};
use bufnav_config::Config;
use bufnav_logger as logger;

fn main() -> Result<()> {
    // Load config, fall back to defaults if it is unreadable
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config);
    if let Err(e) = loaded {
        logger::warn(format!("Using default config: {:#}", e));
    }

    // Build the app before touching the terminal so startup errors print cleanly
    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(err) => {
            logger::error(format!("Startup failed: {:#}", err));
            eprintln!("Error: {:?}", err);
            std::process::exit(1);
        }
    };

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.general.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run application
    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    if config.general.mouse {
        let _ = execute!(terminal.backend_mut(), DisableMouseCapture);
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print error if there was one
    if let Err(err) = result {
        logger::error(format!("Stopped with error: {:#}", err));
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    logger::info("Exited normally");
    Ok(())
}
