// didifit-tui/src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use didifit_lib::{get_db_path_util, AppService};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{fs::OpenOptions, io, path::Path, sync::Mutex, time::Duration};
use tracing_subscriber::{fmt, EnvFilter};

mod app; // Application state
mod cli;
mod ui; // UI rendering logic

use crate::app::App;

const LOG_FILE_NAME: &str = "didifit.log";

/// Logs go to a file beside the database; stdout belongs to the terminal UI.
fn init_logging(db_path: &Path) -> Result<()> {
    let log_path = db_path.with_file_name(LOG_FILE_NAME);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {log_path:?}"))?;

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let db_path = match args.db {
        Some(path) => path,
        None => get_db_path_util().context("Failed to determine database path")?,
    };
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {parent:?}"))?;
    }
    init_logging(&db_path)?;

    // Initialize the library service
    let app_service = AppService::initialize(Some(&db_path), args.config_dir.as_deref())?;
    tracing::info!(db = %db_path.display(), "DidiFit started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run it
    let mut app = App::new(app_service);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Terminal loop failed");
        eprintln!("Error: {:?}", err); // Print errors to stderr
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.refresh();

        terminal.draw(|f| ui::render_ui(f, app))?;

        // Poll with a timeout so expired status messages clear without input
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events
                if key.kind == KeyEventKind::Press {
                    app.handle_key_event(key)?;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
