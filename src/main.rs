//! FlixTUI - browse trending movies, TV shows and anime in the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! flixtui
//!
//! # CLI mode (for automation)
//! flixtui search "blade runner"
//! flixtui embed 1396 --kind tv --season 2 --episode 5
//! flixtui trending --kind anime --json
//! ```

use std::fs::OpenOptions;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use flixtui::app::{spawn_catalog_loaders, Action, App};
use flixtui::cli::{Cli, Command, ExitCode, Output};
use flixtui::config::{Config, ConfigStore};
use flixtui::{commands, ui};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.is_cli_mode());

    let store = ConfigStore::new(cli.config.clone());
    let config = store.load();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, &store, &config).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui(store, config).await
    }
}

// =============================================================================
// Logging
// =============================================================================

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose`.
/// The TUI owns the terminal, so it logs to a file instead of stderr.
fn init_logging(verbose: bool, cli_mode: bool) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "flixtui=debug".to_string()
        } else {
            "flixtui=info".to_string()
        }
    });

    let builder = tracing_subscriber::fmt().with_env_filter(&env_filter);

    if cli_mode {
        builder.with_writer(std::io::stderr).init();
        return;
    }

    let Some(path) = log_path() else {
        return;
    };
    let file = path
        .parent()
        .map(std::fs::create_dir_all)
        .transpose()
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));
    if let Ok(file) = file {
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
}

/// ~/.cache/flixtui/flixtui.log
fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("flixtui").join("flixtui.log"))
}

// =============================================================================
// CLI Mode
// =============================================================================

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, store: &ConfigStore, config: &Config) -> ExitCode {
    let output = Output::new(&cli);
    let client = config.client();

    match cli.command {
        Some(Command::Trending(cmd)) => commands::trending_cmd(cmd, &client, &output).await,

        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &client, &output).await,

        Some(Command::Seasons(cmd)) => commands::seasons_cmd(cmd, &client, &output).await,

        Some(Command::Episodes(cmd)) => commands::episodes_cmd(cmd, &client, &output).await,

        Some(Command::Embed(cmd)) => commands::embed_cmd(cmd, config.provider(), &output),

        Some(Command::Theme(cmd)) => commands::theme_cmd(cmd, store, config, &output),

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(store: ConfigStore, config: Config) -> Result<()> {
    info!(theme = %config.theme, provider = %config.provider(), "starting tui");

    let client = Arc::new(config.client());
    let mut app = App::new(config.theme, config.provider(), store);

    let (tx, rx) = mpsc::channel(8);
    spawn_catalog_loaders(Arc::clone(&client), tx);

    let mut terminal = init_terminal()?;

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app, &client, rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, updates state, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: &Arc<flixtui::TmdbClient>,
    mut rx: mpsc::Receiver<flixtui::app::CatalogUpdate>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        // Startup feeds land in whatever order their requests finish
        while let Ok(update) = rx.try_recv() {
            app.apply_catalog(update);
        }

        let width = terminal.size()?.width;
        app.fit_rows(ui::browser::cards_per_row(width));
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout so feed updates get drawn
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let action = app.handle_key(key);
                if let Action::OpenDetail(item) = &action {
                    // Show the modal in its loading state while seasons load
                    app.detail.begin_open(item.clone());
                    terminal.draw(|frame| ui::render(frame, app))?;
                }
                app.perform(action, client).await;
            }
        }
    }

    Ok(())
}
