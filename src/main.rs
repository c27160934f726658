mod app;
mod config;
mod form;
mod notes;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::AppConfig;

/// How long to wait for input before redrawing (drives the spinner and timeouts)
const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "jotter")]
#[command(author = "Sean Fournier")]
#[command(version = "0.1.0")]
#[command(about = "A terminal notes list for quick, throwaway jotting")]
struct Args {
    /// Use this config file instead of ~/.config/jotter/config.toml
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skip the loading screen
    #[arg(long)]
    no_splash: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never land in the alternate screen buffer
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if args.no_splash {
        config.loading_delay_ms = 0;
    }

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    run_tui(config).await
}

async fn run_tui(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    tracing::info!("Starting jotter");

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(notes = app.store.len(), "Session ended, notes discarded");
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Some(Event::Key(key)) = next_event(TICK_RATE).await? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }

        app.tick();
    }
}

/// Wait up to `timeout` for a terminal event without blocking the runtime
async fn next_event(timeout: Duration) -> Result<Option<Event>> {
    let event = tokio::task::spawn_blocking(move || -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    })
    .await??;

    Ok(event)
}
