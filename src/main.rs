// src/main.rs

use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{error, info};

use safescope::config::Config;
use safescope::core::analyzer::Analyzer;
use safescope::core::error::AnalysisError;
use safescope::core::models::Assessment;
use safescope::core::scanner::profile_source::ProfileFactsSource;
use safescope::logging;

mod app;
mod ui;

use app::{App, AppState, InputMode};

#[derive(Parser)]
#[command(name = "safescope", version, about = "Risk scores and red/green flags for domains, QR codes and social profiles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,
    /// Assess a domain name
    Domain {
        name: String,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Assess the decoded content of a QR code
    Qr {
        payload: String,
        #[arg(long)]
        pretty: bool,
    },
    /// Assess a social-media profile
    Profile {
        platform: String,
        handle: String,
        /// JSON document with the profile's observed facts
        #[arg(long)]
        facts: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
}

type Outcome = Result<Assessment, String>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    let cli = Cli::parse();
    let config = Config::load().wrap_err("invalid SAFESCOPE_* configuration")?;
    let analyzer = Analyzer::from_config(&config).wrap_err("could not build the HTTP client")?;
    info!(timeout_ms = config.source_timeout.as_millis() as u64, rdap = %config.rdap_url, "Configuration loaded.");

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => run_tui(Arc::new(analyzer)).await,
        Command::Domain { name, pretty } => print_outcome(analyzer.analyze_domain(&name).await, pretty),
        Command::Qr { payload, pretty } => print_outcome(analyzer.analyze_qr(&payload).await, pretty),
        Command::Profile { platform, handle, facts, pretty } => {
            let analyzer = match facts {
                Some(path) => analyzer.with_source(Arc::new(ProfileFactsSource::from_path(&path)?)),
                None => analyzer,
            };
            print_outcome(analyzer.analyze_profile(&platform, &handle).await, pretty)
        }
    }
}

/// Prints the assessment or error body as JSON. Validation errors exit with
/// 2 and internal errors with 1.
fn print_outcome(result: Result<Assessment, AnalysisError>, pretty: bool) -> Result<()> {
    let (body, exit_code) = match &result {
        Ok(assessment) => (serde_json::to_value(assessment)?, 0),
        Err(e @ AnalysisError::Validation(_)) => (e.to_body(), 2),
        Err(e @ AnalysisError::Internal { .. }) => (e.to_body(), 1),
    };
    let text = if pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    println!("{}", text);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn run_tui(analyzer: Arc<Analyzer>) -> Result<()> {
    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let log_path = logging::log_file_path();
    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<Outcome>(1);

    while !app.should_quit {
        if app.show_logs {
            app.refresh_logs(&log_path);
        }
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &tx, &analyzer)?;
        }

        if let Ok(outcome) = rx.try_recv() {
            app.finish(outcome);
        }
        app.on_tick();
    }

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

fn handle_events(app: &mut App, tx: &mpsc::Sender<Outcome>, analyzer: &Arc<Analyzer>) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            match app.state {
                AppState::Idle => handle_idle_input(app, key.code, tx, analyzer),
                AppState::Finished => handle_finished_input(app, key.code),
                AppState::Analyzing => {
                    if key.code == KeyCode::Esc {
                        app.quit();
                    }
                }
            }
        }
    }
    Ok(())
}

fn handle_idle_input(app: &mut App, key_code: KeyCode, tx: &mpsc::Sender<Outcome>, analyzer: &Arc<Analyzer>) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.toggle_mode(),
        KeyCode::F(2) => app.toggle_logs(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Enter => {
            if app.input.trim().is_empty() {
                return;
            }
            app.state = AppState::Analyzing;
            let tx_clone = tx.clone();
            let analyzer = Arc::clone(analyzer);
            let input = app.input.clone();
            let mode = app.mode;

            tokio::spawn(async move {
                let result = match mode {
                    InputMode::Domain => analyzer.analyze_domain(&input).await,
                    InputMode::Qr => analyzer.analyze_qr(&input).await,
                };
                let outcome = result.map_err(|e| {
                    error!(error = %e, "Analysis request failed.");
                    e.to_string()
                });
                let _ = tx_clone.send(outcome).await;
            });
        }
        _ => {}
    }
}

fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Char('l') => app.toggle_logs(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Left => app.scroll_logs_left(),
        KeyCode::Right => app.scroll_logs_right(),
        _ => {}
    }
}
