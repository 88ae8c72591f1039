// Framework bootstrap for the terminal game.

use crate::domain::tuning::Playfield;
use crate::frameworks::config::{self, GameSettings};
use crate::frameworks::terminal::{
    KeyboardSignals, RawModeGuard, TerminalScreen, restore_terminal, screen_owned,
};
use crate::interface_adapters::cli::Cli;
use crate::interface_adapters::protocol::SummaryDto;
use crate::interface_adapters::render::AsciiGrid;
use crate::use_cases::{GameSummary, run_session};
use clap::Parser;
use std::fs::File;
use std::io::{self, Result};
use std::sync::Mutex;
use tracing::Metadata;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

// Stderr shares the terminal with the playfield, so it stays quiet while the game is drawn.
fn stderr_allowed(_meta: &Metadata<'_>) -> bool {
    !screen_owned()
}

fn init_tracing() {
    // The terminal is the game display, so only warnings and up by default.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let writer = match config::log_file() {
        Some(path) => match File::create(&path) {
            Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
            Err(error) => {
                eprintln!("failed to open log file {}: {error}", path.display());
                BoxMakeWriter::new(io::stderr.with_filter(stderr_allowed))
            }
        },
        None => BoxMakeWriter::new(io::stderr.with_filter(stderr_allowed)),
    };

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(writer)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(writer)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        restore_terminal();
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Plays one session on the current terminal and returns its summary.
///
/// A countdown showing the chosen firepower and angle precedes play.
pub async fn run(settings: &GameSettings) -> Result<GameSummary> {
    let playfield = Playfield::default();
    let loop_settings = settings.loop_settings();

    let guard = RawModeGuard::enable().inspect_err(|error| {
        tracing::error!(%error, "failed to prepare terminal");
    })?;
    let screen = TerminalScreen::new(AsciiGrid::for_playfield(&playfield));
    let summary = run_session(
        loop_settings,
        playfield,
        KeyboardSignals,
        screen,
        config::LISTENER_POLL_TIMEOUT,
    )
    .await;
    drop(guard);

    Ok(summary)
}

pub async fn run_with_config() -> Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing();

    let settings = GameSettings::load(&cli).map_err(|e| {
        tracing::error!(error = %e, "failed to load settings");
        io::Error::other(e)
    })?;
    tracing::info!(?settings, "settings loaded");

    let summary = run(&settings).await?;

    if cli.json {
        let json = serde_json::to_string(&SummaryDto::from(&summary)).map_err(io::Error::other)?;
        println!("{json}");
    } else {
        println!("{summary}");
    }
    Ok(())
}
