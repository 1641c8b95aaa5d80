//! BLOCKFALL driver
//!
//! Plays a scripted input sequence against a fresh session and prints the
//! final state as JSON.

use anyhow::{Context, Result};
use blockfall::queue::Randomizer;
use blockfall::script;
use blockfall::{Session, Settings};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "blockfall", version)]
#[command(about = "Run a falling-block session from a script of inputs and print the result")]
struct Cli {
    /// Settings file; defaults to the platform config directory
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed for the piece queue
    #[arg(long)]
    seed: Option<u64>,
    /// Piece randomizer: uniform, no-repeat or bag
    #[arg(long)]
    randomizer: Option<Randomizer>,
    /// Inline script, e.g. "left left cw drop tick"
    #[arg(long, conflicts_with = "script_file")]
    script: Option<String>,
    /// Read the script from a file
    #[arg(long)]
    script_file: Option<PathBuf>,
    /// Pretty-print the JSON report
    #[arg(long, default_value_t = false)]
    pretty: bool,
    /// Log to stderr instead of a file in the temp directory
    #[arg(long, default_value_t = false)]
    log_stderr: bool,
}

/// Get the blockfall temp directory, creating it if needed
fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = fs::create_dir_all(&dir);
    dir
}

fn env_filter() -> Result<tracing_subscriber::EnvFilter> {
    Ok(tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("blockfall=debug".parse().context("bad log directive")?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let run_id: u32 = rand::random();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = if cli.log_stderr {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter()?)
            .init();
        None
    } else {
        let log_file = format!("{:08x}.log", run_id);
        let file_appender = tracing_appender::rolling::never(temp_dir(), &log_file);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_env_filter(env_filter()?)
            .with_ansi(false)
            .init();
        Some(guard)
    };

    tracing::info!("blockfall starting, run={:08x}", run_id);

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load().context("loading settings")?,
    };
    if let Some(randomizer) = cli.randomizer {
        settings.gameplay.randomizer = randomizer;
    }
    if let Some(seed) = cli.seed {
        settings.gameplay.seed = Some(seed);
    }
    settings.validate()?;

    let source = match (&cli.script, &cli.script_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        (None, None) => String::new(),
    };
    let events = script::parse(&source).context("parsing script")?;

    let config = settings.to_config(rand::random());
    tracing::info!(
        seed = config.seed,
        randomizer = ?config.randomizer,
        width = config.width,
        height = config.height,
        events = events.len(),
        "session configured"
    );

    let mut session = Session::new(config);
    session.spawn();
    let applied = script::run(&mut session, &events);

    let snapshot = session.snapshot();
    tracing::info!(
        applied,
        points = snapshot.points,
        lines = snapshot.lines,
        state = ?snapshot.state,
        "run finished"
    );

    let report = if cli.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{report}");
    Ok(())
}
