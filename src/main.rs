// tracetty: time-travel trace viewer

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tracetty::config::ViewerConfig;
use tracetty::snapshot;
use tracetty::ui::{App, Exit, Screen, StdinEvents, TerminalScreen};

/// Environment variable naming the log file; logging is off when unset
const LOG_ENV: &str = "TRACETTY_LOG";

#[derive(Parser, Debug)]
#[command(name = "tracetty", about = "Step through a recorded program trace", version)]
struct Args {
    /// Source file the trace was recorded from
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// History file (defaults to SOURCE with a .history extension)
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,

    /// Width of the call stack pane in columns
    #[arg(long, value_name = "COLUMNS")]
    stack_width: Option<usize>,
}

fn init_logging() -> anyhow::Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", PathBuf::from(&path).display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging()?;

    let Some(source_path) = args.source else {
        println!("Please provide a file name.");
        println!("Usage: tracetty <SOURCE> [--history <PATH>]");
        return Ok(());
    };

    let mut config = ViewerConfig::default();
    if let Some(width) = args.stack_width {
        config.stack_frame_width = width;
    }
    let history_path = args
        .history
        .unwrap_or_else(|| config.history_path_for(&source_path));

    let source = fs::read_to_string(&source_path)
        .with_context(|| format!("failed to read source file {}", source_path.display()))?;
    let history = fs::read_to_string(&history_path)
        .with_context(|| format!("failed to read history file {}", history_path.display()))?;
    let trace = snapshot::load(&source, &history)
        .with_context(|| format!("malformed history file {}", history_path.display()))?;

    let (width, height) = terminal::size()?;
    info!(
        source = %source_path.display(),
        history = %history_path.display(),
        width,
        height,
        "starting viewer"
    );

    enable_raw_mode()?;
    let mut app = App::new(&trace, config, TerminalScreen::new(io::stdout()), width, height);
    let session = app.draw().and_then(|()| app.run(StdinEvents::new()));
    let restored = disable_raw_mode();

    let exit = match settle(session, restored) {
        Ok(exit) => exit,
        Err(e) => {
            let mut screen = app.into_screen();
            if let Err(clear_err) = screen.clear().and_then(|()| screen.flush()) {
                warn!(%clear_err, "failed to clear the screen");
            }
            return Err(e);
        }
    };
    app.farewell()?;
    println!();
    info!(?exit, "viewer closed");
    Ok(())
}

/// Combine the session result with the attempt to leave raw mode.
///
/// A session failure is reported even when restoring the terminal fails
/// too; the restore failure is then only logged.
fn settle(session: io::Result<Exit>, restored: io::Result<()>) -> anyhow::Result<Exit> {
    match (session, restored) {
        (Ok(exit), Ok(())) => Ok(exit),
        (Ok(_), Err(e)) => Err(e).context("failed to restore the terminal"),
        (Err(e), restored) => {
            if let Err(restore_err) = restored {
                warn!(%restore_err, "failed to restore the terminal");
            }
            Err(e).context("terminal I/O failed")
        }
    }
}
