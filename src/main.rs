// src/main.rs
//
// ansicopy — turn a styled terminal selection into ANSI escape-coded text
//
// Commands:
//   convert [INPUT] [-o OUTPUT] : clipboard-style HTML payload from a file (or stdin) →
//                                 escape-coded text to OUTPUT (or stdout)
//   copy                        : one clipboard cycle: HTML flavour in, text flavour out.
//                                 On Linux it stays until another app takes the clipboard.
//   watch [--interval-ms N]     : poll the clipboard and upgrade every new terminal copy
//
// Logs go to stderr so stdout stays pasteable. Filter: ANSICOPY_LOG (EnvFilter syntax);
// otherwise -v / -vv pick debug / trace, default warn.

use ansicopy::{markup_to_ansi, Ownership, SystemClipboard, Tick, Watcher};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use tracing_subscriber::EnvFilter;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// More logging (-v debug, -vv trace). ANSICOPY_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an HTML payload from a file or stdin
    Convert {
        /// Input file (default: stdin)
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert the HTML on the clipboard and write the result back as text
    Copy,
    /// Keep converting every new terminal copy until interrupted
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, env = "ANSICOPY_INTERVAL_MS", default_value_t = 500)]
        interval_ms: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Convert { input, output } => convert(input, output),
        Command::Copy => copy(),
        Command::Watch { interval_ms } => watch(Duration::from_millis(interval_ms.max(1))),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("ANSICOPY_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn convert(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let raw = match &input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let Some(ansi) = markup_to_ansi(&raw) else {
        debug!("input is blank; nothing to convert");
        return Ok(());
    };

    match &output {
        Some(path) => {
            fs::write(path, &ansi).with_context(|| format!("writing {}", path.display()))?
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(ansi.as_bytes()).context("writing stdout")?;
            stdout.flush().context("flushing stdout")?;
        }
    }
    Ok(())
}

fn copy() -> Result<()> {
    let mut clipboard = SystemClipboard::with_ownership(Ownership::HoldUntilReplaced)?;
    match Watcher::new().copy_once(&mut clipboard)? {
        Some(ansi) => info!(bytes = ansi.len(), "clipboard converted"),
        None => info!("no terminal HTML on the clipboard; nothing to convert"),
    }
    Ok(())
}

fn watch(interval: Duration) -> Result<()> {
    let mut clipboard = SystemClipboard::new()?;
    let mut watcher = Watcher::new();
    watcher.start();
    info!(interval_ms = interval.as_millis() as u64, "watching clipboard");

    loop {
        match watcher.tick(&mut clipboard) {
            Ok(Tick::Converted(ansi)) => info!(bytes = ansi.len(), "clipboard converted"),
            Ok(tick) => trace!(?tick, "poll"),
            // A failed poll is logged; the next one tries again.
            Err(err) => warn!(error = %err, "clipboard poll failed"),
        }
        thread::sleep(interval);
    }
}
