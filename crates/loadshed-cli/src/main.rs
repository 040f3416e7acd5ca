//! `loadshed` CLI — reconcile a load-shedding dataset into outage windows.
//!
//! ## Usage
//!
//! ```sh
//! # Render a dataset (stdin → stdout)
//! curl -s "$AREA_URL" | loadshed render
//!
//! # Render from file, as JSON
//! loadshed render -i area.json --json
//!
//! # Re-render on the refresh cadence (defaults: 30 minutes)
//! loadshed watch -i area.json --config refresh.json
//!
//! # More logging (RUST_LOG overrides)
//! loadshed -vv render -i area.json
//! ```

use std::io::{self, IsTerminal, Read};
use std::thread;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use loadshed_engine::{DisplayList, FetchOutcome, RefreshPolicy, RefreshScheduler};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "loadshed",
    version,
    about = "Reconcile load-shedding stage events with recurring outage slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a dataset once and print the display list
    Render {
        /// Input dataset JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit the display list as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Re-read and reconcile a dataset file on the refresh cadence
    Watch {
        /// Input dataset JSON, re-read on every refresh
        #[arg(short, long)]
        input: String,
        /// Refresh policy JSON (`update_interval_secs`, `retry_delay_secs`)
        #[arg(long)]
        config: Option<String>,
        /// Stop after this many refresh attempts
        #[arg(long)]
        cycles: Option<u32>,
        /// Emit each display list as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            input,
            output,
            json,
        } => {
            let raw = read_input(input.as_deref())?;
            let display =
                loadshed_engine::render_json(&raw).context("Failed to reconcile dataset")?;
            write_output(output.as_deref(), &present(&display, json)?)?;
        }
        Commands::Watch {
            input,
            config,
            cycles,
            json,
        } => {
            let policy = load_policy(config.as_deref())?;
            watch(&input, policy, cycles, json)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for the display list.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn load_policy(path: Option<&str>) -> Result<RefreshPolicy> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            RefreshPolicy::from_json(&raw)
                .with_context(|| format!("Invalid refresh config: {}", path))
        }
        None => Ok(RefreshPolicy::default()),
    }
}

/// Refresh loop. A failed attempt keeps the last good display on screen.
fn watch(input: &str, policy: RefreshPolicy, cycles: Option<u32>, json: bool) -> Result<()> {
    let mut scheduler = RefreshScheduler::new(policy);
    let mut attempts = 0u32;

    loop {
        let attempt = read_input(Some(input)).and_then(|raw| {
            loadshed_engine::render_json(&raw).context("Failed to reconcile dataset")
        });
        let outcome = match attempt {
            Ok(display) => {
                write_output(None, &present(&display, json)?)?;
                FetchOutcome::Loaded
            }
            Err(e) => {
                warn!("refresh failed: {:#}", e);
                FetchOutcome::Failed
            }
        };

        let delay = scheduler.record(outcome);
        attempts += 1;
        if cycles.is_some_and(|limit| attempts >= limit) {
            break;
        }
        info!(?delay, loaded = scheduler.has_loaded(), "waiting for next refresh");
        thread::sleep(delay);
    }

    Ok(())
}

fn present(display: &DisplayList, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(display)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(display.to_string())
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
