//! `roomcheck` CLI: find free and occupied classrooms across timetable CSV files.
//!
//! ## Usage
//!
//! ```sh
//! # Which rooms are free or occupied on Monday at 9:00?
//! roomcheck --data civil.csv --data datascience.csv query --day Monday --time 9:00
//!
//! # Only the free rooms, as JSON
//! roomcheck -d civil.csv query --day Monday --time 2:10pm --only free --json
//!
//! # Use the data files and policies from a config file
//! roomcheck --config roomcheck.toml query --day Tuesday --time 11:30
//!
//! # Show how every slot string was resolved
//! roomcheck -d civil.csv slots --day Monday
//!
//! # List every known room
//! roomcheck -d civil.csv rooms
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use roomcheck_engine::ingest;
use roomcheck_engine::slot::SlotResolution;
use roomcheck_engine::{AvailabilityEngine, BoundaryMode, EngineConfig, RoomFilter, TimetableSnapshot};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "roomcheck",
    version,
    about = "Find free and occupied classrooms across timetable CSV files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Timetable CSV file; repeat for several tables (overrides data_files in the config)
    #[arg(short, long = "data", global = true)]
    data: Vec<PathBuf>,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every room's status at a day and time
    Query {
        /// Day of the week, e.g. "Monday" (case-insensitive)
        #[arg(long)]
        day: String,
        /// Time of day, e.g. "9:00", "2:10pm", "14:10"
        #[arg(long)]
        time: String,
        /// Show only free or only occupied rooms
        #[arg(long, value_enum)]
        only: Option<Only>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Treat a slot's end minute as outside the slot
        #[arg(long)]
        half_open: bool,
    },
    /// Show how each record's slot string resolves
    Slots {
        /// Restrict to one day
        #[arg(long)]
        day: Option<String>,
    },
    /// List every known room
    Rooms,
}

#[derive(Clone, Copy, ValueEnum)]
enum Only {
    Free,
    Occupied,
}

fn room_filter(only: Option<Only>) -> RoomFilter {
    match only {
        None => RoomFilter::All,
        Some(Only::Free) => RoomFilter::Free,
        Some(Only::Occupied) => RoomFilter::Occupied,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let snapshot = load_snapshot(&cli.data, &config)?;

    match cli.command {
        Commands::Query {
            day,
            time,
            only,
            json,
            half_open,
        } => {
            let mut engine =
                AvailabilityEngine::from_config(&config).context("Invalid configuration")?;
            if half_open {
                engine = engine.with_boundary(BoundaryMode::HalfOpen);
            }

            let report = engine.query_snapshot(&day, &time, &snapshot)?;
            let filter = room_filter(only);
            if json {
                let pretty = serde_json::to_string_pretty(&report.filtered(filter))?;
                println!("{}", pretty);
            } else {
                println!("{}", report.render(filter));
            }
        }
        Commands::Slots { day } => {
            let engine =
                AvailabilityEngine::from_config(&config).context("Invalid configuration")?;
            let records = snapshot
                .records()
                .iter()
                .filter(|r| day.as_deref().is_none_or(|day| r.is_on(day)));
            for record in records {
                let outcome = match engine.explain_slot(record) {
                    SlotResolution::Resolved { interval, format } => {
                        format!("{} ({})", interval, format)
                    }
                    SlotResolution::NonClass => "no class".to_string(),
                    SlotResolution::Unrecognized => "unparseable".to_string(),
                    SlotResolution::Invalid { format } => format!("unparseable ({})", format),
                };
                println!(
                    "{} {} {} \"{}\" -> {}",
                    record.department,
                    record.classroom,
                    record.day,
                    one_line(&record.raw_slot),
                    outcome
                );
            }
        }
        Commands::Rooms => {
            for room in snapshot.rooms() {
                println!("{}", room);
            }
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Load the timetables named on the command line, else those in the config.
fn load_snapshot(cli_files: &[PathBuf], config: &EngineConfig) -> Result<TimetableSnapshot> {
    let files = if cli_files.is_empty() {
        config.data_files.as_slice()
    } else {
        cli_files
    };
    if files.is_empty() {
        bail!("No timetable files given. Pass --data <CSV> or set data_files in the config.");
    }

    let records = ingest::load_all(files).context("Failed to load timetables")?;
    debug!(files = files.len(), records = records.len(), "timetables loaded");
    Ok(TimetableSnapshot::new(records))
}

/// Collapse line breaks and runs of whitespace for single-line display.
fn one_line(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
