use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::{ArgAction, Parser, ValueEnum};
use schedule_engine::meeting::parse_clock_time;
use schedule_engine::{DeadZones, Enumerator, CLASS_DAYS};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod catalog;
mod render;

#[derive(Parser)]
#[command(
    name = "coursescheduler",
    version,
    about = "Rank conflict-free weekly class schedules from a course catalog"
)]
struct Cli {
    /// Catalog JSON file (use "-" for stdin)
    #[arg(long, value_name = "FILE")]
    catalog: PathBuf,

    /// Course code to schedule, e.g. "CSC 4350" (repeatable)
    #[arg(short = 'c', long = "course", required = true)]
    courses: Vec<String>,

    /// No classes before this time on any class day (e.g. "9:00 am")
    #[arg(long, value_parser = clock_time)]
    earliest: Option<NaiveTime>,

    /// No classes after this time on any class day (e.g. "17:00")
    #[arg(long, value_parser = clock_time)]
    latest: Option<NaiveTime>,

    /// Extra blocked slot, e.g. "MW 12:00 pm-01:00 pm" (repeatable)
    #[arg(short = 'b', long = "block")]
    blocks: Vec<String>,

    /// Show at most this many schedules
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn clock_time(s: &str) -> Result<NaiveTime, String> {
    parse_clock_time(s).map_err(|e| e.to_string())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn dead_zones(cli: &Cli) -> Result<DeadZones> {
    let mut zones = DeadZones::new();
    if let Some(earliest) = cli.earliest {
        zones = zones.block_before(&CLASS_DAYS, earliest)?;
    }
    if let Some(latest) = cli.latest {
        zones = zones.block_after(&CLASS_DAYS, latest)?;
    }
    for block in &cli.blocks {
        zones = zones
            .block_text(block)
            .with_context(|| format!("invalid --block '{block}'"))?;
    }
    Ok(zones)
}

fn run(cli: Cli) -> Result<()> {
    let catalog = catalog::load(&cli.catalog)?;
    info!(
        offerings = catalog.len(),
        path = %cli.catalog.display(),
        "Catalog loaded"
    );

    let zones = dead_zones(&cli)?;
    info!(intervals = zones.intervals().len(), "Dead zones configured");
    let baseline = zones.build()?;

    let result = Enumerator::new(&catalog, cli.courses.as_slice(), &baseline).enumerate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Text => render::write_text(&mut out, &result, cli.limit)?,
        Format::Json => render::write_json(&mut out, &result, cli.limit)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}
