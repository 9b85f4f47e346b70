use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::{self, BufRead};
use std::path::PathBuf;

use stepmetrics::logging::init_logging;
use stepmetrics::{
    process_daily_log, process_workout_log, LogLevel, Reporter, TracingSink,
    TrackerConfig, WhitespacePolicy,
};

/// Sample daily step log, malformed lines included
const DEMO_DAILY_LOG: &[&str] = &[
    "678,0h50m",
    "792,1h14m",
    "1078,1h30m",
    "7830,2h40m",
    ",3456",
    "12:40:00, 3456",
    "something is wrong",
];

/// Sample workout log, malformed lines included
const DEMO_WORKOUT_LOG: &[&str] = &[
    "3456,Ходьба,3h00m",
    "something is wrong",
    "678,Бег,0h5m",
    "1078,Бег,0h10m",
    ",3456 Ходьба",
    "7892,Ходьба,3h10m",
    "15392,Бег,0h45m",
];

/// stepmetrics - step log and workout metrics
///
/// Turns "steps,duration" and "steps,activity,duration" records into
/// distance, speed and calorie reports.
#[derive(Parser)]
#[command(name = "stepmetrics")]
#[command(version)]
#[command(about = "Step log and workout metrics CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Body weight in kilograms (overrides config)
    #[arg(long, global = true)]
    weight: Option<f64>,

    /// Body height in metres (overrides config)
    #[arg(long, global = true)]
    height: Option<f64>,

    /// Trim whitespace around fields instead of rejecting it
    #[arg(long, global = true)]
    trim: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report daily step records ("steps,duration")
    Daily {
        /// Records to process (reads --file or stdin when omitted)
        records: Vec<String>,

        /// File with one record per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Report workout records ("steps,activity,duration")
    Workout {
        /// Records to process (reads --file or stdin when omitted)
        records: Vec<String>,

        /// File with one record per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Process the built-in sample logs
    Demo,

    /// Show or create the configuration file
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load_from_file(path)?,
        None => TrackerConfig::load_or_default(),
    };
    apply_overrides(&mut config, &cli)?;
    init_logging(&config.logging)?;
    tracing::info!(
        weight_kg = config.profile.weight_kg,
        height_m = config.profile.height_m,
        whitespace = ?config.parser.whitespace,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Daily { records, file } => {
            let lines = collect_records(records, file)?;
            run_daily(&config.reporter(), &lines);
        }

        Commands::Workout { records, file } => {
            let lines = collect_records(records, file)?;
            run_workout(&config.reporter(), &lines);
        }

        Commands::Demo => {
            let reporter = config.reporter();

            println!("{}", "Активность в течение дня".green().bold());
            run_daily(&reporter, DEMO_DAILY_LOG);

            println!("{}", "Журнал тренировок".cyan().bold());
            run_workout(&reporter, DEMO_WORKOUT_LOG);
        }

        Commands::Config { show, init } => {
            if init {
                let path = cli
                    .config
                    .clone()
                    .unwrap_or_else(TrackerConfig::default_config_path);
                if path.exists() {
                    anyhow::bail!("Config file already exists: {}", path.display());
                }
                TrackerConfig::default().save_to_file(&path)?;
                println!("{} {}", "✓ Config written to".green(), path.display());
            }
            if show || !init {
                let content = toml::to_string_pretty(&config)
                    .context("Failed to serialize configuration")?;
                print!("{}", content);
            }
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut TrackerConfig, cli: &Cli) -> Result<()> {
    if let Some(weight) = cli.weight {
        config.profile.weight_kg = weight;
    }
    if let Some(height) = cli.height {
        config.profile.height_m = height;
    }
    if cli.trim {
        config.parser.whitespace = WhitespacePolicy::Trim;
    }
    if cli.verbose > 0 {
        config.logging.level = LogLevel::from_verbosity(cli.verbose);
    }

    config.validate()
}

/// Records from arguments, a file, or stdin, in that order of preference
fn collect_records(records: Vec<String>, file: Option<PathBuf>) -> Result<Vec<String>> {
    if !records.is_empty() {
        return Ok(records);
    }

    let lines: Vec<String> = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read records from {}", path.display()))?
            .lines()
            .map(str::to_string)
            .collect(),
        None => io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<_>>()
            .context("Failed to read records from stdin")?,
    };

    Ok(lines.into_iter().filter(|l| !l.trim().is_empty()).collect())
}

fn run_daily<S: AsRef<str>>(reporter: &Reporter, lines: &[S]) {
    let reports = process_daily_log(lines, reporter, &mut TracingSink);
    for report in reports.iter().filter(|r| !r.is_empty()) {
        println!("{}", report);
    }
}

fn run_workout<S: AsRef<str>>(reporter: &Reporter, lines: &[S]) {
    let log = process_workout_log(lines, reporter, &mut TracingSink);
    for report in &log.reports {
        println!("{}", report);
    }

    if log.skipped_count() > 0 {
        eprintln!(
            "{}",
            format!(
                "Skipped {} of {} workout records",
                log.skipped_count(),
                log.processed()
            )
            .yellow()
        );
    }
}
