//! dinner: seat a ring of philosophers around one coordinator and let them
//! eat, think, talk and nap.
//!
//! # Configuration
//!
//! Settings are merged with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. TOML file given with `--config`
//! 3. Default values (lowest priority)
//!
//! `RUST_LOG` overrides the log filter; `--verbose` switches the narration
//! to `debug`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ph_core::{TableConfig, Variant};
use ph_output::{CsvWriter, EventLog};
use ph_table::{TableBuilder, TableReport, TracingNarrator};

/// Dining philosophers around a monitor.
#[derive(Parser, Debug)]
#[command(name = "dinner")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of philosophers
    philosophers: Option<usize>,

    /// TOML file with a dinner configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Coordinator: `basic` or `advanced`
    #[arg(long)]
    variant: Option<Variant>,

    /// Eat/think/talk cycles per philosopher
    #[arg(long)]
    steps: Option<u32>,

    /// Upper bound of every activity, in milliseconds
    #[arg(long, value_name = "MS")]
    time_to_waste: Option<u64>,

    /// Master RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Chance of talking after thinking
    #[arg(long, value_name = "P")]
    talk_probability: Option<f64>,

    /// Chance of a nap after thinking (advanced only)
    #[arg(long, value_name = "P")]
    sleep_probability: Option<f64>,

    /// Cancel everyone after this many milliseconds
    #[arg(long, value_name = "MS")]
    max_run: Option<u64>,

    /// Eating ranks, comma-separated, one per philosopher (advanced only)
    #[arg(long, value_delimiter = ',')]
    priorities: Option<Vec<u32>>,

    /// Write events.csv and summary.csv into this directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Narrate every step, not just meals, talks and naps
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Layer the CLI flags over `base`.
    fn apply(&self, mut base: TableConfig) -> TableConfig {
        if let Some(n) = self.philosophers {
            base.philosophers = n;
        }
        if let Some(v) = self.variant {
            base.variant = v;
        }
        if let Some(s) = self.steps {
            base.dining_steps = s;
        }
        if let Some(ms) = self.time_to_waste {
            base.time_to_waste_ms = ms;
        }
        if let Some(seed) = self.seed {
            base.seed = seed;
        }
        if let Some(p) = self.talk_probability {
            base.talk_probability = p;
        }
        if let Some(p) = self.sleep_probability {
            base.sleep_probability = p;
        }
        if self.max_run.is_some() {
            base.max_run_ms = self.max_run;
        }
        base
    }
}

fn load_config(path: Option<&Path>) -> Result<TableConfig> {
    let Some(path) = path else {
        return Ok(TableConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn print_summary(report: &TableReport) {
    println!();
    println!("{} dinner, {:.2?}", report.variant, report.elapsed);
    println!("{:>12} {:>6} {:>7} {:>6} {:>9} {:>5}", "philosopher", "meals", "waited", "talks", "timed-out", "naps");
    for t in &report.tallies {
        println!(
            "{:>12} {:>6} {:>7} {:>6} {:>9} {:>5}{}",
            t.agent.0 + 1,
            t.meals,
            t.waited_meals,
            t.talks,
            t.timed_out_talks,
            t.naps,
            if t.stopped_early { "  (left early)" } else { "" },
        );
    }
    println!(
        "total: {} meals, {} talks, {} naps",
        report.total_meals(),
        report.total_talks(),
        report.total_naps()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let config = args.apply(load_config(args.config.as_deref())?);
    info!(
        philosophers = config.philosophers,
        variant = %config.variant,
        steps = config.dining_steps,
        seed = config.seed,
        "setting the table"
    );

    let mut builder = TableBuilder::new(config);
    if let Some(ranks) = args.priorities.clone() {
        builder = builder.priorities(ranks);
    }
    let table = builder.build().context("building the table")?;

    let report = match &args.output {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            let log = EventLog::new(CsvWriter::new(dir)?);
            let report = table.run(&(TracingNarrator, &log))?;
            if let Some(e) = log.take_error() {
                bail!("writing the dinner log: {e}");
            }
            info!(events = log.events_logged(), dir = %dir.display(), "dinner log written");
            report
        }
        None => table.run(&TracingNarrator)?,
    };

    print_summary(&report);
    Ok(())
}
