//! Command line driver: loads a roster, runs battles, writes the logs.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use gridbots_core::{BattleConfig, BattleSummary, Battlefield, LogSink, Roster, TeeSink, WriterSink};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

/// Run a grid robot battle from a roster file.
#[derive(Parser, Debug)]
#[command(name = "gridbots", version)]
#[command(about = "Turn-based robot battles on a grid")]
struct Args {
    /// Roster file to load
    #[arg(default_value = "input.txt")]
    roster: PathBuf,

    /// Log file receiving every event line and board
    #[arg(long, default_value = "log.txt")]
    log: PathBuf,

    /// Random seed (random and printed when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Step budget, overriding the roster and config
    #[arg(long)]
    steps: Option<u32>,

    /// JSON battle configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write to the log file only
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Number of independent battles, seeded `seed`, `seed + 1`, ...
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Print summaries as JSON
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridbots=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<BattleConfig> {
    let Some(path) = path else {
        return Ok(BattleConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// `log.txt` becomes `log-3.txt` for run 3.
fn numbered_log(base: &Path, index: u32) -> PathBuf {
    let stem = base.file_stem().map_or_else(|| "log".into(), |s| s.to_string_lossy());
    let name = match base.extension() {
        Some(ext) => format!("{stem}-{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{index}"),
    };
    base.with_file_name(name)
}

fn run_battle(
    roster: Roster,
    config: BattleConfig,
    seed: u64,
    log: &Path,
    echo: bool,
) -> Result<BattleSummary> {
    let mut battle = roster
        .into_battlefield(config, seed)
        .context("failed to set up the battlefield")?;
    let file = File::create(log).with_context(|| format!("failed to create log {}", log.display()))?;
    let file = WriterSink::new(BufWriter::new(file));

    let summary = if echo {
        let mut sink = TeeSink::new(WriterSink::new(io::stdout().lock()), file);
        run_with(&mut battle, &mut sink)?
    } else {
        let mut sink = file;
        run_with(&mut battle, &mut sink)?
    };
    tracing::info!(seed, log = %log.display(), "battle log written");
    Ok(summary)
}

fn run_with(battle: &mut Battlefield, sink: &mut dyn LogSink) -> Result<BattleSummary> {
    battle.run(sink).context("battle output failed")
}

fn report(summary: &BattleSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(summary)?);
    } else {
        println!(
            "seed {}: {} after {} rounds, survivors [{}], graveyard [{}]",
            summary.seed,
            summary.outcome,
            summary.rounds,
            summary.survivors.join(", "),
            summary.graveyard.join(", ")
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut roster = Roster::load(&args.roster)
        .with_context(|| format!("failed to load roster {}", args.roster.display()))?;
    if args.steps.is_some() {
        roster.steps = args.steps;
    }
    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    println!("seed: {seed}");

    if args.runs <= 1 {
        let summary = run_battle(roster, config, seed, &args.log, !args.quiet)?;
        return report(&summary, args.json);
    }

    // Parallel runs write to their log files only
    let results: Vec<_> = (0..args.runs)
        .into_par_iter()
        .map(|i| {
            let run_seed = seed.wrapping_add(u64::from(i));
            let log = numbered_log(&args.log, i);
            (i, run_battle(roster.clone(), config, run_seed, &log, false))
        })
        .collect();

    let mut failed = 0;
    for (i, result) in results {
        match result {
            Ok(summary) => report(&summary, args.json)?,
            Err(err) => {
                failed += 1;
                tracing::error!(run = i, "run failed: {err:#}");
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} runs failed", args.runs);
    }
    Ok(())
}
