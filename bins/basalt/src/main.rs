use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use basalt_config::AnalyzeConfig;
use basalt_engine::{Pipeline, report};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "basalt", version, about = "Streaming access-log analyzer")]
struct Args {
    /// Access log to analyze, one Common Log Format line per record.
    input: PathBuf,

    /// TOML config file; missing keys fall back to built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the per-feature output files go (overrides the config).
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AnalyzeConfig::load(path.display().to_string())?,
        None => AnalyzeConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));

    // a log we cannot open or read is the one fatal condition
    let input = File::open(&args.input).map_err(|err| {
        error!("failed to open {}: {err}", args.input.display());
        err
    })?;

    info!("analyzing {}", args.input.display());

    let mut pipeline = Pipeline::new(&config);
    for line in BufReader::new(input).lines() {
        let line = line.map_err(|err| {
            error!("failed to read {}: {err}", args.input.display());
            err
        })?;
        pipeline.feed_line(&line);
    }
    pipeline.finish();

    info!(
        accepted = pipeline.accepted,
        skipped = pipeline.skipped,
        blocked = pipeline.blocked_lines.len(),
        "input processed"
    );

    report::write_all(&output_dir, &pipeline);

    Ok(())
}
