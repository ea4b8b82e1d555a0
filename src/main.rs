use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use gainratio::config::{ConfigOverrides, RunConfig};
use gainratio::io::{DatasetReader, OutputFormat, ResultWriter};
use gainratio::selection::{GainRatioCalculator, NonFinitePolicy};

#[derive(Parser)]
#[command(name = "gainratio")]
#[command(about = "Rank categorical attributes of a labelled CSV file by gain ratio")]
#[command(version)]
struct Cli {
    /// Input CSV file with a header row
    input: Option<PathBuf>,

    /// JSON configuration file; explicit flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file [default: result.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of trailing columns forming the label [default: 2]
    #[arg(long)]
    label_columns: Option<usize>,

    /// Output format: csv, tsv or json [default: csv]
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Where NaN ratios are ranked: last or first [default: last]
    #[arg(long)]
    non_finite: Option<NonFinitePolicy>,

    /// Include entropy, gain and split information for each attribute
    #[arg(long)]
    breakdown: bool,

    /// Number of threads for parallel scoring (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            label_columns: self.label_columns,
            format: self.format,
            non_finite: self.non_finite,
            threads: self.threads,
            breakdown: self.breakdown,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let base = match &cli.config {
        Some(path) => RunConfig::load(path).context("failed to read configuration")?,
        None => RunConfig::default(),
    };
    let config = base.merge(cli.overrides());

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    let input = config
        .input
        .as_deref()
        .context("no input file: pass one on the command line or set `input` in the config")?;

    let loaded = DatasetReader::new(input, config.label_columns)
        .read()
        .context("failed to read input CSV")?;

    let calculator = GainRatioCalculator::new(loaded.attribute_names, loaded.dataset)
        .context("cannot score dataset")?;

    let writer = ResultWriter::new(&config.output, config.format, config.non_finite);
    let written = if config.breakdown {
        writer.write_scores(&calculator.scores())
    } else {
        writer.write(&calculator.calc_gain_ratio())
    };
    written.context("failed to write results")?;

    info!(output = %config.output.display(), "done");
    Ok(())
}
