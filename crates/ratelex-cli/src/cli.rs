use clap::{Args, Parser, Subcommand};
use ratelex_classifiers::Strategy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ratelex")]
#[command(
    author,
    version,
    about = "Classify term sentiment from rating histograms"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify every term in a terms file
    Classify(ClassifyArgs),

    /// Print the per-rating weight table derived from a corpus
    Weights(WeightsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Engine configuration (YAML); defaults apply when omitted
    #[arg(short, long, env = "RATELEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Corpus length totals (JSON)
    #[arg(long)]
    pub corpus: PathBuf,

    /// Term histograms (JSON)
    #[arg(short, long)]
    pub terms: PathBuf,

    /// Strategy: threshold or window (overrides the configured default)
    #[arg(short, long, value_parser = parse_strategy)]
    pub strategy: Option<Strategy>,

    /// Worker count (defaults to the number of CPUs)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Report counters and Prometheus metrics on stderr
    #[arg(long)]
    pub metrics: bool,
}

#[derive(Args, Debug, Clone)]
pub struct WeightsArgs {
    /// Engine configuration (YAML); defaults apply when omitted
    #[arg(short, long, env = "RATELEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Corpus length totals (JSON)
    #[arg(long)]
    pub corpus: PathBuf,
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse().map_err(|e: ratelex_core::Error| e.to_string())
}
