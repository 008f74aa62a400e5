//! Submutator - subdomain pattern analyzer
//!
//! Reads a list of known subdomains, reports the patterns found in each one
//! and writes the expanded permutation candidates to disk.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use submutator::{
    analyzer::AnalysisProgress,
    console, logging,
    types::{default_concurrency, AnalysisConfig, DEFAULT_OUTPUT_DIR},
    SubdomainAnalyzer,
};

#[derive(Parser, Debug)]
#[command(name = "submutator")]
#[command(version, about = "Analyze subdomain naming patterns and generate permutation candidates")]
struct Cli {
    /// File containing one subdomain per line
    #[arg(short = 'i', long = "input-list", env = "SUBMUTATOR_INPUT")]
    input_list: PathBuf,

    /// Enable debug logging
    #[arg(short, long, env = "SUBMUTATOR_VERBOSE")]
    verbose: bool,

    /// Maximum candidates kept per hostname
    #[arg(
        long,
        env = "SUBMUTATOR_MAX_VARIATIONS",
        default_value_t = submutator::DEFAULT_MAX_VARIATIONS as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    max_variations: u64,

    /// Directory for the pattern log and variation files
    #[arg(short, long, env = "SUBMUTATOR_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Hostnames analyzed in parallel (defaults to the CPU count)
    #[arg(
        short,
        long,
        env = "SUBMUTATOR_CONCURRENCY",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    concurrency: Option<u64>,

    /// Also write a JSON summary of the run
    #[arg(long, env = "SUBMUTATOR_JSON")]
    json: bool,

    /// Analyze lines as-is without hostname validation
    #[arg(long)]
    no_validate: bool,
}

impl Cli {
    fn to_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            max_variations: self.max_variations as usize,
            output_dir: self.output_dir.clone(),
            concurrency: self
                .concurrency
                .map(|c| c as usize)
                .unwrap_or_else(default_concurrency),
            validate_input: !self.no_validate,
            json_summary: self.json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads SUBMUTATOR_* variables
    if let Err(e) = submutator::init() {
        console::error(&format!("Failed to initialize: {}", e));
        process::exit(1);
    }

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    tokio::select! {
        result = run(cli) => {
            if let Err(e) = result {
                console::error(&e.user_message());
                process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!();
            console::error("Analysis interrupted by user");
            process::exit(1);
        }
    }

    Ok(())
}

async fn run(cli: Cli) -> submutator::Result<()> {
    let config = cli.to_config();
    let analyzer = SubdomainAnalyzer::new(config)?;

    console::banner();
    console::info(&format!("Reading subdomains from {}", cli.input_list.display()));
    console::info(&format!(
        "Max variations per hostname: {}, workers: {}",
        analyzer.config().max_variations,
        analyzer.config().concurrency
    ));

    let pb = console::progress_bar(0);
    let report = analyzer
        .run(&cli.input_list, |progress: &AnalysisProgress| {
            pb.set_length(progress.total);
            pb.set_position(progress.current);
        })
        .await;
    pb.finish_and_clear();

    let report = report?;
    if report.summary.hostnames_analyzed == 0 && report.summary.hostnames_skipped == 0 {
        console::warning("No subdomains found in input file");
    }

    console::print_summary(&report.summary, &report.paths);
    Ok(())
}
