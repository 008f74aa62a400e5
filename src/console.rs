//! Terminal output helpers

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::report::ReportPaths;
use crate::types::{AnalysisSummary, PatternCategory};

const RULE_WIDTH: usize = 51;

pub fn success(msg: &str) {
    println!("{} {}", "[+]".green().bold(), msg);
}

pub fn info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "[!]".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "[-]".red().bold(), msg.red());
}

pub fn banner() {
    println!(
        "{}",
        format!("🔍 Submutator v{} - subdomain pattern analysis", crate::VERSION)
            .bright_green()
            .bold()
    );
    println!("{}", "═".repeat(RULE_WIDTH).bright_black());
    println!();
}

/// Progress bar over `total` hostnames
pub fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(
        "{spinner:.blue} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▉▊▋▌▍▎▏ ");

    pb.set_style(style);
    pb.set_message("hostnames");
    pb
}

/// Print run totals and where the reports went
pub fn print_summary(summary: &AnalysisSummary, paths: &ReportPaths) {
    println!();
    success("Analysis complete");
    info(&format!("Subdomains analyzed: {}", summary.hostnames_analyzed));
    if summary.hostnames_skipped > 0 {
        warning(&format!("Invalid lines skipped: {}", summary.hostnames_skipped));
    }
    info(&format!("Patterns found: {}", summary.total_patterns));
    for category in PatternCategory::ALL {
        if let Some(count) = summary.patterns_by_category.get(&category) {
            println!("    {} {}", format!("{}:", category).bright_black(), count);
        }
    }
    info(&format!("Variations generated: {}", summary.total_variations));
    if summary.hostnames_truncated > 0 {
        warning(&format!(
            "{} hostnames hit the {} variation limit",
            summary.hostnames_truncated, summary.max_variations
        ));
    }
    info(&format!("Elapsed: {:.2}s", summary.elapsed_secs));

    println!();
    success(&format!("Pattern log: {}", paths.pattern_log.display()));
    success(&format!("Variations: {}", paths.variations.display()));
    if let Some(summary_path) = &paths.summary {
        success(&format!("Summary: {}", summary_path.display()));
    }
}
