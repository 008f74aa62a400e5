//! Submutator - subdomain pattern analysis and permutation
//!
//! Recognizes structural patterns in known subdomains (digit runs, environment
//! words, cloud region codes) and expands each hostname into a capped set of
//! plausible sibling hostnames for later resolution.

pub mod analyzer;
pub mod console;
pub mod error;
pub mod hostname;
pub mod logging;
pub mod pattern;
pub mod report;
pub mod types;
pub mod variation;

use std::collections::BTreeSet;

// Re-export commonly used types
pub use error::{Result, SubmutatorError};
pub use types::{AnalysisConfig, AnalysisSummary, PatternCategory, DEFAULT_MAX_VARIATIONS};

// Re-export main functionality
pub use analyzer::{HostnameAnalysis, HostnameOutcome, SubdomainAnalyzer};
pub use pattern::{PatternMatch, PatternMatches, PatternRecognizer};
pub use report::{ReportPaths, ReportWriter};
pub use variation::{Expansion, VariationGenerator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}

/// Find the patterns present in `hostname`
pub fn recognize(hostname: &str) -> PatternMatches {
    PatternRecognizer::new().recognize(hostname)
}

/// Candidate hostnames for `hostname`, keeping at most `ceiling` of them
pub fn expand(hostname: &str, matches: &PatternMatches, ceiling: usize) -> BTreeSet<String> {
    VariationGenerator::new(ceiling)
        .expand(hostname, matches)
        .candidates
}
