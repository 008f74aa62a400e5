//! Core types and structures for submutator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, SubmutatorError};

/// Default ceiling on candidates kept per input hostname
pub const DEFAULT_MAX_VARIATIONS: usize = 1000;

/// Default directory for pattern logs and variation files
pub const DEFAULT_OUTPUT_DIR: &str = "pattern_analysis_results";

/// Pattern category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternCategory {
    SingleDigit,
    DoubleDigit,
    EnvironmentWord,
    CloudRegion,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 4] = [
        PatternCategory::SingleDigit,
        PatternCategory::DoubleDigit,
        PatternCategory::EnvironmentWord,
        PatternCategory::CloudRegion,
    ];
}

impl std::fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternCategory::SingleDigit => write!(f, "single-digit"),
            PatternCategory::DoubleDigit => write!(f, "double-digit"),
            PatternCategory::EnvironmentWord => write!(f, "environment-word"),
            PatternCategory::CloudRegion => write!(f, "cloud-region"),
        }
    }
}

/// Configuration for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum candidates kept per hostname
    pub max_variations: usize,
    /// Directory receiving the pattern log and variations file
    pub output_dir: PathBuf,
    /// Hostnames analyzed in parallel
    pub concurrency: usize,
    /// Skip input lines that are not well-formed hostnames
    pub validate_input: bool,
    /// Also write a JSON summary next to the text reports
    pub json_summary: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_variations: DEFAULT_MAX_VARIATIONS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            concurrency: default_concurrency(),
            validate_input: true,
            json_summary: false,
        }
    }
}

impl AnalysisConfig {
    /// Reject settings the analyzer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_variations == 0 {
            return Err(crate::config_error!("max variations must be at least 1"));
        }
        if self.concurrency == 0 {
            return Err(crate::config_error!("concurrency must be at least 1"));
        }
        Ok(())
    }
}

/// Number of CPUs available to this process, at least 1
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Totals for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Hostnames that went through recognition
    pub hostnames_analyzed: u64,
    /// Input lines rejected by validation
    pub hostnames_skipped: u64,
    /// Hostnames whose candidate set hit the ceiling
    pub hostnames_truncated: u64,
    pub total_patterns: u64,
    /// Match counts per category
    #[serde(default)]
    pub patterns_by_category: BTreeMap<PatternCategory, u64>,
    pub total_variations: u64,
    pub max_variations: usize,
    pub elapsed_secs: f64,
}

impl AnalysisSummary {
    pub fn new(max_variations: usize) -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            hostnames_analyzed: 0,
            hostnames_skipped: 0,
            hostnames_truncated: 0,
            total_patterns: 0,
            patterns_by_category: BTreeMap::new(),
            total_variations: 0,
            max_variations,
            elapsed_secs: 0.0,
        }
    }

    /// Stamp the finish time and elapsed duration
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
        let elapsed = self.finished_at - self.started_at;
        self.elapsed_secs = elapsed.num_milliseconds().max(0) as f64 / 1000.0;
    }

    /// Load a summary from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SubmutatorError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;

        serde_json::from_str(&content).map_err(|e| SubmutatorError::parse(e.to_string(), Some(content)))
    }

    /// Save the summary as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SubmutatorError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            SubmutatorError::internal(format!("Failed to serialize summary: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            SubmutatorError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })
    }
}
