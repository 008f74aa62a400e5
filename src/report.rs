//! Report files written during an analysis run

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::analyzer::{HostnameAnalysis, HostnameOutcome};
use crate::error::{Result, SubmutatorError};
use crate::types::{AnalysisSummary, PatternCategory};

const RULE_WIDTH: usize = 50;
const SECTION_WIDTH: usize = 30;

/// Locations of the files produced by one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub pattern_log: PathBuf,
    pub variations: PathBuf,
    pub summary: Option<PathBuf>,
}

/// Streams per-hostname results to the report files
pub struct ReportWriter {
    paths: ReportPaths,
    pattern_log: BufWriter<File>,
    variations: BufWriter<File>,
}

impl ReportWriter {
    /// Create the report files under `output_dir`, stamped with the local time
    pub fn create(output_dir: &Path, json_summary: bool) -> Result<Self> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::create_with_stamp(output_dir, &stamp, json_summary)
    }

    pub fn create_with_stamp(output_dir: &Path, stamp: &str, json_summary: bool) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|e| io_error(e, output_dir))?;

        let paths = ReportPaths {
            pattern_log: output_dir.join(format!("pattern_analysis_{}.txt", stamp)),
            variations: output_dir.join(format!("variations_{}.txt", stamp)),
            summary: json_summary.then(|| output_dir.join(format!("summary_{}.json", stamp))),
        };

        let pattern_log = open(&paths.pattern_log)?;
        let variations = open(&paths.variations)?;

        let mut writer = Self {
            paths,
            pattern_log,
            variations,
        };
        writer.write_header()?;

        tracing::debug!(dir = %output_dir.display(), stamp = %stamp, "Report files created");
        Ok(writer)
    }

    pub fn paths(&self) -> &ReportPaths {
        &self.paths
    }

    fn write_header(&mut self) -> Result<()> {
        let header = format!(
            "Pattern Analysis Report - {}\n{}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(RULE_WIDTH)
        );
        self.log(&header)
    }

    /// Append one hostname's result to the report files
    pub fn write_outcome(&mut self, outcome: &HostnameOutcome) -> Result<()> {
        let mut section = format!(
            "\nAnalyzing: {}\n{}\n",
            outcome.hostname(),
            "-".repeat(SECTION_WIDTH)
        );

        match outcome {
            HostnameOutcome::Skipped { reason, .. } => {
                section.push_str(&format!("Skipped: {}\n", reason));
                self.log(&section)
            }
            HostnameOutcome::Analyzed(analysis) if !analysis.has_patterns() => {
                section.push_str("No patterns found\n");
                self.log(&section)
            }
            HostnameOutcome::Analyzed(analysis) => {
                section.push_str(&describe_patterns(analysis));
                self.log(&section)?;
                self.write_variations(analysis)
            }
        }
    }

    /// Candidates for one hostname go out in a single write
    fn write_variations(&mut self, analysis: &HostnameAnalysis) -> Result<()> {
        let mut block = String::new();
        for candidate in &analysis.expansion.candidates {
            block.push_str(candidate);
            block.push('\n');
        }

        self.variations
            .write_all(block.as_bytes())
            .map_err(|e| io_error(e, &self.paths.variations))
    }

    fn log(&mut self, text: &str) -> Result<()> {
        self.pattern_log
            .write_all(text.as_bytes())
            .map_err(|e| io_error(e, &self.paths.pattern_log))
    }

    /// Write the summary block, flush everything and return the file paths
    pub fn finish(mut self, summary: &AnalysisSummary) -> Result<ReportPaths> {
        let block = summary_block(summary);
        self.log(&block)?;

        self.pattern_log
            .flush()
            .map_err(|e| io_error(e, &self.paths.pattern_log))?;
        self.variations
            .flush()
            .map_err(|e| io_error(e, &self.paths.variations))?;

        if let Some(path) = &self.paths.summary {
            summary.save(path)?;
        }

        Ok(self.paths)
    }
}

fn open(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| io_error(e, path))
}

fn io_error(error: std::io::Error, path: &Path) -> SubmutatorError {
    SubmutatorError::io(error.to_string(), Some(path.to_string_lossy().to_string()))
}

fn describe_patterns(analysis: &HostnameAnalysis) -> String {
    let mut text = String::from("Found patterns:\n");
    for (category, group) in analysis.matches.iter() {
        let found: Vec<&str> = group.iter().map(|m| m.text.as_str()).collect();
        text.push_str(&format!("  {}: {}\n", category, found.join(", ")));
    }

    let expansion = &analysis.expansion;
    if expansion.truncated {
        text.push_str(&format!(
            "Truncated to {} variations (maximum reached)\n",
            expansion.len()
        ));
    } else {
        text.push_str(&format!("Generated {} variations\n", expansion.len()));
    }
    text
}

fn summary_block(summary: &AnalysisSummary) -> String {
    let mut text = format!("\n{}\nAnalysis Summary\n{}\n", "=".repeat(RULE_WIDTH), "=".repeat(RULE_WIDTH));
    text.push_str(&format!("Total subdomains analyzed: {}\n", summary.hostnames_analyzed));
    text.push_str(&format!("Invalid lines skipped: {}\n", summary.hostnames_skipped));
    text.push_str(&format!("Total patterns found: {}\n", summary.total_patterns));
    for category in PatternCategory::ALL {
        let count = summary.patterns_by_category.get(&category).copied().unwrap_or(0);
        text.push_str(&format!("  {}: {}\n", category, count));
    }
    text.push_str(&format!("Total variations generated: {}\n", summary.total_variations));
    text.push_str(&format!(
        "Hostnames truncated at {} variations: {}\n",
        summary.max_variations, summary.hostnames_truncated
    ));
    text.push_str(&format!("Elapsed: {:.2}s\n", summary.elapsed_secs));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_hostname;
    use crate::pattern::PatternRecognizer;
    use crate::variation::VariationGenerator;

    fn analyzed(hostname: &str, max_variations: usize) -> HostnameOutcome {
        HostnameOutcome::Analyzed(analyze_hostname(
            &PatternRecognizer::new(),
            &VariationGenerator::new(max_variations),
            hostname,
        ))
    }

    #[test]
    fn test_file_names_use_stamp() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::create_with_stamp(dir.path(), "20240101_120000", true).unwrap();
        let paths = writer.paths().clone();

        assert_eq!(paths.pattern_log, dir.path().join("pattern_analysis_20240101_120000.txt"));
        assert_eq!(paths.variations, dir.path().join("variations_20240101_120000.txt"));
        assert_eq!(paths.summary, Some(dir.path().join("summary_20240101_120000.json")));
        assert!(paths.pattern_log.exists());
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let writer = ReportWriter::create_with_stamp(&nested, "x", false).unwrap();
        assert!(writer.paths().summary.is_none());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_outcomes_written_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = ReportWriter::create_with_stamp(dir.path(), "t", true).unwrap();

        writer.write_outcome(&analyzed("b1.example.com", 1000)).unwrap();
        writer.write_outcome(&analyzed("www.example.com", 1000)).unwrap();
        writer
            .write_outcome(&HostnameOutcome::Skipped {
                hostname: "bad..host".to_string(),
                reason: "Hostname cannot contain consecutive dots".to_string(),
            })
            .unwrap();
        writer.write_outcome(&analyzed("a1.example.com", 3)).unwrap();

        let mut summary = AnalysisSummary::new(1000);
        summary.hostnames_analyzed = 3;
        summary.finish();
        let paths = writer.finish(&summary).unwrap();

        let variations = fs::read_to_string(&paths.variations).unwrap();
        let lines: Vec<&str> = variations.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "b0.example.com");
        assert_eq!(lines[9], "b9.example.com");
        assert_eq!(lines[10], "a0.example.com");

        let log = fs::read_to_string(&paths.pattern_log).unwrap();
        assert!(log.starts_with("Pattern Analysis Report - "));
        assert!(log.contains("single-digit: 1"));
        assert!(log.contains("No patterns found"));
        assert!(log.contains("Skipped: Hostname cannot contain consecutive dots"));
        assert!(log.contains("Truncated to 3 variations"));
        assert!(log.find("Analyzing: b1").unwrap() < log.find("Analyzing: www").unwrap());
        assert!(log.contains("Analysis Summary"));

        let saved = AnalysisSummary::load(paths.summary.as_deref().unwrap()).unwrap();
        assert_eq!(saved.hostnames_analyzed, 3);
    }
}
