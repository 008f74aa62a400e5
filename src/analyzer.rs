//! Subdomain analyzer - runs recognition and expansion over an input list

use std::future::Future;
use std::path::Path;
use std::pin::pin;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, Stream, StreamExt};
use tokio::sync::Semaphore;

use crate::error::{Result, SubmutatorError};
use crate::hostname::{utils, HostnameValidator};
use crate::pattern::{PatternMatches, PatternRecognizer};
use crate::report::{ReportPaths, ReportWriter};
use crate::types::{AnalysisConfig, AnalysisSummary};
use crate::variation::{Expansion, VariationGenerator};

/// Finished results that may wait behind a slow hostname, per worker
const READ_AHEAD: usize = 4;

/// Recognition and expansion result for one hostname
#[derive(Debug, Clone)]
pub struct HostnameAnalysis {
    pub hostname: String,
    pub matches: PatternMatches,
    pub expansion: Expansion,
}

impl HostnameAnalysis {
    pub fn has_patterns(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// What happened to one input line
#[derive(Debug, Clone)]
pub enum HostnameOutcome {
    Analyzed(HostnameAnalysis),
    Skipped { hostname: String, reason: String },
}

impl HostnameOutcome {
    pub fn hostname(&self) -> &str {
        match self {
            HostnameOutcome::Analyzed(analysis) => &analysis.hostname,
            HostnameOutcome::Skipped { hostname, .. } => hostname,
        }
    }
}

/// Progress of a running analysis
#[derive(Debug, Clone, Copy)]
pub struct AnalysisProgress {
    pub current: u64,
    pub total: u64,
}

/// Final result of [`SubdomainAnalyzer::run`]
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub paths: ReportPaths,
}

/// Everything a worker needs to process one hostname, cheap to clone
#[derive(Debug, Clone)]
struct Pipeline {
    recognizer: PatternRecognizer,
    generator: VariationGenerator,
    validator: Option<HostnameValidator>,
}

impl Pipeline {
    fn process(&self, line: &str) -> HostnameOutcome {
        let hostname = match &self.validator {
            Some(validator) => match validator.validate(line) {
                Ok(hostname) => hostname,
                Err(e) => {
                    tracing::warn!(hostname = %line, error = %e, "Skipping invalid hostname");
                    return HostnameOutcome::Skipped {
                        hostname: line.to_string(),
                        reason: e.to_string(),
                    };
                }
            },
            None => line.to_string(),
        };

        HostnameOutcome::Analyzed(analyze_hostname(&self.recognizer, &self.generator, &hostname))
    }
}

/// Recognize and expand a single hostname
pub fn analyze_hostname(
    recognizer: &PatternRecognizer,
    generator: &VariationGenerator,
    hostname: &str,
) -> HostnameAnalysis {
    let matches = recognizer.recognize(hostname);
    let expansion = generator.expand(hostname, &matches);

    tracing::debug!(
        hostname = %hostname,
        patterns = matches.total_matches(),
        variations = expansion.len(),
        truncated = expansion.truncated,
        "Hostname analyzed"
    );

    HostnameAnalysis {
        hostname: hostname.to_string(),
        matches,
        expansion,
    }
}

/// Analyzer for lists of subdomains
pub struct SubdomainAnalyzer {
    config: AnalysisConfig,
    pipeline: Pipeline,
}

impl SubdomainAnalyzer {
    /// Create a new analyzer
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let pipeline = Pipeline {
            recognizer: PatternRecognizer::new(),
            generator: VariationGenerator::new(config.max_variations),
            validator: config.validate_input.then(HostnameValidator::new),
        };

        Ok(Self { config, pipeline })
    }

    /// Get analyzer configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Process one input line synchronously
    pub fn analyze(&self, line: &str) -> HostnameOutcome {
        self.pipeline.process(line)
    }

    /// Run one line on a blocking worker once a permit is free
    fn spawn_worker(
        &self,
        semaphore: &Arc<Semaphore>,
        line: String,
    ) -> impl Future<Output = Result<HostnameOutcome>> {
        let pipeline = self.pipeline.clone();
        let semaphore = Arc::clone(semaphore);

        async move {
            let permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| crate::internal_error!("Worker pool closed: {}", e))?;

            let outcome = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                pipeline.process(&line)
            })
            .await?;

            Ok::<_, SubmutatorError>(outcome)
        }
    }

    /// Outcomes for `lines` in input order.
    ///
    /// At most `concurrency` hostnames are processed at once. Workers keep
    /// going while an earlier, slower hostname is still running.
    pub fn analyze_stream<'a>(
        &'a self,
        lines: &'a [String],
    ) -> impl Stream<Item = Result<HostnameOutcome>> + 'a {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let window = self.config.concurrency.saturating_mul(READ_AHEAD);

        stream::iter(lines.iter().cloned())
            .map(move |line| self.spawn_worker(&semaphore, line))
            .buffered(window)
    }

    /// Process a batch of lines, keeping input order
    pub async fn analyze_batch(&self, lines: &[String]) -> Result<Vec<HostnameOutcome>> {
        self.analyze_stream(lines)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect()
    }

    /// Read the hostname list at `path`
    pub async fn read_hostnames(path: &Path) -> Result<Vec<String>> {
        let path_str = path.to_string_lossy().to_string();
        if !path.exists() {
            return Err(SubmutatorError::io("Input file not found", Some(path_str)));
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SubmutatorError::io(e.to_string(), Some(path_str)))?;

        Ok(utils::parse_hostname_list(&content))
    }

    /// Analyze every hostname in `input` and write the reports
    pub async fn run<F>(&self, input: &Path, on_progress: F) -> Result<AnalysisReport>
    where
        F: Fn(&AnalysisProgress) + Send + Sync,
    {
        let started = Instant::now();
        let lines = Self::read_hostnames(input).await?;
        let total = lines.len() as u64;

        let mut writer = ReportWriter::create(&self.config.output_dir, self.config.json_summary)?;
        let mut summary = AnalysisSummary::new(self.config.max_variations);
        let mut current = 0u64;

        on_progress(&AnalysisProgress { current, total });

        let mut outcomes = pin!(self.analyze_stream(&lines));
        while let Some(outcome) = outcomes.next().await {
            let outcome = outcome?;
            record(&mut summary, &outcome);
            writer.write_outcome(&outcome)?;

            current += 1;
            on_progress(&AnalysisProgress { current, total });
        }

        summary.finish();
        let paths = writer.finish(&summary)?;

        tracing::info!(
            hostnames = summary.hostnames_analyzed,
            skipped = summary.hostnames_skipped,
            patterns = summary.total_patterns,
            variations = summary.total_variations,
            duration_ms = %started.elapsed().as_millis(),
            "Analysis completed"
        );

        Ok(AnalysisReport { summary, paths })
    }
}

/// Fold one outcome into the run totals
fn record(summary: &mut AnalysisSummary, outcome: &HostnameOutcome) {
    match outcome {
        HostnameOutcome::Analyzed(analysis) => {
            summary.hostnames_analyzed += 1;
            if !analysis.has_patterns() {
                return;
            }

            summary.total_patterns += analysis.matches.total_matches() as u64;
            for (category, group) in analysis.matches.iter() {
                *summary.patterns_by_category.entry(category).or_default() += group.len() as u64;
            }
            summary.total_variations += analysis.expansion.len() as u64;
            if analysis.expansion.truncated {
                summary.hostnames_truncated += 1;
            }
        }
        HostnameOutcome::Skipped { .. } => {
            summary.hostnames_skipped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PatternCategory;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn config(dir: &Path) -> AnalysisConfig {
        AnalysisConfig {
            output_dir: dir.join("out"),
            concurrency: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            max_variations: 0,
            ..Default::default()
        };
        assert!(SubdomainAnalyzer::new(config).is_err());
    }

    #[test]
    fn test_analyze_skips_invalid_line() {
        let analyzer = SubdomainAnalyzer::new(AnalysisConfig::default()).unwrap();

        match analyzer.analyze("bad..host") {
            HostnameOutcome::Skipped { hostname, .. } => assert_eq!(hostname, "bad..host"),
            other => panic!("expected skip, got {:?}", other),
        }

        match analyzer.analyze("web1.example.com.") {
            HostnameOutcome::Analyzed(analysis) => {
                assert_eq!(analysis.hostname, "web1.example.com");
                assert_eq!(analysis.expansion.len(), 10);
            }
            other => panic!("expected analysis, got {:?}", other),
        }
    }

    #[test]
    fn test_analyze_without_validation() {
        let config = AnalysisConfig {
            validate_input: false,
            ..Default::default()
        };
        let analyzer = SubdomainAnalyzer::new(config).unwrap();
        assert!(matches!(analyzer.analyze("*.web1.example.com"), HostnameOutcome::Analyzed(_)));
    }

    #[tokio::test]
    async fn test_batch_keeps_order() {
        let analyzer = SubdomainAnalyzer::new(AnalysisConfig::default()).unwrap();
        let lines: Vec<String> = (0..20).map(|i| format!("host{}.example.com", i)).collect();

        let outcomes = analyzer.analyze_batch(&lines).await.unwrap();
        let hosts: Vec<&str> = outcomes.iter().map(|o| o.hostname()).collect();
        assert_eq!(hosts, lines.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_stream_order_beyond_concurrency() {
        let config = AnalysisConfig {
            concurrency: 2,
            max_variations: 100_000,
            ..Default::default()
        };
        let analyzer = SubdomainAnalyzer::new(config).unwrap();

        // heavy hostnames interleaved with trivial ones
        let lines: Vec<String> = (0..30)
            .map(|i| {
                if i % 5 == 0 {
                    format!("a1.b22.c33.n{}.example.com", i)
                } else {
                    format!("www{}.example.com", i)
                }
            })
            .collect();

        let outcomes: Vec<HostnameOutcome> = analyzer
            .analyze_stream(&lines)
            .map(|o| o.unwrap())
            .collect()
            .await;

        assert_eq!(outcomes.len(), lines.len());
        for (outcome, line) in outcomes.iter().zip(&lines) {
            assert_eq!(outcome.hostname(), line);
        }
        match &outcomes[0] {
            HostnameOutcome::Analyzed(analysis) => assert!(analysis.expansion.len() > 1000),
            other => panic!("expected analysis, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let err = SubdomainAnalyzer::read_hostnames(Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmutatorError::Io { .. }));
    }

    #[tokio::test]
    async fn test_run_writes_reports() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("subs.txt");
        std::fs::write(
            &input,
            "# targets\nserver5.example.com\nwww.example.com\n\nbad..host\nprod.example.com\n",
        )
        .unwrap();

        let analyzer = SubdomainAnalyzer::new(config(dir.path())).unwrap();
        let calls = AtomicU64::new(0);
        let report = analyzer
            .run(&input, |p| {
                assert!(p.current <= p.total);
                calls.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .unwrap();

        assert!(calls.load(Ordering::SeqCst) >= 2);

        let summary = &report.summary;
        assert_eq!(summary.hostnames_analyzed, 3);
        assert_eq!(summary.hostnames_skipped, 1);
        assert_eq!(summary.total_patterns, 2);
        assert_eq!(summary.total_variations, 10 + 12);
        assert_eq!(summary.patterns_by_category.get(&PatternCategory::SingleDigit), Some(&1));

        let variations = std::fs::read_to_string(&report.paths.variations).unwrap();
        let lines: Vec<&str> = variations.lines().collect();
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[0], "server0.example.com");
        assert!(!lines.contains(&"www.example.com"));

        let log = std::fs::read_to_string(&report.paths.pattern_log).unwrap();
        assert!(log.contains("Analyzing: www.example.com"));
        assert!(log.contains("No patterns found"));
        assert!(log.contains("single-digit: 5"));
        assert!(log.contains("Total subdomains analyzed: 3"));
    }
}
