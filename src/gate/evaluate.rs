use serde::Serialize;

use crate::report::{CoverageRecord, CoverageReport, FULL_COVERAGE, Metric};

use super::config::GateConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub metric: Metric,
    pub value: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEvaluation {
    pub path: String,
    pub metrics: Vec<MetricResult>,
}

impl FileEvaluation {
    fn new(path: &str, record: &CoverageRecord) -> Self {
        Self {
            path: path.to_string(),
            metrics: record
                .metrics()
                .map(|(metric, value)| MetricResult {
                    metric,
                    value,
                    // the policy is exact, 99.99% fails
                    passed: value == FULL_COVERAGE,
                })
                .collect(),
        }
    }

    pub fn passed(&self) -> bool {
        self.metrics.iter().all(|result| result.passed)
    }

    pub fn failed_metrics(&self) -> Vec<Metric> {
        self.metrics
            .iter()
            .filter(|result| !result.passed)
            .map(|result| result.metric)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub verdict: Verdict,
    /// Number of tracked metrics below 100%.
    pub below_threshold: usize,
    /// Tracked files found in the report, in tracked order.
    pub checked: Vec<FileEvaluation>,
    /// Tracked files absent from the report.
    pub missing: Vec<String>,
    pub fail_on_missing: bool,
    /// Production files in the report that are not tracked, sorted by path.
    /// Informational only.
    pub untracked: Vec<FileEvaluation>,
}

pub fn evaluate(report: &CoverageReport, config: &GateConfig) -> Evaluation {
    let mut checked = Vec::new();
    let mut missing = Vec::new();
    for path in config.tracked.iter() {
        match report.get(path) {
            Some(record) => checked.push(FileEvaluation::new(path, record)),
            None => missing.push(path.to_string()),
        }
    }

    let untracked = report
        .sorted_paths()
        .into_iter()
        .filter(|path| path.starts_with(config.source_prefix.as_str()))
        .filter(|path| !config.tracked.contains(path) && !config.is_ignored(path))
        .filter_map(|path| report.get(path).map(|record| FileEvaluation::new(path, record)))
        .collect();

    let below_threshold: usize = checked
        .iter()
        .map(|file| file.failed_metrics().len())
        .sum();

    let missing_fails = config.fail_on_missing && !missing.is_empty();
    let verdict = if below_threshold == 0 && !missing_fails {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    Evaluation {
        verdict,
        below_threshold,
        checked,
        missing,
        fail_on_missing: config.fail_on_missing,
        untracked,
    }
}
