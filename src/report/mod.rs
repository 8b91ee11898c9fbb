use std::{collections::HashMap, fmt::Display};

use itertools::Itertools;
use serde::Serialize;

pub mod summary_parser;

pub const FULL_COVERAGE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Lines,
    Statements,
    Branches,
    Functions,
}

impl Metric {
    /// Column order of the forge summary table.
    pub const ALL: [Metric; 4] = [
        Metric::Lines,
        Metric::Statements,
        Metric::Branches,
        Metric::Functions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Lines => "Lines",
            Metric::Statements => "Statements",
            Metric::Branches => "Branches",
            Metric::Functions => "Functions",
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Coverage percentages of a single source file, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoverageRecord {
    pub lines: f64,
    pub statements: f64,
    pub branches: f64,
    pub functions: f64,
}

impl CoverageRecord {
    pub fn new(lines: f64, statements: f64, branches: f64, functions: f64) -> Self {
        Self {
            lines,
            statements,
            branches,
            functions,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Lines => self.lines,
            Metric::Statements => self.statements,
            Metric::Branches => self.branches,
            Metric::Functions => self.functions,
        }
    }

    pub fn metrics(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(|metric| (metric, self.get(metric)))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
    files: HashMap<String, CoverageRecord>,
}

impl CoverageReport {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    /// A later row for the same path replaces the earlier one.
    pub fn insert(&mut self, path: &str, record: CoverageRecord) {
        self.files.insert(path.to_string(), record);
    }

    pub fn get(&self, path: &str) -> Option<&CoverageRecord> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn sorted_paths(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).sorted().collect()
    }
}
