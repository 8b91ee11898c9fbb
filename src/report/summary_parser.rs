use regex::Regex;

use crate::errors::GateError;

use super::{CoverageRecord, CoverageReport};

const DELIMITER: char = '|';
const INNER_DELIMITER: &str = " | ";
const SEPARATOR_MARKER: char = '-';
// leading empty cell, file, lines, statements, branches, functions
const MIN_CELLS: usize = 6;
const PATH_CELL: usize = 1;
const FIRST_METRIC_CELL: usize = 2;

/// Parses the table printed by `forge coverage --report summary`.
///
/// Parsing is lenient: rows that are not data rows are skipped and a metric
/// cell without a `NN.NN%` value counts as `0.0`.
pub struct SummaryParser {
    percentage: Regex,
}

impl SummaryParser {
    pub fn new() -> Result<Self, GateError> {
        Ok(Self {
            percentage: Regex::new(r"(\d+\.\d+)%")?,
        })
    }

    pub fn parse(&self, raw: &str) -> CoverageReport {
        let mut report = CoverageReport::new();
        for line in raw.lines() {
            if let Some((path, record)) = self.parse_row(line) {
                report.insert(path, record);
            }
        }
        report
    }

    fn parse_row<'a>(&self, line: &'a str) -> Option<(&'a str, CoverageRecord)> {
        if !is_data_row(line) {
            return None;
        }
        let cells: Vec<&str> = line.split(DELIMITER).collect();
        if cells.len() < MIN_CELLS {
            return None;
        }
        let path = cells[PATH_CELL].trim();
        if path.is_empty() || path.starts_with(SEPARATOR_MARKER) {
            return None;
        }
        let metric = |offset: usize| self.percentage(cells[FIRST_METRIC_CELL + offset]);
        Some((path, CoverageRecord::new(metric(0), metric(1), metric(2), metric(3))))
    }

    fn percentage(&self, cell: &str) -> f64 {
        self.percentage
            .captures(cell)
            .and_then(|captures| captures.get(1))
            .and_then(|value| value.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

fn is_data_row(line: &str) -> bool {
    line.starts_with(DELIMITER) && line.contains(INNER_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FORGE_SUMMARY: &str = r"
Compiling 42 files with Solc 0.8.26
Solc 0.8.26 finished in 3.21s
Analysing contracts...
Running tests...

Ran 4 test suites in 1.02s (2.88s CPU time): 57 tests passed, 0 failed, 0 skipped (57 total tests)
| File                       | % Lines          | % Statements     | % Branches      | % Funcs         |
|----------------------------|------------------|------------------|-----------------|-----------------|
| src/Auction.sol            | 100.00% (80/80)  | 100.00% (95/95)  | 92.50% (37/40)  | 100.00% (14/14) |
| src/Minter.sol             | 100.00% (22/22)  | 100.00% (25/25)  | 100.00% (6/6)   | 100.00% (5/5)   |
| test/mocks/MockToken.sol   | 0.00% (0/4)      | 0.00% (0/4)      | 100.00% (0/0)   | 0.00% (0/2)     |
| Total                      | 91.45% (102/106) | 95.12% (120/124) | 93.48% (43/46)  | 90.47% (19/21)  |
";

    #[test]
    fn parse_forge_summary() {
        let report = SummaryParser::new().unwrap().parse(FORGE_SUMMARY);

        assert_eq!(
            report.get("src/Auction.sol"),
            Some(&CoverageRecord::new(100.0, 100.0, 92.5, 100.0))
        );
        assert_eq!(
            report.get("src/Minter.sol"),
            Some(&CoverageRecord::new(100.0, 100.0, 100.0, 100.0))
        );
        assert_eq!(
            report.get("test/mocks/MockToken.sol"),
            Some(&CoverageRecord::new(0.0, 0.0, 100.0, 0.0))
        );
        assert!(report.contains("Total"));
    }

    #[test]
    fn skips_separator_and_prose_rows() {
        let report = SummaryParser::new().unwrap().parse(FORGE_SUMMARY);
        assert!(!report.sorted_paths().iter().any(|path| path.starts_with('-')));
        assert!(!report.contains("Running tests..."));
    }

    #[test]
    fn header_row_is_kept_with_zero_metrics() {
        let report = SummaryParser::new().unwrap().parse(FORGE_SUMMARY);
        assert_eq!(report.get("File"), Some(&CoverageRecord::default()));
    }

    #[test]
    fn malformed_cells_default_to_zero() {
        let raw = "| src/Metadata.sol | n/a | 100.00% (3/3) | 100% | |\n";
        let report = SummaryParser::new().unwrap().parse(raw);
        assert_eq!(
            report.get("src/Metadata.sol"),
            Some(&CoverageRecord::new(0.0, 100.0, 0.0, 0.0))
        );
    }

    #[test]
    fn short_rows_are_skipped() {
        let raw = "| src/Minter.sol | 100.00% (1/1) | 100.00% (1/1) |\n";
        let report = SummaryParser::new().unwrap().parse(raw);
        assert!(report.is_empty());
    }

    #[test]
    fn rows_must_start_with_delimiter() {
        let raw = "src/Minter.sol | 100.00% | 100.00% | 100.00% | 100.00% |\n";
        let report = SummaryParser::new().unwrap().parse(raw);
        assert!(report.is_empty());
    }

    #[test]
    fn empty_path_cell_is_skipped() {
        let raw = "|   | 100.00% (1/1) | 100.00% (1/1) | 100.00% (1/1) | 100.00% (1/1) |\n";
        let report = SummaryParser::new().unwrap().parse(raw);
        assert!(report.is_empty());
    }

    #[test]
    fn takes_first_percentage_in_cell() {
        let raw = "| src/Minter.sol | 99.99% (was 100.00%) | 100.00% | 100.00% | 100.00% |\n";
        let report = SummaryParser::new().unwrap().parse(raw);
        assert_eq!(report.get("src/Minter.sol").map(|r| r.lines), Some(99.99));
    }
}
