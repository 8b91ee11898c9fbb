use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

use crate::errors::GateError;

use super::evaluate::{Evaluation, FileEvaluation};

const RULE: &str = "====================";
const STATUS_PASS: &str = "✓ PASS";
const STATUS_FAIL: &str = "✗ FAIL";
const STATUS_NOT_TRACKED: &str = "- NOT TRACKED";

#[derive(Tabled)]
struct SourceRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Lines")]
    lines: String,
    #[tabled(rename = "Statements")]
    statements: String,
    #[tabled(rename = "Branches")]
    branches: String,
    #[tabled(rename = "Functions")]
    functions: String,
    #[tabled(rename = "Status")]
    status: String, // Plain text, colorized after rendering
}

impl SourceRow {
    fn new(file: &FileEvaluation, status: &str) -> Self {
        let value = |index: usize| {
            file.metrics
                .get(index)
                .map(|result| format!("{:.2}%", result.value))
                .unwrap_or_default()
        };
        Self {
            file: file.path.clone(),
            lines: value(0),
            statements: value(1),
            branches: value(2),
            functions: value(3),
            status: status.to_string(),
        }
    }
}

fn colorize_table_output(table_str: &str) -> String {
    table_str
        .lines()
        .map(|line| {
            if line.contains(STATUS_PASS) {
                line.replace(STATUS_PASS, &STATUS_PASS.green().to_string())
            } else if line.contains(STATUS_FAIL) {
                line.replace(STATUS_FAIL, &STATUS_FAIL.red().to_string())
            } else if line.contains(STATUS_NOT_TRACKED) {
                line.replace(STATUS_NOT_TRACKED, &STATUS_NOT_TRACKED.yellow().to_string())
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_file(output: &mut String, file: &FileEvaluation) {
    output.push_str(&format!("\n📄 {}:\n", file.path));
    for result in &file.metrics {
        let value = format!("{:.2}%", result.value);
        if result.passed {
            output.push_str(&format!("  ✅ {}: {}\n", result.metric, value.green()));
        } else {
            output.push_str(&format!(
                "  ❌ {}: {} (must be 100%)\n",
                result.metric,
                value.red()
            ));
        }
    }
}

fn render_sources(output: &mut String, evaluation: &Evaluation) {
    let mut rows: Vec<SourceRow> = evaluation
        .checked
        .iter()
        .map(|file| {
            let status = if file.passed() { STATUS_PASS } else { STATUS_FAIL };
            SourceRow::new(file, status)
        })
        .chain(
            evaluation
                .untracked
                .iter()
                .map(|file| SourceRow::new(file, STATUS_NOT_TRACKED)),
        )
        .collect();
    rows.sort_by(|a, b| a.file.cmp(&b.file));

    output.push_str("\n📋 All source files:\n");
    if rows.is_empty() {
        output.push_str(&format!("  {}\n", "No source files found in coverage report".yellow()));
    } else {
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        output.push_str(&colorize_table_output(&table.to_string()));
        output.push('\n');
    }

    for path in &evaluation.missing {
        output.push_str(&format!(
            "  ⚠️  {}\n",
            format!("{} (not found in coverage report)", path).yellow()
        ));
    }
}

fn render_summary(output: &mut String, evaluation: &Evaluation) {
    if evaluation.verdict.passed() {
        output.push_str(&format!(
            "{}\n",
            "✅ All production files have 100% test coverage!".green()
        ));
        return;
    }
    output.push_str(&format!("{}\n", "❌ Coverage check failed!".red()));
    if evaluation.below_threshold > 0 {
        output.push_str(&format!(
            "   {} metric(s) below 100% in tracked files.\n",
            evaluation.below_threshold
        ));
    }
    if evaluation.fail_on_missing && !evaluation.missing.is_empty() {
        output.push_str(&format!(
            "   {} tracked file(s) missing from the coverage report.\n",
            evaluation.missing.len()
        ));
    }
    output.push_str(&format!(
        "{}\n",
        "All production files must have 100% test coverage.".yellow()
    ));
}

/// Human readable report: per-file metric breakdown, source listing and the
/// final verdict.
pub fn render_report(evaluation: &Evaluation) -> String {
    let mut output = String::new();
    output.push_str("\n📊 Coverage Report:\n");
    output.push_str(RULE);
    output.push('\n');

    if evaluation.checked.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            "No tracked files found in coverage report.".yellow()
        ));
    }
    for file in &evaluation.checked {
        render_file(&mut output, file);
    }

    output.push_str(&format!("\n{}\n", RULE));
    render_sources(&mut output, evaluation);
    output.push_str(&format!("\n{}\n", RULE));
    render_summary(&mut output, evaluation);
    output
}

pub fn render_json(evaluation: &Evaluation) -> Result<String, GateError> {
    Ok(serde_json::to_string_pretty(evaluation)?)
}
