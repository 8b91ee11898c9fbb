use std::io::{self, Write};

use crate::{errors::GateError, report::summary_parser::SummaryParser, runtime::CoverageRuntime};

use self::{
    config::GateConfig,
    evaluate::{Verdict, evaluate},
    printer::{render_json, render_report},
};

pub mod config;
pub mod evaluate;
pub mod printer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Runs the coverage tool and judges its report. The report goes to the
/// output sink; verbose `INFO:` lines and echoed tool output go to stderr.
pub struct CoverageGate<R: CoverageRuntime> {
    runtime: R,
    config: GateConfig,
    output_mode: OutputMode,
    verbose: bool,
}

impl<R: CoverageRuntime> CoverageGate<R> {
    pub fn new(runtime: R, config: GateConfig, output_mode: OutputMode, verbose: bool) -> Self {
        Self {
            runtime,
            config,
            output_mode,
            verbose,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Renders the verdict for the given tool output without running anything.
    pub fn check(&self, raw: &str) -> Result<(Verdict, String), GateError> {
        let report = SummaryParser::new()?.parse(raw);
        if self.verbose {
            eprintln!("INFO: Parsed {} coverage rows", report.len());
        }
        let evaluation = evaluate(&report, &self.config);
        let rendered = match self.output_mode {
            OutputMode::Human => render_report(&evaluation),
            OutputMode::Json => render_json(&evaluation)?,
        };
        Ok((evaluation.verdict, rendered))
    }

    pub fn run_with<W: Write>(&self, out: &mut W) -> Result<Verdict, GateError> {
        if self.output_mode == OutputMode::Human {
            writeln!(out, "🔍 Checking test coverage for production files...")?;
        }
        let raw = self.runtime.run_coverage(self.verbose)?;
        let (verdict, rendered) = self.check(&raw)?;
        writeln!(out, "{}", rendered)?;
        Ok(verdict)
    }

    pub fn run(&self) -> Result<Verdict, GateError> {
        self.run_with(&mut io::stdout().lock())
    }
}
