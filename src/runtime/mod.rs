use crate::errors::GateError;

pub mod forge;

/// External tool producing the coverage summary table.
pub trait CoverageRuntime {
    /// Runs the tool to completion and returns its captured stdout.
    ///
    /// A tool that cannot be started or exits non-zero is a
    /// [`GateError::ToolExecution`] carrying the tool's error output.
    fn run_coverage(&self, verbose: bool) -> Result<String, GateError>;
    fn name(&self) -> String;
}
