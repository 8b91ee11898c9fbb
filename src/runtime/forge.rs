use std::process::Command;

use crate::{
    errors::GateError,
    runtime::CoverageRuntime,
    utils::process::{EchoFormatter, SilentFormatter, command_line, run_and_capture},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ForgeRuntime {
    program: String,
    args: Vec<String>,
}

impl ForgeRuntime {
    pub fn new(command: &[String]) -> Result<Self, GateError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| GateError::Config("Coverage command must not be empty".to_string()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl CoverageRuntime for ForgeRuntime {
    fn run_coverage(&self, verbose: bool) -> Result<String, GateError> {
        let command = self.command();
        let output = if verbose {
            eprintln!("INFO: Running `{}`", command_line(&command));
            run_and_capture(command, &mut EchoFormatter)?
        } else {
            run_and_capture(command, &mut SilentFormatter)?
        };

        if !output.success() {
            return Err(GateError::ToolExecution(output.error_text()));
        }
        Ok(output.stdout)
    }

    fn name(&self) -> String {
        self.program.clone()
    }
}
