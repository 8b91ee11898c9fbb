use std::process::ExitCode;

use colored::Colorize;
use covgate::{GateError, cli::cli_parser::parse_cli};

fn main() -> ExitCode {
    match parse_cli().and_then(|gate| gate.run()) {
        Ok(verdict) if verdict.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(GateError::ToolExecution(error)) => {
            println!("{}", "❌ Coverage check failed to run".red());
            println!("{}", error);
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("{} {}", "error:".red().bold(), error);
            ExitCode::FAILURE
        }
    }
}
