use std::path::PathBuf;

use clap::Parser;

use crate::{
    errors::GateError,
    gate::{
        CoverageGate, OutputMode,
        config::{GateConfig, TrackedFiles},
    },
    runtime::forge::ForgeRuntime,
};

use super::settings::load_config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(
        long,
        value_name = "PATH",
        help = "Config file with tracked files and policy [default: .covgate]"
    )]
    config: Option<PathBuf>,

    #[arg(
        long = "track",
        short,
        value_name = "FILE",
        help = "Production file that must be fully covered, replaces the configured list"
    )]
    track: Vec<String>,

    #[arg(
        long,
        default_value_t = false,
        help = "Fail when a tracked file is missing from the coverage report"
    )]
    fail_on_missing: bool,

    #[arg(long, default_value_t = false, help = "Print the result as JSON")]
    json: bool,

    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[arg(long, default_value_t = false, help = "Disable colored output")]
    no_color: bool,
}

/// Config file (or defaults) with the command line flags applied on top.
fn resolve_config(cli: &Cli) -> Result<GateConfig, GateError> {
    let (mut config, source) = load_config(cli.config.as_deref())?;
    if cli.verbose {
        match source {
            Some(path) => eprintln!("INFO: Using config {}", path.display()),
            None => eprintln!("INFO: No config file found, using defaults"),
        }
    }

    if !cli.track.is_empty() {
        if let Some(empty) = cli.track.iter().find(|file| file.trim().is_empty()) {
            return Err(GateError::InvalidArgument(format!(
                "Invalid tracked file '{}'",
                empty
            )));
        }
        config.tracked = TrackedFiles::new(cli.track.iter().cloned());
    }
    if cli.fail_on_missing {
        config.fail_on_missing = true;
    }
    Ok(config)
}

fn build_gate(cli: Cli) -> Result<CoverageGate<ForgeRuntime>, GateError> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = resolve_config(&cli)?;
    let runtime = ForgeRuntime::new(&config.command)?;
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    Ok(CoverageGate::new(runtime, config, output_mode, cli.verbose))
}

pub fn parse_cli() -> Result<CoverageGate<ForgeRuntime>, GateError> {
    build_gate(Cli::parse())
}
