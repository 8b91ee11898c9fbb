use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::{
    errors::GateError,
    gate::config::{GateConfig, TrackedFiles},
};

pub const DEFAULT_CONFIG_FILE: &str = ".covgate";

// The config file consists of simple key-value pairs, separated by equals
// signs. List values are comma separated and list keys may be repeated:
//
// tracked = src/Minter.sol, src/Auction.sol
// tracked = src/Metadata.sol
// ignore = src/Counter.sol
// source_prefix = src/
// fail_on_missing = false
// command = forge coverage --report summary

/// Parse the config file into key-value pairs, in file order
fn parse_config(config_path: &Path) -> Result<Vec<(String, String)>, GateError> {
    let file = File::open(config_path).map_err(|e| {
        GateError::Config(format!("Failed to open '{}': {}", config_path.display(), e))
    })?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(equals_pos) = trimmed.find('=') else {
            return Err(GateError::Config(format!(
                "{}:{}: expected `key = value`",
                config_path.display(),
                number + 1
            )));
        };
        let key = trimmed[..equals_pos].trim().to_string();
        let value = trimmed[equals_pos + 1..].trim().to_string();

        // Only add non-empty keys
        if !key.is_empty() {
            entries.push((key, value));
        }
    }

    Ok(entries)
}

fn parse_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, GateError> {
    match value {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(GateError::Config(format!(
            "'{}' expects true or false, got '{}'",
            key, value
        ))),
    }
}

fn apply_entries(
    mut config: GateConfig,
    entries: Vec<(String, String)>,
) -> Result<GateConfig, GateError> {
    let mut tracked: Option<Vec<String>> = None;
    let mut ignored: Option<Vec<String>> = None;

    for (key, value) in entries {
        match key.as_str() {
            "tracked" => tracked.get_or_insert_with(Vec::new).extend(parse_list(&value)),
            "ignore" => ignored.get_or_insert_with(Vec::new).extend(parse_list(&value)),
            "source_prefix" => {
                if value.is_empty() {
                    return Err(GateError::Config("'source_prefix' must not be empty".to_string()));
                }
                config.source_prefix = value;
            }
            "fail_on_missing" => config.fail_on_missing = parse_bool(&key, &value)?,
            "command" => {
                let command: Vec<String> = value.split_whitespace().map(str::to_string).collect();
                if command.is_empty() {
                    return Err(GateError::Config("'command' must not be empty".to_string()));
                }
                config.command = command;
            }
            _ => return Err(GateError::Config(format!("Unknown setting '{}'", key))),
        }
    }

    if let Some(tracked) = tracked {
        config.tracked = TrackedFiles::new(tracked);
    }
    if let Some(ignored) = ignored {
        config.ignored = ignored;
    }
    Ok(config)
}

/// Load config from `path`, or from `.covgate` in the current directory.
///
/// Returns the file the settings came from, if any. A missing default file
/// yields the built-in defaults, a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<(GateConfig, Option<PathBuf>), GateError> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                return Ok((GateConfig::default(), None));
            }
            default_path
        }
    };

    let entries = parse_config(&config_path)?;
    let config = apply_entries(GateConfig::default(), entries)?;
    Ok((config, Some(config_path)))
}
