use std::{fmt::Display, string::FromUtf8Error};

#[derive(Debug)]
pub enum GateError {
    IoError(std::io::Error),
    StringFromUtf8(FromUtf8Error),
    Regex(regex::Error),
    Json(serde_json::Error),
    ToolExecution(String),
    Config(String),
    InvalidArgument(String),
}

impl std::error::Error for GateError {}

impl Display for GateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateError::IoError(io_error) => write!(f, "{}", io_error),
            GateError::StringFromUtf8(error) => write!(f, "{}", error),
            GateError::Regex(error) => write!(f, "{}", error),
            GateError::Json(error) => write!(f, "{}", error),
            GateError::ToolExecution(error) => write!(f, "{}", error),
            GateError::Config(error) => write!(f, "Invalid configuration: {}", error),
            GateError::InvalidArgument(error) => write!(f, "{}", error),
        }
    }
}

impl From<std::io::Error> for GateError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<FromUtf8Error> for GateError {
    fn from(value: FromUtf8Error) -> Self {
        Self::StringFromUtf8(value)
    }
}

impl From<regex::Error> for GateError {
    fn from(value: regex::Error) -> Self {
        Self::Regex(value)
    }
}

impl From<serde_json::Error> for GateError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
