//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use geotrack::config::ConfigFileError;
use geotrack::recorder::RecorderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Recorder refused a command
    Recorder(RecorderError),
    /// Failed to read the sample input
    FileRead { path: String, error: std::io::Error },
    /// A sample line could not be parsed
    InvalidSample { line: usize, content: String },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::InvalidSample { .. } = self {
            eprintln!();
            eprintln!("Expected one sample per line:");
            eprintln!("  53.630278, 9.988333   latitude, longitude in degrees");
            eprintln!("  -                     no fix");
            eprintln!("  # comment             ignored, as are blank lines");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start runtime: {}", e),
            CliError::Recorder(e) => write!(f, "Recorder error: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read '{}': {}", path, error)
            }
            CliError::InvalidSample { line, content } => {
                write!(f, "Invalid sample on line {}: '{}'", line, content)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) => Some(e),
            CliError::Recorder(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<RecorderError> for CliError {
    fn from(e: RecorderError) -> Self {
        CliError::Recorder(e)
    }
}
