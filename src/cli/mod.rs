//! CLI support for wikiq-lang
//!
//! Provides programmatic access to the `wikiq` commands so that other tools
//! can check queries the same way the binary does.

mod check;
mod convert;
mod docs;

pub use check::{CheckOptions, execute_check};
pub use convert::{query_report, render_text};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use crate::config::ConfigError;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Invalid or unreadable configuration
    Config(ConfigError),
    /// JSON output error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No query given as argument or on stdin
    NoQuery,
    /// A `--print` parameter that is not a printout
    InvalidPrintRequest(String),
    /// Unknown documentation category
    UnknownCategory(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoQuery => {
                write!(f, "No query provided. Pass it as argument or pipe it to stdin.")
            }
            CliError::InvalidPrintRequest(p) => {
                write!(f, "Invalid print request: '{}' (expected e.g. '?Population')", p)
            }
            CliError::UnknownCategory(c) => {
                write!(
                    f,
                    "Unknown category: '{}'\nRun 'wikiq docs' to see available categories.",
                    c
                )
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
