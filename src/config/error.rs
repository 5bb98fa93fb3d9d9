//! Configuration errors

use std::fmt;
use std::io;
use std::path::PathBuf;

use super::value::RawValue;

/// A field whose raw value had the wrong shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Dotted path of the field, e.g. `ignore` or `linters.*.js`
    pub path: String,

    /// What the field must hold
    pub expected: &'static str,

    /// The offending value
    pub received: RawValue,
}

impl Violation {
    pub fn new(path: impl Into<String>, expected: &'static str, received: RawValue) -> Self {
        Self {
            path: path.into(),
            expected,
            received,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Option \"{}\" must be {}, but received {}",
            self.path,
            self.expected,
            self.received.describe()
        )
    }
}

fn summarize(violations: &[Violation]) -> String {
    let listed: String = violations
        .iter()
        .map(|v| format!("\n  - {}", v))
        .collect();
    format!("Invalid configuration ({} error(s)):{}", violations.len(), listed)
}

/// Every structural violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

/// Errors while reading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Configuration in {path} must be an object, found {found}")]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("{path} has no \"{key}\" entry")]
    MissingPackageKey { path: PathBuf, key: &'static str },
}
