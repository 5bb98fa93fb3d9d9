//! Configuration validation
//!
//! Structural problems (fields of the wrong shape) are fatal and reported
//! together as one [`ValidationError`]. Deprecated or ambiguous but usable
//! configuration only produces warnings on the sink.

use globset::Glob;

use super::defaults::DEPRECATED_OPTIONS;
use super::error::ValidationError;
use super::resolve::CanonicalConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One line of validation output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Where validation output goes.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in memory.
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Writes diagnostics to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => eprintln!("Warning: {}", diagnostic.message),
            Severity::Error => eprintln!("Error: {}", diagnostic.message),
        }
    }
}

/// Validate a resolved configuration.
///
/// Warnings are written to `sink` as they are found. If any field had the
/// wrong shape, one error listing every violation is written last and
/// returned.
pub fn validate(
    config: &CanonicalConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), ValidationError> {
    for key in config.unknown.keys() {
        sink.emit(Diagnostic::warning(format!(
            "Unknown option \"{}\" was ignored because a \"linters\" field is present. \
             Move glob patterns under \"linters\".",
            key
        )));
    }

    if !config.mixed.is_empty() {
        let keys: Vec<String> = config.mixed.iter().map(|k| format!("\"{}\"", k)).collect();
        sink.emit(Diagnostic::warning(format!(
            "Glob patterns {} are top-level keys next to other options. \
             Move them under \"linters\" to avoid ambiguity.",
            keys.join(", ")
        )));
    }

    for (name, replacement) in DEPRECATED_OPTIONS {
        let present = match *name {
            "gitDir" => config.git_dir.is_some(),
            "verbose" => config.verbose.is_some(),
            _ => false,
        };
        if present {
            sink.emit(Diagnostic::warning(format!(
                "Option \"{}\" is deprecated: {}.",
                name, replacement
            )));
        }
    }

    let patterns = config
        .linters
        .keys()
        .map(|p| ("linters", p))
        .chain(config.ignore.iter().map(|p| ("ignore", p)));
    for (field, pattern) in patterns {
        if let Err(e) = Glob::new(pattern) {
            sink.emit(Diagnostic::warning(format!(
                "Pattern \"{}\" in \"{}\" is not a valid glob and will never match: {}",
                pattern, field, e
            )));
        }
    }

    if !config.has_violations() {
        return Ok(());
    }

    let err = ValidationError {
        violations: config.violations.clone(),
    };
    sink.emit(Diagnostic::error(err.to_string()));
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve::resolve;
    use crate::config::value::raw_config_from_json;
    use serde_json::json;

    fn run(value: serde_json::Value) -> (Result<(), ValidationError>, Vec<Diagnostic>) {
        let config = resolve(raw_config_from_json(value), false);
        let mut sink = Vec::new();
        let result = validate(&config, &mut sink);
        (result, sink)
    }

    #[test]
    fn test_error_is_emitted_last() {
        let (result, sink) = run(json!({"foo": false, "linters": {"*.js": 1}}));
        assert!(result.is_err());
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].severity, Severity::Warning);
        assert!(sink[0].message.contains("\"foo\""));
        assert_eq!(sink[1].severity, Severity::Error);
    }

    #[test]
    fn test_only_one_error_line() {
        let (result, sink) = run(json!({"ignore": false, "linters": {"*.js": 1, "*.css": true}}));
        let err = result.unwrap_err();
        assert_eq!(err.violations.len(), 3);
        let errors = sink.iter().filter(|d| d.severity == Severity::Error).count();
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_invalid_glob_warns() {
        let (result, sink) = run(json!({"linters": {"src/[abc.js": "eslint"}}));
        assert!(result.is_ok());
        assert_eq!(sink.len(), 1);
        assert!(sink[0].message.contains("src/[abc.js"));
    }

    #[test]
    fn test_deprecation_names_replacement() {
        let (_, sink) = run(json!({"verbose": true, "linters": {}}));
        assert_eq!(sink.len(), 1);
        assert!(sink[0].message.contains("\"verbose\""));
        assert!(sink[0].message.contains("--debug"));
    }

    #[test]
    fn test_clean_config_is_silent() {
        let (result, sink) = run(json!({"linters": {"*.js": "eslint"}, "ignore": ["dist/**"]}));
        assert!(result.is_ok());
        assert!(sink.is_empty());
    }
}
