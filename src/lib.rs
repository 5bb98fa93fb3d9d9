//! staged-lint - linter configuration for staged files
//!
//! This crate resolves and validates the configuration that maps glob
//! patterns to linter commands, and re-exports the shell argument escaping
//! used when those commands are built.

pub mod config;

pub use config::{
    resolve, validate, CanonicalConfig, Diagnostic, DiagnosticSink, LinterCommand, LinterFn,
    RawConfig, RawValue, Renderer, ValidationError,
};
pub use staged_escape as escape;
