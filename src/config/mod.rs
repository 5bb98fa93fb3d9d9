//! Linter configuration
//!
//! Resolution pipeline:
//! 1. Load the raw mapping from a file ([`load`]) or build it in code
//! 2. Classify it as canonical or shorthand ([`ConfigShape`])
//! 3. Merge onto the built-in defaults ([`resolve`])
//! 4. Report deprecated/ambiguous fields and structural errors ([`validate`])

mod defaults;
mod error;
mod linter;
pub mod load;
mod merge;
mod options;
mod resolve;
mod shape;
mod validate;
mod value;

pub use defaults::{BuiltinDefaults, DEPRECATED_OPTIONS, RECOGNIZED_OPTIONS};
pub use error::{LoadError, ValidationError, Violation};
pub use linter::{CommandList, LinterCommand, LinterFn, LinterStep, ResolvedCommand};
pub use load::{ConfigFormat, ConfigSource, LoadedConfig};
pub use merge::{deep_merge, merge_layers};
pub use options::{GlobOptions, RenderFn, Renderer};
pub use resolve::{resolve, CanonicalConfig};
pub use shape::ConfigShape;
pub use validate::{validate, Diagnostic, DiagnosticSink, Severity, StderrSink};
pub use value::{raw_config_from_json, RawConfig, RawValue};
