//! Built-in defaults and the recognized option names

use super::options::{GlobOptions, Renderer};
use super::value::{RawConfig, RawValue};

/// Top-level keys that are options rather than glob patterns.
pub const RECOGNIZED_OPTIONS: &[&str] = &[
    "concurrent",
    "chunkSize",
    "globOptions",
    "linters",
    "ignore",
    "subTaskConcurrency",
    "renderer",
    "relative",
    "gitDir",
    "verbose",
];

/// Deprecated options and what replaced them.
pub const DEPRECATED_OPTIONS: &[(&str, &str)] = &[
    (
        "gitDir",
        "the git directory is now resolved automatically; remove it from your configuration",
    ),
    ("verbose", "use the --debug flag instead"),
];

pub fn is_option_name(key: &str) -> bool {
    RECOGNIZED_OPTIONS.contains(&key)
}

/// Built-in default configuration values
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinDefaults {
    /// Run linters for independent glob groups in parallel (default: true)
    pub concurrent: bool,

    /// Max files per linter invocation (default: unbounded)
    pub chunk_size: usize,

    /// Glob matcher options (default: nocase, matchBase, dot all on)
    pub glob_options: GlobOptions,

    /// Paths excluded from all matching (default: none)
    pub ignore: Vec<String>,

    /// Commands of one glob group run concurrently (default: 1)
    pub subtask_concurrency: usize,

    /// Renderer (default: "update", "verbose" in debug mode)
    pub renderer: Renderer,

    /// Pass relative filenames to linters (default: false)
    pub relative: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self::for_mode(false)
    }
}

impl BuiltinDefaults {
    pub fn for_mode(debug: bool) -> Self {
        Self {
            concurrent: true,
            chunk_size: usize::MAX,
            glob_options: GlobOptions::default(),
            ignore: Vec::new(),
            subtask_concurrency: 1,
            renderer: Renderer::default_for(debug),
            relative: false,
        }
    }

    /// Convert to a raw mapping for merging
    pub fn to_raw(&self) -> RawValue {
        let mut map = RawConfig::new();
        map.insert("concurrent".to_string(), RawValue::Bool(self.concurrent));
        map.insert("chunkSize".to_string(), RawValue::from(self.chunk_size as u64));
        map.insert("globOptions".to_string(), self.glob_options.to_raw());
        map.insert("ignore".to_string(), RawValue::from(self.ignore.clone()));
        map.insert(
            "subTaskConcurrency".to_string(),
            RawValue::from(self.subtask_concurrency as u64),
        );
        map.insert("renderer".to_string(), self.renderer.to_raw());
        map.insert("relative".to_string(), RawValue::Bool(self.relative));
        RawValue::Object(map)
    }
}
