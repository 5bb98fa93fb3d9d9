//! Configuration resolution
//!
//! Turns a raw configuration (either style, or none at all) into the one
//! canonical record the executor consumes. Resolution never fails: values
//! of the wrong shape are recorded as violations for the validator and the
//! field keeps its default.

use indexmap::IndexMap;
use tracing::debug;

use super::defaults::BuiltinDefaults;
use super::error::Violation;
use super::linter::LinterCommand;
use super::merge::merge_layers;
use super::options::{GlobOptions, Renderer};
use super::shape::ConfigShape;
use super::value::{RawConfig, RawValue};

const EXPECT_BOOL: &str = "a boolean";
const EXPECT_POSITIVE_INT: &str = "a positive integer";
const EXPECT_STRING: &str = "a string";
const EXPECT_GLOB_LIST: &str = "an array of glob pattern strings";
const EXPECT_OBJECT: &str = "an object";
const EXPECT_LINTERS: &str = "an object mapping glob patterns to commands";
const EXPECT_COMMAND: &str =
    "a command string, an array of command strings and functions, or a function";
const EXPECT_RENDERER: &str = "a renderer name or a renderer function";

/// Fully defaulted, merged configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalConfig {
    pub concurrent: bool,
    pub chunk_size: usize,
    pub glob_options: GlobOptions,
    /// Glob pattern to command, in the order written
    pub linters: IndexMap<String, LinterCommand>,
    pub ignore: Vec<String>,
    pub subtask_concurrency: usize,
    pub renderer: Renderer,
    pub relative: bool,

    /// Deprecated, kept only so the validator can flag it
    pub git_dir: Option<String>,
    /// Deprecated, kept only so the validator can flag it
    pub verbose: Option<bool>,

    /// Non-option top-level keys ignored because `linters` was explicit
    pub unknown: RawConfig,
    /// Shorthand glob keys that were written next to option keys
    pub mixed: Vec<String>,
    /// Fields whose raw value had the wrong shape
    pub violations: Vec<Violation>,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        resolve(None, false)
    }
}

/// Resolve a raw configuration into its canonical form.
///
/// `None` behaves exactly like an empty mapping. `debug` selects the
/// default renderer.
pub fn resolve(raw: Option<RawConfig>, debug: bool) -> CanonicalConfig {
    let shape = ConfigShape::classify(raw.unwrap_or_default());
    debug!(shape = shape.name(), "classified raw configuration");

    let (mut options, linters, unknown, mixed) = match shape {
        ConfigShape::Canonical { mut options, stray } => {
            let linters = options.shift_remove("linters");
            (options, linters, stray, Vec::new())
        }
        ConfigShape::Shorthand { linters, options } => {
            let mixed = if options.is_empty() {
                Vec::new()
            } else {
                linters.keys().cloned().collect()
            };
            (options, Some(RawValue::Object(linters)), RawConfig::new(), mixed)
        }
    };

    let git_dir = options.shift_remove("gitDir");
    let verbose = options.shift_remove("verbose");

    let defaults = BuiltinDefaults::for_mode(debug);
    let merged = merge_layers(vec![defaults.to_raw(), RawValue::Object(options)]);
    let merged = match merged.into_object() {
        Ok(map) => map,
        Err(_) => RawConfig::new(),
    };

    let mut decoder = Decoder::default();
    let ignore = decoder.glob_list(&merged, "ignore", &defaults.ignore);
    let linters = decoder.linters(linters);
    let concurrent = decoder.bool(&merged, "concurrent", defaults.concurrent);
    let chunk_size = decoder.positive(&merged, "chunkSize", defaults.chunk_size);
    let glob_options = decoder.glob_options(&merged, &defaults.glob_options);
    let subtask_concurrency =
        decoder.positive(&merged, "subTaskConcurrency", defaults.subtask_concurrency);
    let renderer = decoder.renderer(&merged, &defaults.renderer);
    let relative = decoder.bool(&merged, "relative", defaults.relative);
    let git_dir = decoder.deprecated_string("gitDir", git_dir);
    let verbose = decoder.deprecated_bool("verbose", verbose);

    if !decoder.violations.is_empty() {
        debug!(count = decoder.violations.len(), "recorded shape violations");
    }

    CanonicalConfig {
        concurrent,
        chunk_size,
        glob_options,
        linters,
        ignore,
        subtask_concurrency,
        renderer,
        relative,
        git_dir,
        verbose,
        unknown,
        mixed,
        violations: decoder.violations,
    }
}

/// Typed field extraction that records violations instead of failing.
#[derive(Default)]
struct Decoder {
    violations: Vec<Violation>,
}

impl Decoder {
    fn reject(&mut self, path: impl Into<String>, expected: &'static str, value: &RawValue) {
        self.violations
            .push(Violation::new(path, expected, value.clone()));
    }

    fn bool(&mut self, map: &RawConfig, key: &str, default: bool) -> bool {
        match map.get(key) {
            None => default,
            Some(RawValue::Bool(b)) => *b,
            Some(other) => {
                self.reject(key, EXPECT_BOOL, other);
                default
            }
        }
    }

    fn positive(&mut self, map: &RawConfig, key: &str, default: usize) -> usize {
        match map.get(key) {
            None => default,
            Some(value @ RawValue::Number(n)) => {
                match n.as_u64().and_then(|n| usize::try_from(n).ok()) {
                    Some(n) if n > 0 => n,
                    _ => {
                        self.reject(key, EXPECT_POSITIVE_INT, value);
                        default
                    }
                }
            }
            Some(other) => {
                self.reject(key, EXPECT_POSITIVE_INT, other);
                default
            }
        }
    }

    fn glob_list(&mut self, map: &RawConfig, key: &str, default: &[String]) -> Vec<String> {
        let Some(value) = map.get(key) else {
            return default.to_vec();
        };
        let patterns = match value {
            RawValue::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect::<Option<Vec<_>>>(),
            _ => None,
        };
        patterns.unwrap_or_else(|| {
            self.reject(key, EXPECT_GLOB_LIST, value);
            default.to_vec()
        })
    }

    fn linters(&mut self, value: Option<RawValue>) -> IndexMap<String, LinterCommand> {
        let mut linters = IndexMap::new();
        let entries = match value {
            None => return linters,
            Some(RawValue::Object(entries)) => entries,
            Some(other) => {
                self.reject("linters", EXPECT_LINTERS, &other);
                return linters;
            }
        };

        for (pattern, raw) in entries {
            match LinterCommand::from_raw(&raw) {
                Some(command) => {
                    linters.insert(pattern, command);
                }
                None => self.reject(format!("linters.{}", pattern), EXPECT_COMMAND, &raw),
            }
        }
        linters
    }

    fn glob_options(&mut self, map: &RawConfig, default: &GlobOptions) -> GlobOptions {
        let entries = match map.get("globOptions") {
            None => return default.clone(),
            Some(RawValue::Object(entries)) => entries,
            Some(other) => {
                self.reject("globOptions", EXPECT_OBJECT, other);
                return default.clone();
            }
        };

        let mut options = default.clone();
        options.extra.clear();
        for (key, value) in entries {
            let Some(slot) = options.flag_mut(key) else {
                options.extra.insert(key.clone(), value.clone());
                continue;
            };
            match value.as_bool() {
                Some(b) => *slot = b,
                None => self.reject(format!("globOptions.{}", key), EXPECT_BOOL, value),
            }
        }
        options
    }

    fn renderer(&mut self, map: &RawConfig, default: &Renderer) -> Renderer {
        let Some(value) = map.get("renderer") else {
            return default.clone();
        };
        Renderer::from_raw(value).unwrap_or_else(|| {
            self.reject("renderer", EXPECT_RENDERER, value);
            default.clone()
        })
    }

    fn deprecated_string(&mut self, key: &str, value: Option<RawValue>) -> Option<String> {
        match value? {
            RawValue::String(s) => Some(s),
            other => {
                self.reject(key, EXPECT_STRING, &other);
                None
            }
        }
    }

    fn deprecated_bool(&mut self, key: &str, value: Option<RawValue>) -> Option<bool> {
        match value? {
            RawValue::Bool(b) => Some(b),
            other => {
                self.reject(key, EXPECT_BOOL, &other);
                None
            }
        }
    }
}

impl CanonicalConfig {
    /// The canonical fields as a raw mapping.
    ///
    /// Diagnostics-only data (`unknown`, `mixed`, `violations`) is not part
    /// of the output, so resolving the result again yields the same config.
    pub fn to_raw(&self) -> RawConfig {
        let mut map = RawConfig::new();
        map.insert("concurrent".to_string(), RawValue::Bool(self.concurrent));
        // Unbounded is the default; usize::MAX is not exact in a JS number.
        if self.chunk_size != usize::MAX {
            map.insert("chunkSize".to_string(), RawValue::from(self.chunk_size as u64));
        }
        map.insert("globOptions".to_string(), self.glob_options.to_raw());
        map.insert(
            "linters".to_string(),
            RawValue::Object(
                self.linters
                    .iter()
                    .map(|(pattern, command)| (pattern.clone(), command.to_raw()))
                    .collect(),
            ),
        );
        map.insert("ignore".to_string(), RawValue::from(self.ignore.clone()));
        map.insert(
            "subTaskConcurrency".to_string(),
            RawValue::from(self.subtask_concurrency as u64),
        );
        map.insert("renderer".to_string(), self.renderer.to_raw());
        map.insert("relative".to_string(), RawValue::Bool(self.relative));
        if let Some(git_dir) = &self.git_dir {
            map.insert("gitDir".to_string(), RawValue::from(git_dir.as_str()));
        }
        if let Some(verbose) = self.verbose {
            map.insert("verbose".to_string(), RawValue::Bool(verbose));
        }
        map
    }

    /// Serialize the canonical fields to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&RawValue::Object(self.to_raw()).to_json())
    }

    /// Split matched files into invocations of at most `chunk_size` files.
    pub fn file_chunks<'a>(&self, files: &'a [String]) -> std::slice::Chunks<'a, String> {
        files.chunks(self.chunk_size.max(1))
    }

    /// Whether validation will fail for this config.
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}
