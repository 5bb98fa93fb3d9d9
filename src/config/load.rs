//! Configuration file discovery and loading
//!
//! Looks for, in order:
//! 1. `package.json` with a `"staged-lint"` entry
//! 2. `.stagedlintrc` (YAML or JSON)
//! 3. `.stagedlintrc.json`
//! 4. `.stagedlintrc.yaml` / `.stagedlintrc.yml`
//! 5. `.stagedlintrc.toml`

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::LoadError;
use super::value::{RawConfig, RawValue};

/// Key holding the configuration inside `package.json`
pub const PACKAGE_KEY: &str = "staged-lint";

/// File names searched by [`discover`], in precedence order
pub const SEARCH_PLACES: &[&str] = &[
    "package.json",
    ".stagedlintrc",
    ".stagedlintrc.json",
    ".stagedlintrc.yaml",
    ".stagedlintrc.yml",
    ".stagedlintrc.toml",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// The `"staged-lint"` entry of a `package.json`
    Package,
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        if path.file_name().and_then(|n| n.to_str()) == Some("package.json") {
            return ConfigFormat::Package;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ConfigFormat::Json,
            Some("toml") => ConfigFormat::Toml,
            // Extension-less rc files may hold either; YAML parses both.
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub format: ConfigFormat,
    /// SHA-256 digest of the raw file bytes
    pub digest: String,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub source: ConfigSource,
    pub raw: RawConfig,
}

/// Search `dir` for a configuration file.
///
/// A `package.json` without a `"staged-lint"` entry is skipped.
pub fn discover(dir: &Path) -> Result<Option<LoadedConfig>, LoadError> {
    for name in SEARCH_PLACES {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        if let Some(loaded) = read_config(&path)? {
            return Ok(Some(loaded));
        }
        debug!(path = %path.display(), "no configuration entry, skipping");
    }
    Ok(None)
}

/// Load an explicitly named configuration file.
pub fn load_file(path: &Path) -> Result<LoadedConfig, LoadError> {
    read_config(path)?.ok_or_else(|| LoadError::MissingPackageKey {
        path: path.to_path_buf(),
        key: PACKAGE_KEY,
    })
}

fn read_config(path: &Path) -> Result<Option<LoadedConfig>, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let parse_error = |message: String| LoadError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let contents = String::from_utf8(bytes)
        .map_err(|e| parse_error(format!("Invalid UTF-8: {}", e)))?;

    let format = ConfigFormat::from_path(path);
    let value = match format {
        ConfigFormat::Package => {
            let mut manifest: Value = serde_json::from_str(&contents)
                .map_err(|e| parse_error(format!("JSON parse error: {}", e)))?;
            match manifest.get_mut(PACKAGE_KEY) {
                Some(entry) => entry.take(),
                None => return Ok(None),
            }
        }
        ConfigFormat::Json => serde_json::from_str(&contents)
            .map_err(|e| parse_error(format!("JSON parse error: {}", e)))?,
        ConfigFormat::Yaml => serde_yaml::from_str(&contents)
            .map_err(|e| parse_error(format!("YAML parse error: {}", e)))?,
        ConfigFormat::Toml => {
            let toml_value: toml::Value = toml::from_str(&contents)
                .map_err(|e| parse_error(format!("TOML parse error: {}", e)))?;
            toml_to_json(toml_value)
        }
    };

    let raw = match RawValue::from(value).into_object() {
        Ok(raw) => raw,
        Err(other) => {
            return Err(LoadError::NotAnObject {
                path: path.to_path_buf(),
                found: other.type_name(),
            })
        }
    };

    debug!(path = %path.display(), digest = %digest, "loaded configuration");

    Ok(Some(LoadedConfig {
        source: ConfigSource {
            path: path.to_path_buf(),
            format,
            digest,
        },
        raw,
    }))
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            Value::Object(table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/package.json")), ConfigFormat::Package);
        assert_eq!(ConfigFormat::from_path(Path::new(".stagedlintrc.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new(".stagedlintrc.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new(".stagedlintrc.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new(".stagedlintrc")), ConfigFormat::Yaml);
    }

    #[test]
    fn test_load_package_json_entry() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "package.json",
            r#"{"name": "app", "staged-lint": {"*.js": ["eslint --fix", "git add"]}}"#,
        );

        let loaded = discover(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.source.format, ConfigFormat::Package);
        assert_eq!(loaded.source.digest.len(), 64);
        assert!(loaded.raw.contains_key("*.js"));
        assert!(!loaded.raw.contains_key("name"));
    }

    #[test]
    fn test_package_json_without_entry_is_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "package.json", r#"{"name": "app"}"#);
        write(&dir, ".stagedlintrc", "'*.js': eslint\n");

        let loaded = discover(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.source.format, ConfigFormat::Yaml);
        assert_eq!(loaded.raw.get("*.js"), Some(&RawValue::from("eslint")));
    }

    #[test]
    fn test_explicit_package_json_without_entry_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "package.json", r#"{"name": "app"}"#);
        assert!(matches!(
            load_file(&path),
            Err(LoadError::MissingPackageKey { .. })
        ));
    }

    #[test]
    fn test_rc_file_accepts_json() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, ".stagedlintrc", r#"{"linters": {"*.css": "stylelint"}}"#);
        let loaded = load_file(&path).unwrap();
        assert!(loaded.raw.contains_key("linters"));
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            ".stagedlintrc.toml",
            "concurrent = false\nignore = [\"dist/**\"]\n\n[linters]\n\"*.rs\" = \"rustfmt\"\n",
        );
        let loaded = load_file(&path).unwrap();
        assert_eq!(loaded.raw.get("concurrent"), Some(&RawValue::Bool(false)));
        let linters = loaded.raw.get("linters").and_then(RawValue::as_object).unwrap();
        assert_eq!(linters.get("*.rs"), Some(&RawValue::from("rustfmt")));
    }

    #[test]
    fn test_toml_linters_keep_written_order() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            ".stagedlintrc.toml",
            "[linters]\n\"*.ts\" = \"tsc\"\n\"*.js\" = \"eslint\"\n\"*.css\" = \"stylelint\"\n",
        );
        let loaded = load_file(&path).unwrap();
        let config = crate::config::resolve(Some(loaded.raw), false);

        let patterns: Vec<&str> = config.linters.keys().map(String::as_str).collect();
        assert_eq!(patterns, vec!["*.ts", "*.js", "*.css"]);
    }

    #[test]
    fn test_not_an_object() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, ".stagedlintrc.json", r#"["eslint"]"#);
        match load_file(&path) {
            Err(LoadError::NotAnObject { found, .. }) => assert_eq!(found, "array"),
            other => panic!("expected NotAnObject, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, ".stagedlintrc.json", "{ not json");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_nothing_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = load_file(Path::new("/nonexistent/.stagedlintrc.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
