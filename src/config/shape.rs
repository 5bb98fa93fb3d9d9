//! Raw configuration shapes
//!
//! Two config styles are accepted:
//! - canonical: `{ "linters": { "*.js": "eslint" }, "ignore": [...] }`
//! - shorthand: `{ "*.js": "eslint" }`, glob patterns as top-level keys
//!
//! The raw mapping is classified once here; the merge never looks at key
//! names again.

use super::defaults::is_option_name;
use super::value::RawConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigShape {
    /// `linters` is present, or every key is an option name.
    Canonical {
        options: RawConfig,
        /// Non-option keys next to an explicit `linters`; never used.
        stray: RawConfig,
    },
    /// No `linters` key and at least one non-option key.
    Shorthand {
        linters: RawConfig,
        options: RawConfig,
    },
}

impl ConfigShape {
    pub fn classify(raw: RawConfig) -> Self {
        let has_linters = raw.contains_key("linters");
        let (options, rest): (RawConfig, RawConfig) =
            raw.into_iter().partition(|(key, _)| is_option_name(key));

        if has_linters || rest.is_empty() {
            ConfigShape::Canonical {
                options,
                stray: rest,
            }
        } else {
            ConfigShape::Shorthand {
                linters: rest,
                options,
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfigShape::Canonical { .. } => "canonical",
            ConfigShape::Shorthand { options, .. } if !options.is_empty() => "mixed-shorthand",
            ConfigShape::Shorthand { .. } => "shorthand",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::value::raw_config_from_json;
    use serde_json::json;

    fn classify(value: serde_json::Value) -> ConfigShape {
        ConfigShape::classify(raw_config_from_json(value).unwrap())
    }

    #[test]
    fn test_empty_is_canonical() {
        let shape = classify(json!({}));
        assert!(matches!(shape, ConfigShape::Canonical { ref stray, .. } if stray.is_empty()));
    }

    #[test]
    fn test_options_only_is_canonical() {
        let shape = classify(json!({"concurrent": false, "relative": true}));
        match shape {
            ConfigShape::Canonical { options, stray } => {
                assert_eq!(options.len(), 2);
                assert!(stray.is_empty());
            }
            other => panic!("expected canonical, got {other:?}"),
        }
    }

    #[test]
    fn test_glob_keys_are_shorthand() {
        let shape = classify(json!({"*.js": "eslint", ".*rc": "jsonlint"}));
        assert_eq!(shape.name(), "shorthand");
        match shape {
            ConfigShape::Shorthand { linters, options } => {
                assert_eq!(linters.len(), 2);
                assert!(options.is_empty());
            }
            other => panic!("expected shorthand, got {other:?}"),
        }
    }

    #[test]
    fn test_glob_keys_with_options_are_mixed() {
        let shape = classify(json!({"ignore": ["**/*.test.js"], "*.js": ["eslint --fix", "git add"]}));
        assert_eq!(shape.name(), "mixed-shorthand");
    }

    #[test]
    fn test_linters_key_wins() {
        let shape = classify(json!({"foo": false, "linters": {"*.js": 1}}));
        match shape {
            ConfigShape::Canonical { options, stray } => {
                assert!(options.contains_key("linters"));
                assert!(stray.contains_key("foo"));
            }
            other => panic!("expected canonical, got {other:?}"),
        }
    }
}
