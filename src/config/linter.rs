//! Linter command shapes
//!
//! A `linters` entry maps one glob pattern to:
//! - a single command string
//! - a sequence of steps run in order, each a command string or a function
//! - a function of the matched filenames returning the command(s) to run
//!
//! Functions are resolved lazily against the matched files, never while the
//! configuration is normalized.

use std::fmt;
use std::sync::Arc;

use staged_escape::{escape_arg, Platform};

use super::value::RawValue;

/// Commands produced by a function-valued linter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandList(pub Vec<String>);

impl CommandList {
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<String> for CommandList {
    fn from(command: String) -> Self {
        CommandList(vec![command])
    }
}

impl From<&str> for CommandList {
    fn from(command: &str) -> Self {
        CommandList(vec![command.to_string()])
    }
}

impl From<Vec<String>> for CommandList {
    fn from(commands: Vec<String>) -> Self {
        CommandList(commands)
    }
}

impl<'a> From<Vec<&'a str>> for CommandList {
    fn from(commands: Vec<&'a str>) -> Self {
        CommandList(commands.into_iter().map(String::from).collect())
    }
}

type LinterClosure = dyn Fn(&[String]) -> CommandList + Send + Sync;

/// Function from matched filenames to the command(s) to run.
///
/// Equality is identity: two `LinterFn`s are equal when they share the same
/// closure allocation.
#[derive(Clone)]
pub struct LinterFn(Arc<LinterClosure>);

impl LinterFn {
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&[String]) -> R + Send + Sync + 'static,
        R: Into<CommandList>,
    {
        LinterFn(Arc::new(move |files: &[String]| -> CommandList { f(files).into() }))
    }

    pub fn call(&self, files: &[String]) -> Vec<String> {
        (self.0)(files).into_vec()
    }
}

impl PartialEq for LinterFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }
}

impl fmt::Debug for LinterFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LinterFn(..)")
    }
}

/// One step of a command sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum LinterStep {
    Command(String),
    Dynamic(LinterFn),
}

/// The value of a single `linters` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum LinterCommand {
    Single(String),
    Sequence(Vec<LinterStep>),
    Dynamic(LinterFn),
}

/// A command ready for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub command: String,
    /// Static commands get the matched filenames appended as arguments;
    /// commands returned by a function already reference the files they need.
    pub appends_files: bool,
}

impl LinterStep {
    fn from_raw(value: &RawValue) -> Option<Self> {
        match value {
            RawValue::String(s) => Some(LinterStep::Command(s.clone())),
            RawValue::Linter(f) => Some(LinterStep::Dynamic(f.clone())),
            _ => None,
        }
    }

    fn to_raw(&self) -> RawValue {
        match self {
            LinterStep::Command(s) => RawValue::String(s.clone()),
            LinterStep::Dynamic(f) => RawValue::Linter(f.clone()),
        }
    }

    fn resolve_into(&self, files: &[String], out: &mut Vec<ResolvedCommand>) {
        match self {
            LinterStep::Command(command) => out.push(ResolvedCommand {
                command: command.clone(),
                appends_files: true,
            }),
            LinterStep::Dynamic(f) => out.extend(f.call(files).into_iter().map(|command| {
                ResolvedCommand {
                    command,
                    appends_files: false,
                }
            })),
        }
    }
}

impl LinterCommand {
    /// Interpret a raw value as a linter command.
    ///
    /// Accepts a string, a function, or an array whose elements are all
    /// strings or functions. Anything else is `None`.
    pub fn from_raw(value: &RawValue) -> Option<Self> {
        match value {
            RawValue::String(s) => Some(LinterCommand::Single(s.clone())),
            RawValue::Linter(f) => Some(LinterCommand::Dynamic(f.clone())),
            RawValue::Array(items) => items
                .iter()
                .map(LinterStep::from_raw)
                .collect::<Option<Vec<_>>>()
                .map(LinterCommand::Sequence),
            _ => None,
        }
    }

    pub fn to_raw(&self) -> RawValue {
        match self {
            LinterCommand::Single(s) => RawValue::String(s.clone()),
            LinterCommand::Sequence(steps) => {
                RawValue::Array(steps.iter().map(LinterStep::to_raw).collect())
            }
            LinterCommand::Dynamic(f) => RawValue::Linter(f.clone()),
        }
    }

    /// Whether any part of this command is a function.
    pub fn is_dynamic(&self) -> bool {
        match self {
            LinterCommand::Single(_) => false,
            LinterCommand::Dynamic(_) => true,
            LinterCommand::Sequence(steps) => {
                steps.iter().any(|s| matches!(s, LinterStep::Dynamic(_)))
            }
        }
    }

    /// Resolve to the ordered list of commands for the matched files,
    /// evaluating functions against `files`.
    pub fn resolve(&self, files: &[String]) -> Vec<ResolvedCommand> {
        let mut out = Vec::new();
        match self {
            LinterCommand::Single(command) => {
                LinterStep::Command(command.clone()).resolve_into(files, &mut out)
            }
            LinterCommand::Sequence(steps) => {
                for step in steps {
                    step.resolve_into(files, &mut out);
                }
            }
            LinterCommand::Dynamic(f) => {
                LinterStep::Dynamic(f.clone()).resolve_into(files, &mut out)
            }
        }
        out
    }

    /// Command strings for the matched files, in run order.
    pub fn commands_for(&self, files: &[String]) -> Vec<String> {
        self.resolve(files).into_iter().map(|c| c.command).collect()
    }

    /// Full shell command lines: static commands get every file appended,
    /// escaped for `platform`.
    pub fn command_lines(&self, files: &[String], platform: Platform) -> Vec<String> {
        self.resolve(files)
            .into_iter()
            .map(|resolved| {
                if !resolved.appends_files || files.is_empty() {
                    return resolved.command;
                }
                let args: Vec<String> = files.iter().map(|f| escape_arg(f, platform)).collect();
                format!("{} {}", resolved.command, args.join(" "))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_raw_string() {
        let cmd = LinterCommand::from_raw(&RawValue::from("eslint")).unwrap();
        assert_eq!(cmd, LinterCommand::Single("eslint".to_string()));
    }

    #[test]
    fn test_from_raw_sequence() {
        let cmd = LinterCommand::from_raw(&RawValue::from(json!(["eslint --fix", "git add"]))).unwrap();
        assert_eq!(
            cmd,
            LinterCommand::Sequence(vec![
                LinterStep::Command("eslint --fix".to_string()),
                LinterStep::Command("git add".to_string()),
            ])
        );
    }

    #[test]
    fn test_from_raw_rejects_bad_shapes() {
        for value in [json!(1), json!(true), json!(null), json!({"a": "b"}), json!(["ok", 2]), json!([["nested"]])] {
            assert!(LinterCommand::from_raw(&RawValue::from(value.clone())).is_none(), "{value}");
        }
    }

    #[test]
    fn test_function_is_resolved_lazily() {
        let f = LinterFn::new(|files: &[String]| format!("eslint --fix {}", files.join(" ")));
        let cmd = LinterCommand::from_raw(&RawValue::Linter(f)).unwrap();
        assert!(cmd.is_dynamic());
        assert_eq!(
            cmd.commands_for(&files(&["a.js", "b.js"])),
            vec!["eslint --fix a.js b.js".to_string()]
        );
    }

    #[test]
    fn test_sequence_with_function() {
        let f = LinterFn::new(|files: &[String]| {
            files.iter().map(|f| format!("stylelint {f}")).collect::<Vec<_>>()
        });
        let cmd = LinterCommand::Sequence(vec![
            LinterStep::Dynamic(f),
            LinterStep::Command("git add".to_string()),
        ]);
        let resolved = cmd.resolve(&files(&["a.css", "b.css"]));
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].command, "stylelint a.css");
        assert!(!resolved[0].appends_files);
        assert_eq!(resolved[2].command, "git add");
        assert!(resolved[2].appends_files);
    }

    #[test]
    fn test_command_lines_escape_files() {
        let cmd = LinterCommand::Single("prettier --write".to_string());
        let lines = cmd.command_lines(&files(&["my file.js"]), Platform::Windows);
        assert_eq!(lines, vec!["prettier --write \"my file.js\"".to_string()]);

        let lines = cmd.command_lines(&files(&["a&b.js"]), Platform::Unix);
        assert_eq!(lines, vec![r"prettier --write a\&b\.js".to_string()]);
    }

    #[test]
    fn test_linter_fn_identity_equality() {
        let f = LinterFn::new(|_| "eslint");
        let g = LinterFn::new(|_| "eslint");
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }

    #[test]
    fn test_to_raw_preserves_shape() {
        let raw = RawValue::from(json!(["eslint", "git add"]));
        let cmd = LinterCommand::from_raw(&raw).unwrap();
        assert_eq!(cmd.to_raw(), raw);
    }
}
