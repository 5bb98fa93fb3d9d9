//! Backslash escaping for POSIX-like shells.

use regex_lite::Regex;
use std::sync::OnceLock;

fn non_word_char() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([^a-zA-Z0-9_])").expect("static regex"))
}

fn space_char() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"( )").expect("static regex"))
}

/// Escape an argument for a POSIX-like shell.
///
/// Two passes, both observable in the output:
/// 1. every character outside `[a-zA-Z0-9_]` gets a leading backslash
/// 2. every literal space gets another leading backslash
///
/// The second pass exists for consumers that split the command line on
/// unescaped spaces before the shell sees it, so `"a b"` becomes `a\\ b`.
pub fn escape_unix_shell_arg(arg: &str) -> String {
    let escaped = non_word_char().replace_all(arg, r"\${1}");
    space_char().replace_all(&escaped, r"\${1}").into_owned()
}
