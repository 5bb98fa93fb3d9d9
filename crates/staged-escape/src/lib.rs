//! Shell argument escaping for generated linter command lines.
//!
//! Filenames are interpolated into command lines that are later handed to a
//! shell. Each argument is escaped for exactly one of two shell families:
//! - POSIX-like shells: backslash escaping, see [`escape_unix_shell_arg`]
//! - the Windows command interpreter: quoting, see [`escape_win_cmd_arg`]
//!
//! The target platform is always an explicit parameter. [`Platform::current`]
//! is the only place the ambient platform is read.

mod platform;
mod unix;
mod windows;

pub use platform::Platform;
pub use unix::escape_unix_shell_arg;
pub use windows::escape_win_cmd_arg;

/// Escape a single argument for the shell of the given platform.
pub fn escape_arg(arg: &str, platform: Platform) -> String {
    match platform {
        Platform::Windows => escape_win_cmd_arg(arg),
        Platform::Unix => escape_unix_shell_arg(arg),
    }
}

/// Escape a single argument for the platform this process runs on.
pub fn escape_arg_for_current(arg: &str) -> String {
    escape_arg(arg, Platform::current())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatches_on_platform() {
        assert_eq!(escape_arg("a&b", Platform::Windows), "\"a&b\"");
        assert_eq!(escape_arg("a&b", Platform::Unix), r"a\&b");
    }

    #[test]
    fn test_identifier_dispatch() {
        assert_eq!(escape_arg("a b", Platform::from_identifier("win32")), "\"a b\"");
        assert_eq!(escape_arg("a b", Platform::from_identifier("darwin")), r"a\\ b");
    }

    #[test]
    fn test_current_platform_matches_explicit() {
        let arg = "src/my file.js";
        assert_eq!(
            escape_arg_for_current(arg),
            escape_arg(arg, Platform::current())
        );
    }
}
