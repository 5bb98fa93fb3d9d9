//! Target platform identifiers.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Identifiers that select cmd.exe quoting. Everything else is POSIX.
const WINDOWS_IDENTIFIERS: &[&str] = &["win32", "windows"];

/// Shell family an argument is escaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// The Windows command interpreter (`cmd.exe /C`).
    Windows,
    /// POSIX-like shells (sh, bash, zsh, ...).
    Unix,
}

impl Platform {
    /// The platform this process was built for.
    pub fn current() -> Self {
        Self::from_identifier(std::env::consts::OS)
    }

    /// Map a platform identifier such as `win32`, `windows`, `linux` or
    /// `darwin` to a shell family. Unrecognized identifiers are POSIX.
    pub fn from_identifier(id: &str) -> Self {
        let id = id.trim();
        if WINDOWS_IDENTIFIERS
            .iter()
            .any(|w| w.eq_ignore_ascii_case(id))
        {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

impl FromStr for Platform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_identifier(s))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "win32"),
            Platform::Unix => write!(f, "unix"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_identifiers() {
        assert_eq!(Platform::from_identifier("win32"), Platform::Windows);
        assert_eq!(Platform::from_identifier("windows"), Platform::Windows);
        assert_eq!(Platform::from_identifier("Win32"), Platform::Windows);
    }

    #[test]
    fn test_other_identifiers_are_unix() {
        for id in ["linux", "darwin", "freebsd", "cygwin", "", "win"] {
            assert_eq!(Platform::from_identifier(id), Platform::Unix, "{id}");
        }
    }

    #[test]
    fn test_from_str() {
        let platform: Platform = "win32".parse().unwrap();
        assert!(platform.is_windows());
    }

    #[test]
    fn test_current() {
        assert_eq!(Platform::current().is_windows(), cfg!(windows));
    }
}
