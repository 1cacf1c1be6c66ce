//! Shell dialect classification.
//!
//! A dialect is re-derived from the executable path on every call. Nothing is
//! cached: the same long-lived session object may be pointed at a different
//! shell between calls, and detection is cheap.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::quote::DialectQuoter;

static BASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"bash(\.exe)?$").unwrap());
static POWERSHELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(ps|pwsh|powershell)(\.exe)?$").unwrap());
static CMD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)cmd(\.exe)?$").unwrap());

/// The shell grammar a command line is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Dialect {
    /// POSIX-like shell (bash)
    Bash,
    /// Windows command interpreter (cmd.exe)
    Cmd,
    /// PowerShell or PowerShell Core
    PowerShell,
    /// Anything else; quoting is skipped entirely for this variant
    Unknown,
}

impl Dialect {
    /// Classify a shell by its executable path or bare name.
    ///
    /// Matching is done against the trailing path segment. Unix-style names
    /// match case-sensitively (`bash`, not `Bash`); Windows interpreters match
    /// case-insensitively with an optional `.exe` suffix. Anything
    /// unrecognized, including an empty string, is `Unknown` — detection
    /// never fails.
    pub fn detect(executable: &str) -> Self {
        let name = executable
            .split(['/', '\\'])
            .next_back()
            .unwrap_or_default();
        if BASH_RE.is_match(name) {
            Self::Bash
        } else if POWERSHELL_RE.is_match(name) {
            Self::PowerShell
        } else if CMD_RE.is_match(name) {
            Self::Cmd
        } else {
            Self::Unknown
        }
    }

    /// The quoting functions for this dialect.
    ///
    /// `Unknown` yields an empty quoter: every mode falls back to the
    /// identity, so callers get their strings back unescaped.
    pub fn quoter(&self) -> DialectQuoter {
        match self {
            Self::Bash => DialectQuoter::bash(),
            Self::Cmd => DialectQuoter::cmd(),
            Self::PowerShell => DialectQuoter::powershell(),
            Self::Unknown => DialectQuoter::empty(),
        }
    }
}
