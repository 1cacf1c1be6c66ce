//! Command-line assembly for injection into a long-lived shell.
//!
//! The caller cannot spawn a fresh process with a clean environment — it has
//! to write one line of text into an already-running interactive session so
//! the shell applies a `cd`, an environment patch, and the invocation itself
//! before the user's program runs. Each dialect has its own statement syntax
//! for the three effects; statements are rendered independently and then
//! joined left-to-right so the shell processes them sequentially.
//!
//! The output never carries a line terminator; appending the target shell's
//! terminator is the transport's job.

use indexmap::IndexMap;
use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::assemble::assemble;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::quote::{DialectQuoter, QuoteMode, Token};

/// Ordered environment overrides: `Some(value)` sets a variable, `None`
/// removes it in the target shell. Insertion order is preserved in the
/// rendered statements.
pub type EnvPatch = IndexMap<String, Option<String>>;

/// Parse a `KEY=VALUE` CLI-style environment entry.
pub fn parse_env_entry(entry: &str) -> Result<(String, String)> {
    match entry.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(Error::InvalidEnvEntry(entry.to_string())),
    }
}

/// The caller-supplied intent: where to run, what to run, and which
/// environment overrides to apply first. Never mutated by the builder; the
/// rendered line is a pure function of `(Dialect, CommandSpec)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Working directory; empty means "do not change directory"
    #[serde(default)]
    pub cwd: String,
    /// The command and its arguments, in invocation order
    pub args: Vec<Token>,
    /// Environment overrides applied before the command runs
    #[serde(default)]
    pub env: EnvPatch,
}

impl CommandSpec {
    pub fn new(args: impl IntoIterator<Item = impl Into<Token>>) -> Self {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), Some(value.into()));
        self
    }

    pub fn with_env_removed(mut self, name: impl Into<String>) -> Self {
        self.env.insert(name.into(), None);
        self
    }
}

/// Detect the dialect from the shell's executable path, then build.
///
/// This is the entry point for callers holding only an executable identity;
/// see [`build`] for the dialect-explicit form.
pub fn build_for_shell(executable: &str, spec: &CommandSpec) -> Result<String> {
    build(Dialect::detect(executable), spec)
}

/// Render `spec` as one injectable line in the given dialect.
///
/// An empty `cwd` omits the change-directory clause; an empty env patch
/// omits the environment clauses. For [`Dialect::Unknown`] the arguments are
/// joined verbatim with no quoting and cwd/env are ignored — a lossy
/// fallback, surfaced as a single warning diagnostic.
pub fn build(dialect: Dialect, spec: &CommandSpec) -> Result<String> {
    if spec.args.is_empty() {
        return Err(Error::EmptyCommand);
    }
    match dialect {
        Dialect::Bash => Ok(build_bash(spec)),
        Dialect::Cmd => Ok(build_cmd(spec)),
        Dialect::PowerShell => Ok(build_powershell(spec)),
        Dialect::Unknown => {
            warn!("unrecognized shell executable; emitting command line without escaping");
            Ok(spec.args.iter().map(Token::raw).join(" "))
        }
    }
}

fn build_bash(spec: &CommandSpec) -> String {
    let quoter = DialectQuoter::bash();
    let strong = |v: &str| quoter.quote(QuoteMode::Strong, v);
    let mut clauses = Vec::new();
    if !spec.cwd.is_empty() {
        clauses.push(format!("cd {}", strong(&spec.cwd)));
    }
    // one env clause carries every set and unset so nothing is shadowed by
    // an unrelated statement separator
    let mut invocation = String::new();
    if !spec.env.is_empty() {
        invocation.push_str("env");
        for (name, value) in &spec.env {
            match value {
                Some(value) => invocation.push_str(&format!(" {}", strong(&format!("{name}={value}")))),
                None => invocation.push_str(&format!(" -u {}", strong(name))),
            }
        }
        invocation.push(' ');
    }
    invocation.push_str(&assemble(&spec.args, &quoter));
    clauses.push(invocation);
    clauses.join(" && ")
}

fn build_cmd(spec: &CommandSpec) -> String {
    let quoter = DialectQuoter::cmd();
    let strong = |v: &str| quoter.quote(QuoteMode::Strong, v);
    let mut clauses = Vec::new();
    if !spec.cwd.is_empty() {
        clauses.push(format!("cd {}", strong(&spec.cwd)));
    }
    let mut remainder = Vec::new();
    for (name, value) in &spec.env {
        match value {
            Some(value) => remainder.push(format!("set {}", strong(&format!("{name}={value}")))),
            None => remainder.push(format!("set {name}=\"\"")),
        }
    }
    let has_env = !remainder.is_empty();
    remainder.push(assemble(&spec.args, &quoter));
    // `set` only persists for the same cmd instance, so when the patch is
    // non-empty the env clauses and the invocation run inside one nested
    // interpreter
    clauses.push(wrap_cmd_remainder(remainder, has_env));
    clauses.join(" && ")
}

fn wrap_cmd_remainder(remainder: Vec<String>, nest: bool) -> String {
    let joined = remainder.join(" && ");
    if nest {
        format!("cmd /C \"{joined}\"")
    } else {
        joined
    }
}

fn build_powershell(spec: &CommandSpec) -> String {
    let quoter = DialectQuoter::powershell();
    let strong = |v: &str| quoter.quote(QuoteMode::Strong, v);
    let mut statements = Vec::new();
    if !spec.cwd.is_empty() {
        statements.push(format!("cd {}", strong(&spec.cwd)));
    }
    for (name, value) in &spec.env {
        let name = powershell_env_name(name);
        match value {
            Some(value) => statements.push(format!("${{env:{name}}}={}", strong(value))),
            None => statements.push(format!("Remove-Item ${{env:{name}}}")),
        }
    }
    statements.push(format!("& {}", assemble(&spec.args, &quoter)));
    statements.join("; ")
}

/// Variable names sit in the unquoted `${env:<name>}` brace context, which
/// has its own escaping: backticks are quadrupled and `?` gets a backtick
/// prefix.
fn powershell_env_name(name: &str) -> String {
    name.replace('`', "````").replace('?', "`?")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_bash_full_line() {
        let spec = CommandSpec::new(["echo", "hello world"])
            .with_cwd("/tmp/dir x")
            .with_env("FOO", "bar baz")
            .with_env_removed("OLD");
        assert_eq!(
            build(Dialect::Bash, &spec).unwrap(),
            "cd '/tmp/dir x' && env 'FOO=bar baz' -u 'OLD' 'echo' 'hello world'"
        );
    }

    #[test]
    fn test_bash_env_value_with_metacharacters() {
        let spec = CommandSpec::new(["printenv", "SUCCESS"]).with_env("SUCCESS", "A?B_C | D $PATH");
        assert_eq!(
            build(Dialect::Bash, &spec).unwrap(),
            "env 'SUCCESS=A?B_C | D $PATH' 'printenv' 'SUCCESS'"
        );
    }

    #[test]
    fn test_bash_no_cwd_no_env() {
        let spec = CommandSpec::new(["echo", "hi"]);
        assert_eq!(build(Dialect::Bash, &spec).unwrap(), "'echo' 'hi'");
    }

    #[test]
    fn test_cmd_env_nests_remainder() {
        let spec = CommandSpec::new(["node", "app.js"])
            .with_cwd(r"C:\work")
            .with_env("FOO", "100% done")
            .with_env_removed("OLD");
        let line = build(Dialect::Cmd, &spec).unwrap();
        assert_eq!(
            line,
            r#"cd "C:\work" && cmd /C "set "FOO=100"%" done" && set OLD="" && "node" "app.js"""#
        );
        // the nested interpreter's wrapper must be closed
        assert!(line.ends_with(r#""app.js"""#));
    }

    #[test]
    fn test_cmd_without_env_has_no_wrapper() {
        let spec = CommandSpec::new(["node", "app.js"]).with_cwd(r"C:\work");
        assert_eq!(
            build(Dialect::Cmd, &spec).unwrap(),
            r#"cd "C:\work" && "node" "app.js""#
        );
    }

    #[test]
    fn test_powershell_full_line() {
        let spec = CommandSpec::new(["ls"])
            .with_cwd("/home/u")
            .with_env("FOO", "it's")
            .with_env_removed("OLD");
        assert_eq!(
            build(Dialect::PowerShell, &spec).unwrap(),
            "cd '/home/u'; ${env:FOO}='it''s'; Remove-Item ${env:OLD}; & 'ls'"
        );
    }

    #[test]
    fn test_powershell_env_name_escaping() {
        assert_eq!(powershell_env_name("WH?T"), "WH`?T");
        assert_eq!(powershell_env_name("A`B"), "A````B");
        let spec = CommandSpec::new(["ls"]).with_env("WH?T", "x");
        assert_eq!(
            build(Dialect::PowerShell, &spec).unwrap(),
            "${env:WH`?T}='x'; & 'ls'"
        );
    }

    #[test]
    fn test_unknown_dialect_falls_back_to_plain_join() {
        let dialect = Dialect::detect("/usr/bin/fish");
        assert_eq!(dialect, Dialect::Unknown);
        let spec = CommandSpec::new(["echo", "a b", "$HOME"])
            .with_cwd("/tmp")
            .with_env("FOO", "bar");
        // lossy on purpose: no quoting, no cwd, no env
        assert_eq!(build(dialect, &spec).unwrap(), "echo a b $HOME");
    }

    #[test]
    fn test_empty_args_rejected() {
        let spec = CommandSpec::new(Vec::<String>::new()).with_cwd("/tmp");
        assert!(matches!(build(Dialect::Bash, &spec), Err(Error::EmptyCommand)));
    }

    #[test]
    fn test_env_patch_preserves_insertion_order() {
        let spec = CommandSpec::new(["true"])
            .with_env("B", "2")
            .with_env_removed("A")
            .with_env("C", "3");
        assert_eq!(
            build(Dialect::Bash, &spec).unwrap(),
            "env 'B=2' -u 'A' 'C=3' 'true'"
        );
    }

    #[test]
    fn test_builder_does_not_mutate_spec() {
        let spec = CommandSpec::new(["echo", "x"]).with_env("K", "v");
        let copy = spec.clone();
        build(Dialect::Bash, &spec).unwrap();
        build(Dialect::Cmd, &spec).unwrap();
        assert_eq!(spec, copy);
    }

    #[test]
    fn test_parse_env_entry() {
        assert_eq!(
            parse_env_entry("FOO=bar=baz").unwrap(),
            ("FOO".to_string(), "bar=baz".to_string())
        );
        assert_eq!(
            parse_env_entry("FOO=").unwrap(),
            ("FOO".to_string(), String::new())
        );
        assert!(parse_env_entry("FOO").is_err());
        assert!(parse_env_entry("=bar").is_err());
    }
}
