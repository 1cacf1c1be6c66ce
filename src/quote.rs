//! Per-dialect quoting of single tokens.
//!
//! Each dialect supports up to three quoting modes:
//!
//! - `Escape`: prefix each shell-significant character with the dialect's
//!   escape character; the token is still word-split by the shell.
//! - `Strong`: wrap the whole token so nothing inside is expanded — no
//!   variables, no command substitution, no globs.
//! - `Weak`: wrap the token so most metacharacters are neutralized but the
//!   shell's own interpolation syntax still evaluates.
//!
//! All quoting functions are pure and total; there is no failing input.

use serde::{Deserialize, Serialize};

/// How one token must be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    Escape,
    Strong,
    Weak,
}

/// A raw value paired with the quoting mode it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quoted {
    pub value: String,
    pub mode: QuoteMode,
}

impl Quoted {
    pub fn new(value: impl Into<String>, mode: QuoteMode) -> Self {
        Self {
            value: value.into(),
            mode,
        }
    }
}

/// One token of a command line: either a plain string (strong-quoted at
/// assembly time) or a value with an explicit quoting mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    Plain(String),
    Quoted(Quoted),
}

impl Token {
    /// The unquoted value, used by the unknown-dialect fallback.
    pub fn raw(&self) -> &str {
        match self {
            Token::Plain(s) => s,
            Token::Quoted(q) => &q.value,
        }
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Plain(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token::Plain(s)
    }
}

impl From<Quoted> for Token {
    fn from(q: Quoted) -> Self {
        Token::Quoted(q)
    }
}

/// The quoting capabilities of one shell dialect.
///
/// A missing member is a configuration gap, not an error: [`DialectQuoter::quote`]
/// falls back to returning the value unmodified so callers always get a
/// string back, merely an unescaped one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialectQuoter {
    pub escape: Option<fn(&str) -> String>,
    pub strong: Option<fn(&str) -> String>,
    pub weak: Option<fn(&str) -> String>,
}

impl DialectQuoter {
    pub fn bash() -> Self {
        Self {
            escape: Some(bash_escape),
            strong: Some(bash_strong),
            weak: Some(bash_weak),
        }
    }

    pub fn cmd() -> Self {
        Self {
            escape: Some(cmd_escape),
            strong: Some(cmd_strong),
            weak: Some(cmd_weak),
        }
    }

    pub fn powershell() -> Self {
        Self {
            escape: Some(powershell_escape),
            strong: Some(powershell_strong),
            weak: Some(powershell_weak),
        }
    }

    /// A quoter with no functions at all; every mode passes values through.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Quote `value` in the requested mode, or return it unchanged when the
    /// dialect has no function for that mode.
    pub fn quote(&self, mode: QuoteMode, value: &str) -> String {
        let f = match mode {
            QuoteMode::Escape => self.escape,
            QuoteMode::Strong => self.strong,
            QuoteMode::Weak => self.weak,
        };
        match f {
            Some(f) => f(value),
            None => value.to_string(),
        }
    }
}

fn bash_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_whitespace()
            || matches!(
                c,
                '\\' | '|' | '(' | ')' | '{' | '}' | '<' | '>' | '$' | '&' | ';' | '"' | '\''
            )
        {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Single quotes cannot be escaped inside a bash single-quoted literal, so a
/// run of quotes is spliced in as its own double-quoted segment: the literal
/// is closed, `"<run>"` is emitted, and the literal is reopened.
fn bash_strong(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\'' {
            out.push_str("'\"'");
            while chars.peek() == Some(&'\'') {
                out.push('\'');
                chars.next();
            }
            out.push_str("\"'");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

fn bash_weak(s: &str) -> String {
    let mut v = s.replace('"', "\\\"");
    // a trailing backslash would escape the closing quote
    if v.ends_with('\\') {
        v.push('\\');
    }
    format!("\"{v}\"")
}

/// Cmd has no way to escape whitespace, only to quote it, so runs of
/// whitespace are wrapped in a literal double-quote pair.
fn cmd_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            out.push('"');
            out.push(c);
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                out.push(chars.next().unwrap_or_default());
            }
            out.push('"');
        } else {
            if matches!(c, '%' | '&' | '\\' | '<' | '>' | '^' | '|' | '"') {
                out.push('^');
            }
            out.push(c);
        }
    }
    out
}

/// Cmd has no true no-expansion quoting: `%VAR%` expands even inside double
/// quotes. Strong quoting is weak quoting with every `%` additionally lifted
/// out as a literal `"%"` segment.
fn cmd_strong(s: &str) -> String {
    cmd_weak(s).replace('%', "\"%\"")
}

fn cmd_weak(s: &str) -> String {
    let mut v = s.replace('"', "\\\"");
    // TODO: only the first line break gets the ^ prefix; generalize once the
    // multi-line behavior has been verified against a real cmd.exe.
    if let Some(idx) = v.find('\n') {
        let brk = if idx > 0 && v.as_bytes()[idx - 1] == b'\r' {
            idx - 1
        } else {
            idx
        };
        v.insert(brk, '^');
    }
    if v.ends_with('\\') {
        v.push('\\');
    }
    format!("\"{v}\"")
}

fn powershell_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '`' | '|' | '{' | '}' | '(' | ')' | '<' | '>' | ';' | '"' | '\'' | ' '
        ) {
            out.push('`');
        }
        out.push(c);
    }
    out
}

fn powershell_strong(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn powershell_weak(s: &str) -> String {
    let mut v = s.replace('"', "`\"");
    // a trailing backtick would escape the closing quote
    if v.ends_with('`') {
        v.push('`');
    }
    format!("\"{v}\"")
}
