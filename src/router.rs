//! Input classification: exact commands, natural-language phrasings, and the
//! remote-query fallback.
//!
//! The dispatch tables are built once at startup and passed by reference;
//! routing itself never fails, because anything unrecognized is a remote
//! query.

use regex::Regex;
use tracing::debug;

/// Canonical local command keys shared by the alias table and the
/// natural-language patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKey {
    Help,
    Exit,
    Ls,
    Cd,
    Pwd,
    CreateFile,
    CreateDir,
    Remove,
}

impl CommandKey {
    /// Whether the command consumes the remainder of the line as an argument.
    fn takes_argument(self) -> bool {
        matches!(
            self,
            Self::Cd | Self::CreateFile | Self::CreateDir | Self::Remove
        )
    }
}

/// One classified input line. Produced by `RouteTable::route`, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// A local filesystem command with its (possibly empty) argument.
    Local { key: CommandKey, arg: String },
    /// Anything else, forwarded to the remote model with the text unchanged.
    Remote(String),
}

/// Exact command aliases, matched case-insensitively on the first token.
const ALIASES: [(&str, CommandKey); 13] = [
    ("help", CommandKey::Help),
    ("exit", CommandKey::Exit),
    ("quit", CommandKey::Exit),
    ("ls", CommandKey::Ls),
    ("tree", CommandKey::Ls),
    ("cd", CommandKey::Cd),
    ("pwd", CommandKey::Pwd),
    ("create", CommandKey::CreateFile),
    ("touch", CommandKey::CreateFile),
    ("mkdir", CommandKey::CreateDir),
    ("rm", CommandKey::Remove),
    ("delete", CommandKey::Remove),
    ("remove", CommandKey::Remove),
];

/// Ordered natural-language patterns; the first full-string match wins.
/// Patterns capturing a group use it (trimmed) as the command argument.
const NATURAL_PATTERNS: [(&str, CommandKey); 14] = [
    (r"list(?: files?)?(?: in(?: current)? directory)?", CommandKey::Ls),
    (r"show(?: directory)? tree", CommandKey::Ls),
    (r"change(?: directory)? to (.*?)", CommandKey::Cd),
    (r"go to (.*?)", CommandKey::Cd),
    (r"what is the current directory\??", CommandKey::Pwd),
    (r"show(?: the)? current directory", CommandKey::Pwd),
    (
        r"create(?: a)?(?: new)? file(?: named)?\s+([\w./-]+)",
        CommandKey::CreateFile,
    ),
    (r"touch\s+([\w./-]+)", CommandKey::CreateFile),
    (
        r"create(?: a)?(?: new)? directory(?: named)?\s+([\w./-]+)",
        CommandKey::CreateDir,
    ),
    (r"make directory\s+([\w./-]+)", CommandKey::CreateDir),
    (r"mkdir\s+([\w./-]+)", CommandKey::CreateDir),
    (r"delete\s+([\w./-]+)", CommandKey::Remove),
    (r"remove\s+([\w./-]+)", CommandKey::Remove),
    (r"rm\s+([\w./-]+)", CommandKey::Remove),
];

/// Immutable dispatch configuration, constructed once at startup.
pub struct RouteTable {
    patterns: Vec<(Regex, CommandKey)>,
}

impl RouteTable {
    pub fn new() -> Self {
        let patterns = NATURAL_PATTERNS
            .iter()
            .map(|(pattern, key)| {
                // Full-string match, case-insensitive, dot matches newline.
                let wrapped = format!("(?is)^(?:{pattern})$");
                let regex = Regex::new(&wrapped).expect("static routing pattern must compile");
                (regex, *key)
            })
            .collect();
        Self { patterns }
    }

    /// Classify one raw input line. First match wins:
    /// exact alias, then natural-language pattern, then remote fallback.
    pub fn route(&self, input: &str) -> ParsedCommand {
        let trimmed = input.trim();

        if let Some(token) = trimmed.split_whitespace().next() {
            for (alias, key) in ALIASES {
                if token.eq_ignore_ascii_case(alias) {
                    let arg = if key.takes_argument() {
                        trimmed[token.len()..].trim().to_string()
                    } else {
                        String::new()
                    };
                    debug!(?key, %arg, "matched exact command");
                    return ParsedCommand::Local { key, arg };
                }
            }
        }

        for (pattern, key) in &self.patterns {
            if let Some(caps) = pattern.captures(trimmed) {
                let arg = caps
                    .get(1)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default();
                debug!(?key, %arg, "matched natural-language command");
                return ParsedCommand::Local { key: *key, arg };
            }
        }

        ParsedCommand::Remote(input.to_string())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}
