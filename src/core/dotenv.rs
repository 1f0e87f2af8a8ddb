//! `.env` file parsing and variable expansion.
//!
//! Parses dotenv-style files (comments, `export` prefixes, single and double
//! quotes, escape sequences) and expands `${KEY}`, `${KEY:-default}` and
//! `$KEY` references.

use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, Result};

/// A parsed .env file
#[derive(Debug, Clone)]
pub struct DotEnv {
    entries: Vec<(String, String)>,
}

impl DotEnv {
    /// Parse an .env file from disk
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading env file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            entries: parse(&contents),
        })
    }

    /// All entries in file order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

/// Parse dotenv content into ordered key-value pairs.
///
/// Skips empty lines, comments and lines without `=`.
pub fn parse(contents: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    for line in contents.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            entries.push((key.to_string(), parse_value(value.trim())));
        }
    }

    entries
}

/// Expand variable references in `value`.
///
/// `lookup` resolves a key to its current value; unresolved or empty
/// references expand to the `:-` default when given, otherwise to nothing.
/// `\$` produces a literal dollar sign.
pub fn expand<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let resolve = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch == '\\' && chars.get(i + 1) == Some(&'$') {
            out.push('$');
            i += 2;
            continue;
        }

        if ch != '$' {
            out.push(ch);
            i += 1;
            continue;
        }

        match chars.get(i + 1) {
            Some('{') => {
                let Some(close) = chars[i + 2..].iter().position(|c| *c == '}') else {
                    out.extend(&chars[i..]);
                    break;
                };
                let inner: String = chars[i + 2..i + 2 + close].iter().collect();
                let (key, default) = match inner.split_once(":-") {
                    Some((key, default)) => (key, Some(default)),
                    None => (inner.as_str(), None),
                };
                if let Some(v) = resolve(key) {
                    out.push_str(&v);
                } else if let Some(default) = default {
                    out.push_str(default);
                }
                i += close + 3;
            }
            Some(c) if c.is_ascii_alphabetic() || *c == '_' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_')
                {
                    end += 1;
                }
                let key: String = chars[start..end].iter().collect();
                if let Some(v) = resolve(&key) {
                    out.push_str(&v);
                }
                i = end;
            }
            _ => {
                out.push('$');
                i += 1;
            }
        }
    }

    out
}

fn parse_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    // Unquoted values may carry a trailing comment.
    match raw.find(" #") {
        Some(idx) => raw[..idx].trim_end().to_string(),
        None => raw.to_string(),
    }
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
