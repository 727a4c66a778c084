//! `.env` parsing.
//!
//! One `KEY=VALUE` pair per line. Blank lines and `#` comments are skipped,
//! the first `=` separates key from value, and the first occurrence of a key
//! wins. There is no quoting, escaping, or multi-line support.

use std::collections::HashSet;

use thiserror::Error;

/// A single `KEY=VALUE` pair from a `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
  pub key: String,
  pub value: String,
}

impl EnvEntry {
  pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
    }
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: expected KEY=VALUE, got {content:?}")]
pub struct DotenvError {
  /// 1-based line number.
  pub line: usize,
  pub content: String,
}

/// Parses `.env` content into entries, in file order.
///
/// Later duplicates of a key are dropped. A non-blank, non-comment line
/// without `=`, or with nothing before it, is an error.
pub fn parse(content: &str) -> Result<Vec<EnvEntry>, DotenvError> {
  let mut seen = HashSet::new();
  let mut entries = Vec::new();

  for (idx, raw) in content.lines().enumerate() {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }

    let (key, value) = match line.split_once('=') {
      Some((key, value)) if !key.is_empty() => (key, value),
      _ => {
        return Err(DotenvError {
          line: idx + 1,
          content: line.to_string(),
        });
      }
    };

    if seen.insert(key.to_string()) {
      entries.push(EnvEntry::new(key, value));
    }
  }

  Ok(entries)
}
