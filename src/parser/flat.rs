//! Flat `key = value` config text.
//!
//! This is the literal on-disk representation of an overlay file: an ordered
//! mapping from bare keys to typed scalars. Nothing here knows about overlays
//! or descriptors; see [`crate::parser::overlay`] for the structured view.

use crate::parser::value::ConfigValue;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

static KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// A non-fatal problem found while reading config text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number, if the warning came from the text itself
    pub line: Option<usize>,
    /// Key the warning refers to, if one could be read
    pub key: Option<String>,
    /// Human-readable description
    pub message: String,
}

impl ParseWarning {
    /// Creates a warning attached to a key but not to a source line.
    pub fn for_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line: None,
            key: Some(key.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, &self.key) {
            (Some(line), Some(key)) => write!(f, "line {line} ({key}): {}", self.message),
            (Some(line), None) => write!(f, "line {line}: {}", self.message),
            (None, Some(key)) => write!(f, "{key}: {}", self.message),
            (None, None) => write!(f, "{}", self.message),
        }
    }
}

/// Ordered, duplicate-free mapping of config keys to scalar values.
///
/// Insertion order is kept so that re-serialization is stable. Re-inserting
/// an existing key replaces its value in place.
#[derive(Debug, Clone, Default)]
pub struct FlatConfig {
    entries: Vec<(String, ConfigValue)>,
    index: HashMap<String, usize>,
    warnings: Vec<ParseWarning>,
    malformed: HashSet<String>,
}

impl PartialEq for FlatConfig {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl FlatConfig {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses config text.
    ///
    /// Blank lines and lines starting with `#` are skipped. Every other line
    /// is split on its first `=`. Values that cannot be inferred are dropped
    /// with a warning; later duplicates overwrite earlier ones.
    pub fn parse(src: &str) -> Self {
        let mut config = Self::new();

        for (idx, line) in src.lines().enumerate() {
            let line_num = idx + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, raw)) = line.split_once('=') else {
                tracing::warn!("Ignoring line {line_num} without '=': {line}");
                config.warnings.push(ParseWarning {
                    line: Some(line_num),
                    key: None,
                    message: format!("missing '=' in line: {line}"),
                });
                continue;
            };

            let key = key.trim();
            let raw = raw.trim();

            if !KEY_RE.is_match(key) {
                tracing::warn!("Ignoring invalid key on line {line_num}: {key}");
                config.warnings.push(ParseWarning {
                    line: Some(line_num),
                    key: Some(key.to_string()),
                    message: "invalid key name".to_string(),
                });
                continue;
            }

            match ConfigValue::parse(raw) {
                Some(value) => config.insert(key, value),
                None => {
                    config.malformed.insert(key.to_string());
                    config.warnings.push(ParseWarning {
                        line: Some(line_num),
                        key: Some(key.to_string()),
                        message: format!("cannot parse value: {raw}"),
                    });
                }
            }
        }

        config
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        let key = key.into();
        let value = value.into();

        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns true if the key appeared in the source text, even with a value
    /// that could not be parsed.
    #[must_use]
    pub fn declares(&self, key: &str) -> bool {
        self.contains_key(key) || self.malformed.contains(key)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Warnings collected by [`FlatConfig::parse`].
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Renders one `key = value` line per entry, joined with `\n`.
    #[must_use]
    pub fn to_cfg_string(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{key} = {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
