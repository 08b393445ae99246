//! Scalar values of the overlay config format.
//!
//! Every `key = value` line carries one of four literal kinds. This module is
//! the only place where raw text is turned into a typed value and back.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static FLOAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+\.[0-9]*|\.[0-9]+)$").unwrap());

/// A typed scalar as stored on the right-hand side of a config line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// `true` / `false`
    Bool(bool),
    /// Unsigned decimal integer literal
    Int(i64),
    /// Decimal literal with a dot (`1.5`, `1.`, `.5`)
    Float(f64),
    /// Double-quoted literal, quotes stripped, no escape processing
    Text(String),
}

impl ConfigValue {
    /// Infers the value kind from a raw token.
    ///
    /// Returns `None` (and logs a warning) when the token matches none of the
    /// recognized literal forms.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if raw == "true" {
            return Some(Self::Bool(true));
        }
        if raw == "false" {
            return Some(Self::Bool(false));
        }
        if INTEGER_RE.is_match(raw) {
            // Whole floats are written without a dot, so digits past i64 read back as floats
            return match raw.parse::<i64>() {
                Ok(value) => Some(Self::Int(value)),
                Err(_) => raw.parse::<f64>().ok().map(Self::Float),
            };
        }
        if FLOAT_RE.is_match(raw) {
            // A leading or trailing dot is fine for f64::from_str
            return raw.parse::<f64>().ok().map(Self::Float);
        }
        if raw.starts_with('"') {
            return Some(Self::Text(strip_quotes(raw).to_string()));
        }

        tracing::warn!("Cannot parse overlay value: {raw}");
        None
    }

    /// Returns the boolean payload, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns a numeric payload as `f64`.
    ///
    /// Integers widen to floats: `1.0` is written back as `1` and must still
    /// read as a number.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns a non-negative integer payload as a count.
    #[must_use]
    pub fn as_count(&self) -> Option<usize> {
        match self {
            Self::Int(value) => usize::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a quoted string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Short name of the value kind, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
        }
    }
}

/// Renders the value in config syntax. Strings are quoted verbatim.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "\"{value}\""),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<usize> for ConfigValue {
    #[allow(clippy::cast_possible_wrap)]
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Drops exactly the first and the last character.
fn strip_quotes(raw: &str) -> &str {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
