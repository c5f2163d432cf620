//! Tagged configuration values.
//!
//! Source files hold free-form text; a [`Value`] records what the loader
//! made of each entry so callers get typed access instead of ad-hoc string
//! handling.

use serde::{Deserialize, Serialize};

/// Lower-cased string forms recognised as true by [`Value::truthiness`].
const TRUTHY_TOKENS: [&str; 4] = ["yes", "true", "on", "1"];

/// A single configuration value.
///
/// Integer coercion is best-effort: anything that parses as a signed base-10
/// integer becomes [`Value::Int`]; everything else keeps its source type.
/// JSON values with no dedicated variant (floats, null, arrays, nested
/// objects) are carried opaquely in [`Value::Other`] — nested objects are
/// not expanded into nested namespaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A native boolean (only produced by JSON sources).
    Bool(bool),
    /// A value that looked like a base-10 integer.
    Int(i64),
    /// Plain text.
    Str(String),
    /// Any other JSON-native value, kept as-is.
    Other(serde_json::Value),
}

impl Value {
    /// Best-effort conversion of raw text into a typed value.
    ///
    /// # Examples
    ///
    /// ```
    /// use flexconf::Value;
    ///
    /// assert_eq!(Value::coerce("30"), Value::Int(30));
    /// assert_eq!(Value::coerce("-7"), Value::Int(-7));
    /// assert_eq!(Value::coerce("localhost"), Value::Str("localhost".into()));
    /// ```
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Str(raw.to_owned()), Self::Int)
    }

    /// Convert a parsed JSON value, applying integer coercion to integral
    /// numbers and integer-lookalike strings.
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(ref n) => {
                n.as_i64().map_or_else(|| Self::Other(json), Self::Int)
            }
            serde_json::Value::String(s) => Self::coerce(&s),
            other => Self::Other(other),
        }
    }

    /// The value as text, if it is textual.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value as an integer, if it was coerced to one.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a native boolean, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Boolean interpretation used by `get_bool` lookups.
    ///
    /// Native booleans pass through unchanged. Strings are true iff their
    /// lower-cased form is one of `yes`, `true`, `on` or `1`. `Int(1)` is
    /// true because a literal `"1"` in a source file arrives here through
    /// integer coercion. Everything else is false; this never fails.
    #[must_use]
    pub fn truthiness(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n == 1,
            Self::Str(s) => {
                let lowered = s.to_lowercase();
                TRUTHY_TOKENS.iter().any(|t| *t == lowered)
            }
            Self::Other(_) => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
