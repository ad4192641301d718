//! Skill request payloads
//!
//! A request is a skill name plus a flat map of scalar parameters. The map
//! serializes directly as the JSON body of `POST /skill/<name>`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    /// Numeric value that is sent as a JSON integer when it has no
    /// fractional part.
    pub fn number(value: f64) -> Self {
        match as_integral(value) {
            Some(int) => Self::Int(int),
            None => Self::Float(value),
        }
    }

    /// Coerce a command-line value.
    ///
    /// Anything that parses as a finite float becomes a number (collapsed to
    /// an integer when integral); everything else stays a string.
    ///
    /// ```
    /// use unity_skills_core::params::ParamValue;
    ///
    /// assert_eq!(ParamValue::coerce("3"), ParamValue::Int(3));
    /// assert_eq!(ParamValue::coerce("3.5"), ParamValue::Float(3.5));
    /// assert_eq!(ParamValue::coerce("Cube"), ParamValue::Str("Cube".into()));
    /// ```
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Self::number(value),
            _ => Self::Str(raw.to_string()),
        }
    }
}

fn as_integral(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    if value.is_finite() && value.fract() == 0.0 && in_range {
        Some(value as i64)
    } else {
        None
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Parameter map sent as the JSON request body
pub type SkillParams = BTreeMap<String, ParamValue>;

/// A named skill invocation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkillRequest {
    pub name: String,
    pub params: SkillParams,
}

impl SkillRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: SkillParams::new(),
        }
    }

    /// Builder-style parameter insertion; later values replace earlier ones.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Parse `key=value` arguments into a request.
    ///
    /// Arguments without `=` are skipped. Only the first `=` separates key
    /// from value, so `expr=a=b` yields the value `a=b`.
    pub fn from_pairs<I, S>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut request = Self::new(name);
        for pair in pairs {
            let Some((key, value)) = pair.as_ref().split_once('=') else {
                tracing::debug!(arg = pair.as_ref(), "ignoring argument without '='");
                continue;
            };
            request
                .params
                .insert(key.to_string(), ParamValue::coerce(value));
        }
        request
    }
}
