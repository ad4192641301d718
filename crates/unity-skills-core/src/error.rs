//! Client-side failures when talking to the Unity skills server.

use std::time::Duration;

/// Remediation shown when the Editor-side REST server cannot be reached.
pub const UNITY_NOT_RUNNING: &str =
    "Unity not running. Start REST server in Unity: Window > UnitySkills > Start REST Server";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkillError {
    /// Nothing is listening at the base URL.
    #[error("{}", UNITY_NOT_RUNNING)]
    Unreachable { base_url: String },

    #[error("{} timed out after {}s", .operation, .after.as_secs_f64())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("{0}")]
    Request(String),

    #[error("invalid JSON response: {0}")]
    Decode(String),

    #[error("invalid skill name: {0:?}")]
    InvalidSkillName(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to start async runtime: {0}")]
    Runtime(String),
}

impl SkillError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Classify a transport error.
    ///
    /// Only the dispatcher singles out connection refusal; other callers
    /// pass `distinguish_unreachable = false` and get the raw description.
    pub(crate) fn from_reqwest(
        err: reqwest::Error,
        operation: &'static str,
        base_url: &str,
        timeout: Duration,
        distinguish_unreachable: bool,
    ) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                operation,
                after: timeout,
            }
        } else if distinguish_unreachable && err.is_connect() {
            Self::Unreachable {
                base_url: base_url.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_message_guides_operator() {
        let err = SkillError::Unreachable {
            base_url: "http://localhost:8090".to_string(),
        };
        assert!(err.is_unreachable());
        assert!(err.to_string().starts_with("Unity not running"));
        assert!(err.to_string().contains("Start REST Server"));
    }

    #[test]
    fn timeout_message_names_operation() {
        let err = SkillError::Timeout {
            operation: "skill call",
            after: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "skill call timed out after 30s");
        assert!(!err.is_unreachable());
    }
}
