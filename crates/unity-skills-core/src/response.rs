//! Uniform result of a skill call or listing

use serde_json::{Value, json};

use crate::error::SkillError;

/// Either the server's decoded JSON body, passed through untouched, or a
/// client-side failure.
///
/// A `Reply` may still carry `"status": "error"` if the skill itself failed;
/// callers branch on [`SkillResponse::is_ok`] or the rendered `status`.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillResponse {
    Reply(Value),
    Failed(SkillError),
}

impl SkillResponse {
    /// The `status` field as the caller will see it.
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Reply(body) => body.get("status").and_then(Value::as_str),
            Self::Failed(_) => Some("error"),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status() == Some("ok")
    }

    /// Server reported error message, or the client-side failure message.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Reply(body) => body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string),
            Self::Failed(err) => Some(err.to_string()),
        }
    }

    /// The skill-defined `result` payload, if the server sent one.
    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::Reply(body) => body.get("result"),
            Self::Failed(_) => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Failed(err) if err.is_unreachable())
    }

    /// Render as the `{status, result | error}` mapping.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Reply(body) => body.clone(),
            Self::Failed(err) => json!({ "status": "error", "error": err.to_string() }),
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            Self::Reply(body) => body,
            failed @ Self::Failed(_) => failed.to_json(),
        }
    }
}

impl From<Result<Value, SkillError>> for SkillResponse {
    fn from(result: Result<Value, SkillError>) -> Self {
        match result {
            Ok(body) => Self::Reply(body),
            Err(err) => Self::Failed(err),
        }
    }
}

impl From<SkillResponse> for Value {
    fn from(response: SkillResponse) -> Self {
        response.into_json()
    }
}
