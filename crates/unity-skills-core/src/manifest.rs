//! Typed views over the `/skills` and `/health` bodies
//!
//! The raw listing is passed through untouched by `get_skills`; these types
//! exist for callers that want to iterate skills without poking at JSON.
//! Unknown fields are ignored so newer servers keep parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SkillError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillManifest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub parameters: Vec<SkillParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillParameter {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: Option<String>,
}

impl SkillManifest {
    pub fn from_value(value: Value) -> Result<Self, SkillError> {
        serde_json::from_value(value).map_err(|e| SkillError::Decode(e.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|skill| skill.name.as_str())
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthInfo {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthInfo {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_server_manifest() {
        let manifest = SkillManifest::from_value(json!({
            "version": "1.0.0",
            "baseUrl": "http://localhost:8090/",
            "skills": [
                {
                    "name": "gameobject_create",
                    "description": "Create a new GameObject",
                    "endpoint": "POST /skill/gameobject_create",
                    "parameters": [
                        {"name": "name", "type": "string", "required": true, "defaultValue": null},
                        {"name": "x", "type": "number", "required": false, "defaultValue": "0"}
                    ]
                },
                {"name": "scene_get_info", "description": "Get scene info", "parameters": []}
            ]
        }))
        .unwrap();

        assert_eq!(manifest.version.as_deref(), Some("1.0.0"));
        assert_eq!(manifest.names().collect::<Vec<_>>(), ["gameobject_create", "scene_get_info"]);

        let create = &manifest.skills[0];
        assert!(create.parameters[0].required);
        assert!(!create.parameters[1].required);
        assert_eq!(create.parameters[1].kind.as_deref(), Some("number"));
        assert_eq!(create.parameters[1].default_value.as_deref(), Some("0"));
    }

    #[test]
    fn error_body_is_decode_error() {
        let result = SkillManifest::from_value(json!({"skills": "nope"}));
        assert!(matches!(result, Err(SkillError::Decode(_))));
    }

    #[test]
    fn health_info_ignores_extra_fields() {
        let info: HealthInfo = serde_json::from_value(json!({
            "status": "ok",
            "service": "UnitySkills",
            "version": "1.0.0",
            "uptime": 12
        }))
        .unwrap();
        assert!(info.is_ok());
        assert_eq!(info.service.as_deref(), Some("UnitySkills"));
    }
}
