//! Async client for the Unity skills REST server
//!
//! Every operation performs at most one HTTP round trip. Failures never
//! escape as `Err` from the dispatcher or listing: they are folded into
//! [`SkillResponse::Failed`] so callers always get a value to branch on.

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::SkillError;
use crate::manifest::{HealthInfo, SkillManifest};
use crate::params::{SkillParams, SkillRequest};
use crate::response::SkillResponse;

/// Default overall deadline for [`SkillClient::wait_for_unity`]
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default delay between health polls
pub const DEFAULT_WAIT_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct SkillClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl SkillClient {
    pub fn new(config: ClientConfig) -> Result<Self, SkillError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("unity-skills/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SkillError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Invoke a skill and return the decoded body, or the failure.
    pub async fn try_call_skill(
        &self,
        name: &str,
        params: &SkillParams,
    ) -> Result<Value, SkillError> {
        validate_skill_name(name)?;

        let url = self.config.endpoint(&format!("skill/{name}"));
        let timeout = self.config.skill_timeout;
        tracing::debug!(skill = name, url = %url, params = params.len(), "POST skill");

        let classify = |e: reqwest::Error| {
            SkillError::from_reqwest(e, "skill call", self.config.base_url(), timeout, true)
        };

        let response = self
            .http
            .post(&url)
            .timeout(timeout)
            .json(params)
            .send()
            .await
            .map_err(classify)?;

        // The body is the answer even on non-2xx; the server reports skill
        // failures as `{"status": "error"}` payloads.
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(skill = name, %status, "skill returned non-success status");
        }

        response.json::<Value>().await.map_err(classify)
    }

    /// Invoke a skill by name.
    pub async fn call_skill(&self, name: &str, params: &SkillParams) -> SkillResponse {
        let result = self.try_call_skill(name, params).await;
        if let Err(err) = &result {
            tracing::warn!(skill = name, error = %err, "skill call failed");
        }
        result.into()
    }

    pub async fn call(&self, request: &SkillRequest) -> SkillResponse {
        self.call_skill(&request.name, &request.params).await
    }

    /// List the skills the server exposes.
    ///
    /// Unlike [`call_skill`](Self::call_skill), connection refusal is reported
    /// with the plain transport description.
    pub async fn get_skills(&self) -> SkillResponse {
        self.try_get_skills().await.into()
    }

    async fn try_get_skills(&self) -> Result<Value, SkillError> {
        let url = self.config.endpoint("skills");
        let timeout = self.config.list_timeout;
        tracing::debug!(url = %url, "GET skills");

        let classify = |e: reqwest::Error| {
            SkillError::from_reqwest(e, "skill listing", self.config.base_url(), timeout, false)
        };

        let response = self
            .http
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;
        response.json::<Value>().await.map_err(classify)
    }

    /// The skill listing decoded into [`SkillManifest`].
    pub async fn manifest(&self) -> Result<SkillManifest, SkillError> {
        SkillManifest::from_value(self.try_get_skills().await?)
    }

    /// Detail from `/health`, or `None` when the server is not answering
    /// with a well-formed body.
    pub async fn health_info(&self) -> Option<HealthInfo> {
        let url = self.config.endpoint("health");
        let response = match self
            .http
            .get(&url)
            .timeout(self.config.health_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(url = %url, error = %err, "health probe failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(url = %url, status = %response.status(), "health probe rejected");
            return None;
        }
        response.json::<HealthInfo>().await.ok()
    }

    /// True only when `/health` answers with `"status": "ok"`.
    pub async fn health(&self) -> bool {
        self.health_info().await.is_some_and(|info| info.is_ok())
    }

    pub async fn is_unity_running(&self) -> bool {
        self.health().await
    }

    /// Poll [`health`](Self::health) until it succeeds or `timeout` elapses.
    ///
    /// Used after operations that trigger a domain reload, during which the
    /// Editor-side server is briefly gone. Polls at most
    /// `timeout / interval + 1` times.
    pub async fn wait_for_unity(&self, timeout: Duration, interval: Duration) -> bool {
        let start = Instant::now();
        let mut polls = 0u32;
        while start.elapsed() < timeout {
            polls += 1;
            if self.health().await {
                tracing::debug!(polls, elapsed = ?start.elapsed(), "Unity is available");
                return true;
            }
            let remaining = timeout.saturating_sub(start.elapsed());
            tokio::time::sleep(interval.min(remaining)).await;
        }
        tracing::debug!(polls, ?timeout, "gave up waiting for Unity");
        false
    }

    pub async fn create_cube(&self, x: f64, y: f64, z: f64, name: &str) -> SkillResponse {
        self.call(&self.config.dialect.create_cube(x, y, z, name)).await
    }

    pub async fn create_sphere(&self, x: f64, y: f64, z: f64, name: &str) -> SkillResponse {
        self.call(&self.config.dialect.create_sphere(x, y, z, name)).await
    }

    pub async fn set_object_color(
        &self,
        object_name: &str,
        r: f64,
        g: f64,
        b: f64,
    ) -> SkillResponse {
        let request = self.config.dialect.set_object_color(object_name, r, g, b);
        self.call(&request).await
    }

    pub async fn delete_object(&self, object_name: &str) -> SkillResponse {
        self.call(&self.config.dialect.delete_object(object_name)).await
    }

    pub async fn get_scene_info(&self) -> SkillResponse {
        self.call(&self.config.dialect.get_scene_info()).await
    }

    pub async fn find_objects_by_tag(&self, tag: &str) -> SkillResponse {
        self.call(&self.config.dialect.find_objects_by_tag(tag)).await
    }
}

/// Skill names end up as a URL path segment.
fn validate_skill_name(name: &str) -> Result<(), SkillError> {
    let bad_char = |c: char| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%');
    if name.is_empty() || name.chars().any(bad_char) {
        return Err(SkillError::InvalidSkillName(name.to_string()));
    }
    Ok(())
}
