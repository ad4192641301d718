//! Synchronous facade over [`SkillClient`]
//!
//! Owns a current-thread tokio runtime and blocks on each call. Must not be
//! used from inside another async runtime.

use std::time::Duration;

use serde_json::Value;

use crate::client::SkillClient;
use crate::config::ClientConfig;
use crate::error::SkillError;
use crate::manifest::{HealthInfo, SkillManifest};
use crate::params::{SkillParams, SkillRequest};
use crate::response::SkillResponse;

#[derive(Debug)]
pub struct BlockingSkillClient {
    inner: SkillClient,
    runtime: tokio::runtime::Runtime,
}

impl BlockingSkillClient {
    pub fn new(config: ClientConfig) -> Result<Self, SkillError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SkillError::Runtime(e.to_string()))?;

        let inner = {
            let _guard = runtime.enter();
            SkillClient::new(config)?
        };
        Ok(Self { inner, runtime })
    }

    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    pub fn try_call_skill(&self, name: &str, params: &SkillParams) -> Result<Value, SkillError> {
        self.runtime.block_on(self.inner.try_call_skill(name, params))
    }

    pub fn call_skill(&self, name: &str, params: &SkillParams) -> SkillResponse {
        self.runtime.block_on(self.inner.call_skill(name, params))
    }

    pub fn call(&self, request: &SkillRequest) -> SkillResponse {
        self.runtime.block_on(self.inner.call(request))
    }

    pub fn get_skills(&self) -> SkillResponse {
        self.runtime.block_on(self.inner.get_skills())
    }

    pub fn manifest(&self) -> Result<SkillManifest, SkillError> {
        self.runtime.block_on(self.inner.manifest())
    }

    pub fn health_info(&self) -> Option<HealthInfo> {
        self.runtime.block_on(self.inner.health_info())
    }

    pub fn health(&self) -> bool {
        self.runtime.block_on(self.inner.health())
    }

    pub fn is_unity_running(&self) -> bool {
        self.health()
    }

    pub fn wait_for_unity(&self, timeout: Duration, interval: Duration) -> bool {
        self.runtime.block_on(self.inner.wait_for_unity(timeout, interval))
    }

    pub fn create_cube(&self, x: f64, y: f64, z: f64, name: &str) -> SkillResponse {
        self.runtime.block_on(self.inner.create_cube(x, y, z, name))
    }

    pub fn create_sphere(&self, x: f64, y: f64, z: f64, name: &str) -> SkillResponse {
        self.runtime.block_on(self.inner.create_sphere(x, y, z, name))
    }

    pub fn set_object_color(&self, object_name: &str, r: f64, g: f64, b: f64) -> SkillResponse {
        let call = self.inner.set_object_color(object_name, r, g, b);
        self.runtime.block_on(call)
    }

    pub fn delete_object(&self, object_name: &str) -> SkillResponse {
        self.runtime.block_on(self.inner.delete_object(object_name))
    }

    pub fn get_scene_info(&self) -> SkillResponse {
        self.runtime.block_on(self.inner.get_scene_info())
    }

    pub fn find_objects_by_tag(&self, tag: &str) -> SkillResponse {
        self.runtime.block_on(self.inner.find_objects_by_tag(tag))
    }
}
