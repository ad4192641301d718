//! Unity Skills Core Library
//!
//! Client for the REST server a Unity Editor exposes for invoking named
//! skills: dispatch, listing, health probing and a small set of convenience
//! wrappers over the two known wire dialects.

pub mod blocking;
pub mod client;
pub mod config;
pub mod dialect;
pub mod error;
pub mod manifest;
pub mod params;
pub mod response;

/// Re-exports of commonly used types
pub mod prelude {
    // Client
    pub use crate::blocking::BlockingSkillClient;
    pub use crate::client::{DEFAULT_WAIT_INTERVAL, DEFAULT_WAIT_TIMEOUT, SkillClient};

    // Configuration
    pub use crate::config::{ClientConfig, ConfigFile};
    pub use crate::dialect::Dialect;

    // Requests and responses
    pub use crate::error::SkillError;
    pub use crate::manifest::{HealthInfo, SkillInfo, SkillManifest, SkillParameter};
    pub use crate::params::{ParamValue, SkillParams, SkillRequest};
    pub use crate::response::SkillResponse;
}
