//! Client configuration
//!
//! Resolved once at startup, lowest to highest precedence: built-in
//! defaults, `config.toml`, environment, explicit overrides (CLI flags).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::dialect::Dialect;
use crate::error::SkillError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8090";
pub const DEFAULT_SKILL_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

pub const ENV_URL: &str = "UNITY_SKILLS_URL";
pub const ENV_DIALECT: &str = "UNITY_SKILLS_DIALECT";

/// Settings the client is constructed with
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    base_url: String,
    pub dialect: Dialect,
    pub skill_timeout: Duration,
    pub list_timeout: Duration,
    pub health_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, SkillError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, SkillError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Apply a parsed config file on top of the current values.
    pub fn merge_file(mut self, file: &ConfigFile) -> Result<Self, SkillError> {
        if let Some(url) = &file.base_url {
            self.base_url = parse_base_url(url)?;
        }
        if let Some(dialect) = file.dialect {
            self.dialect = dialect;
        }
        if let Some(secs) = file.skill_timeout_secs {
            self.skill_timeout = timeout_from_secs("skill_timeout_secs", secs)?;
        }
        if let Some(secs) = file.list_timeout_secs {
            self.list_timeout = timeout_from_secs("list_timeout_secs", secs)?;
        }
        if let Some(secs) = file.health_timeout_secs {
            self.health_timeout = timeout_from_secs("health_timeout_secs", secs)?;
        }
        Ok(self)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Takes a lookup function rather than reading the process environment
    /// so callers (and tests) decide where values come from.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, SkillError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = parse_base_url(&url)?;
        }
        if let Some(dialect) = lookup(ENV_DIALECT).filter(|v| !v.trim().is_empty()) {
            self.dialect = dialect.parse().map_err(SkillError::Config)?;
        }
        Ok(self)
    }

    /// Defaults, then the config file (if any), then the process environment.
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        let mut config = Self::default();
        if let Some(path) = path {
            if let Some(file) = ConfigFile::load(&path)? {
                tracing::debug!(path = %path.display(), "loaded config file");
                config = config.merge_file(&file)?;
            }
        }
        config
            .merge_env(|key| std::env::var(key).ok())
            .map_err(Into::into)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dialect: Dialect::default(),
            skill_timeout: DEFAULT_SKILL_TIMEOUT,
            list_timeout: DEFAULT_LIST_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }
}

/// Validate a base URL and strip its trailing slash.
fn parse_base_url(raw: &str) -> Result<String, SkillError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| SkillError::Config(format!("invalid base URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_string()),
        other => Err(SkillError::Config(format!(
            "unsupported scheme '{other}' in base URL '{raw}'"
        ))),
    }
}

fn timeout_from_secs(key: &str, secs: f64) -> Result<Duration, SkillError> {
    Duration::try_from_secs_f64(secs)
        .map_err(|e| SkillError::Config(format!("{key} = {secs} is not a usable timeout: {e}")))
}

/// `<config_dir>/unity-skills/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("unity-skills").join("config.toml"))
}

/// On-disk shape of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_timeout_secs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_timeout_secs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_timeout_secs: Option<f64>,
}

impl ConfigFile {
    /// Load a config file; a missing file is not an error.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let file = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(Some(file))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let file: Self = toml::from_str(content).map_err(|e| enhance_toml_error(&e, content))?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let timeouts = [
            ("skill_timeout_secs", self.skill_timeout_secs),
            ("list_timeout_secs", self.list_timeout_secs),
            ("health_timeout_secs", self.health_timeout_secs),
        ];
        for (key, value) in timeouts {
            if let Some(secs) = value {
                if !secs.is_finite() || secs <= 0.0 {
                    anyhow::bail!("{key} must be a positive number of seconds, got {secs}");
                }
            }
        }
        Ok(())
    }
}

/// Attach the offending line to a TOML parse error.
fn enhance_toml_error(error: &toml::de::Error, content: &str) -> anyhow::Error {
    let Some(span) = error.span() else {
        return anyhow::anyhow!("TOML parsing error: {}", error.message());
    };
    let line_num = content[..span.start.min(content.len())].matches('\n').count() + 1;
    let line = content.lines().nth(line_num - 1).unwrap_or_default();
    anyhow::anyhow!(
        "TOML parsing error at line {}:\n>>> {:4} | {}\n\nError: {}",
        line_num,
        line_num,
        line,
        error.message()
    )
}
