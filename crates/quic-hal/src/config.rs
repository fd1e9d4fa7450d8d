//! Backend configuration.
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables (`QUIC_` prefix)
//! 2. Configuration file (YAML)
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use quic_compile::SynthesisOptions;

use crate::error::{HalError, HalResult};
use crate::job::RetrievalOptions;

/// Settings shared by every job a backend submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Shots used when a run does not ask for a count.
    #[serde(default = "default_shots")]
    pub default_shots: u32,

    /// Upper bound on shots per job.
    #[serde(default = "default_max_shots")]
    pub max_shots: u32,

    /// Seed of the backend PRNG that job seeds are drawn from.
    #[serde(default)]
    pub seed: u64,

    /// Depth handed to the synthesis pass.
    #[serde(default = "default_approximation")]
    pub approximation_depth: u32,

    /// Recursion degree handed to the synthesis pass.
    #[serde(default = "default_approximation")]
    pub approximation_recursion_degree: u32,

    /// Interval between status checks when polling for a result.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Give up waiting for a result after this many seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_shots() -> u32 {
    10
}

fn default_max_shots() -> u32 {
    4096
}

fn default_approximation() -> u32 {
    3
}

fn default_poll_interval_ms() -> u64 {
    5000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            default_shots: default_shots(),
            max_shots: default_max_shots(),
            seed: 0,
            approximation_depth: default_approximation(),
            approximation_recursion_degree: default_approximation(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: None,
        }
    }
}

impl BackendConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> HalResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)
            .map_err(|e| HalError::Configuration(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HalResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            HalError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Load from an optional file, then apply `QUIC_*` environment overrides.
    pub fn load(config_file: Option<&Path>) -> HalResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn merge_env(self) -> Self {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`.
    ///
    /// Only variables that are present override; values that fail to parse
    /// are logged and ignored.
    pub fn merge_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
            let parsed = value.trim().parse().ok();
            if parsed.is_none() {
                warn!(key, value, "Ignoring unparsable environment override");
            }
            parsed
        }

        if let Some(val) = lookup("QUIC_DEFAULT_SHOTS").and_then(|v| parse("QUIC_DEFAULT_SHOTS", &v)) {
            self.default_shots = val;
        }
        if let Some(val) = lookup("QUIC_MAX_SHOTS").and_then(|v| parse("QUIC_MAX_SHOTS", &v)) {
            self.max_shots = val;
        }
        if let Some(val) = lookup("QUIC_SEED").and_then(|v| parse("QUIC_SEED", &v)) {
            self.seed = val;
        }
        if let Some(val) =
            lookup("QUIC_POLL_INTERVAL_MS").and_then(|v| parse("QUIC_POLL_INTERVAL_MS", &v))
        {
            self.poll_interval_ms = val;
        }
        if let Some(val) = lookup("QUIC_TIMEOUT_SECS").and_then(|v| parse("QUIC_TIMEOUT_SECS", &v)) {
            self.timeout_secs = Some(val);
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> HalResult<()> {
        if self.max_shots == 0 {
            return Err(HalError::Configuration("max_shots must be positive".into()));
        }
        if !(1..=self.max_shots).contains(&self.default_shots) {
            return Err(HalError::Configuration(format!(
                "default_shots {} must be between 1 and max_shots {}",
                self.default_shots, self.max_shots
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(HalError::Configuration("poll_interval_ms must be positive".into()));
        }
        self.synthesis_options().validate()?;
        Ok(())
    }

    /// Options for the synthesis pass.
    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            depth: self.approximation_depth,
            recursion_degree: self.approximation_recursion_degree,
        }
    }

    /// Options for [`Job::result`](crate::Job::result).
    pub fn retrieval_options(&self) -> RetrievalOptions {
        RetrievalOptions {
            timeout: self.timeout_secs.map(Duration::from_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}
