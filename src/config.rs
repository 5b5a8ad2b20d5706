//! Configuration for the scorer.
//!
//! - Check exclusion
//! - Relaxed resource limits
//! - Failure threshold

use crate::error::ConfigError;
use crate::types::Grade;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreConfig {
    /// Keys of checks to skip (e.g. "container-image-pull-policy").
    #[serde(default)]
    pub ignore_tests: Vec<String>,

    /// Do not require containers to set a CPU limit.
    #[serde(default)]
    pub ignore_container_cpu_limit: bool,

    /// Do not require containers to set a memory limit.
    #[serde(default)]
    pub ignore_container_memory_limit: bool,

    /// Grades at or below this count as failures.
    #[serde(default)]
    pub failure_threshold: Grade,

    /// If true, never report failure.
    #[serde(default)]
    pub no_fail: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            ignore_tests: Vec::new(),
            ignore_container_cpu_limit: false,
            ignore_container_memory_limit: false,
            failure_threshold: Grade::Critical,
            no_fail: false,
        }
    }
}

impl ScoreConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip a check.
    pub fn ignore_test(mut self, key: impl Into<String>) -> Self {
        self.ignore_tests.push(key.into());
        self
    }

    /// Set the failure threshold.
    pub fn with_threshold(mut self, threshold: Grade) -> Self {
        self.failure_threshold = threshold;
        self
    }

    /// Stop requiring CPU limits.
    pub fn without_cpu_limit(mut self) -> Self {
        self.ignore_container_cpu_limit = true;
        self
    }

    /// Stop requiring memory limits.
    pub fn without_memory_limit(mut self) -> Self {
        self.ignore_container_memory_limit = true;
        self
    }

    /// Check if a check is excluded.
    pub fn is_test_ignored(&self, key: &str) -> bool {
        self.ignore_tests.iter().any(|t| t == key)
    }

    /// Load configuration from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::load_from_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Try to load config from default locations (.kube-score.yaml, .kube-score.yml).
    pub fn load_from_default() -> Option<Self> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load config from the default file names inside `dir`.
    pub fn load_from_dir(dir: &Path) -> Option<Self> {
        for filename in &[".kube-score.yaml", ".kube-score.yml"] {
            let path = dir.join(filename);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Some(config),
                    Err(e) => log::warn!("ignoring {}: {}", path.display(), e),
                }
            }
        }
        None
    }
}
