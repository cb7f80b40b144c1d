//! Application configuration.
//!
//! This module manages configuration with sensible defaults, loading from a
//! YAML file on top of the built-in values. Environment and command-line
//! overrides are applied by the caller.

use crate::error::{HubTagsError, Result};
use config::{Config as ConfigRs, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;


/// Registry queried when nothing else is configured.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.hub.docker.com";

/// Architecture labels hidden from summaries unless `--all-archs` is given.
pub const DEFAULT_EXCLUDED_ARCHITECTURES: &[&str] = &[
    "386:l",
    "arm/v5:l",
    "arm/v6:l",
    "mips64le:l",
    "ppc64le:l",
    "riscv64:l",
    "s390x:l",
    "unknown:u",
];

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub registry: Registry,
    #[serde(default)]
    pub network: Network,
    #[serde(default)]
    pub output: Output,
}

impl Config {
    /// Parses a `Config` from a YAML string.
    ///
    /// This function is primarily used for testing.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder()
            .add_source(ConfigRs::try_from(&Config::default())?)
            .add_source(File::from_str(s, FileFormat::Yaml));

        Self::from_builder(builder, None)
    }

    /// Loads a `Config` from an optional file path.
    ///
    /// Without a path the built-in defaults are returned. A path that does
    /// not exist is an error; callers probing a default location should
    /// check for the file first.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigRs::builder().add_source(ConfigRs::try_from(&Config::default())?);

        if let Some(p) = path {
            builder = builder.add_source(File::from(p).format(FileFormat::Yaml).required(true));
        }

        Self::from_builder(builder, path)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<&Path>,
    ) -> Result<Self> {
        let config: Self = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                HubTagsError::config_with_source(
                    "Failed to deserialize configuration".to_string(),
                    path.map(|p| p.display().to_string()),
                    e,
                )
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.registry.url.trim().is_empty() {
            return Err(HubTagsError::config("registry.url cannot be empty", None));
        }
        if self.network.timeout == 0 {
            return Err(HubTagsError::config(
                "network.timeout must be at least 1 second",
                None,
            ));
        }
        Ok(())
    }
}

/// Registry settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registry {
    #[serde(default = "default_registry_url")]
    pub url: String,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
        }
    }
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

/// Network settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    /// Request timeout in seconds
    #[serde(default = "default_network_timeout")]
    pub timeout: u64,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            timeout: default_network_timeout(),
        }
    }
}

fn default_network_timeout() -> u64 {
    30
}

/// Report settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Output {
    /// Report selector used when `--report` is not given
    #[serde(default = "default_report")]
    pub report: String,

    #[serde(default = "default_excluded_architectures")]
    pub exclude_architectures: Vec<String>,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            report: default_report(),
            exclude_architectures: default_excluded_architectures(),
        }
    }
}

fn default_report() -> String {
    "brief".to_string()
}

fn default_excluded_architectures() -> Vec<String> {
    DEFAULT_EXCLUDED_ARCHITECTURES
        .iter()
        .map(|s| s.to_string())
        .collect()
}
