//! Plugin configuration.
//!
//! Describes which interceptors to register, in what order, and with which
//! properties. Loaded from YAML files and environment variables:
//!
//! ```yaml
//! eager_validation: true
//! plugins:
//!   - interceptor: audit
//!   - interceptor: slow_query_log
//!     properties:
//!       threshold_ms: "250"
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use tracing::info;

use crate::plugin::Result;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "weave.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "WEAVE_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "WEAVE";

/// Interceptor configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interceptors in registration order. The last one is outermost.
    pub plugins: Vec<PluginConfig>,
    /// Resolve every interceptor's signatures when the chain is built,
    /// instead of on first use.
    pub eager_validation: bool,
}

/// One interceptor to register.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginConfig {
    /// Registered factory name.
    pub interceptor: String,
    /// Settings passed to the interceptor's `configure`.
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl PluginConfig {
    pub fn new(interceptor: impl Into<String>) -> Self {
        Self {
            interceptor: interceptor.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `DEFAULT_CONFIG_FILE` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config: Config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        info!(
            plugins = config.plugins.len(),
            eager_validation = config.eager_validation,
            "Loaded plugin configuration"
        );
        Ok(config)
    }

    /// Parse configuration from an in-memory YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        use ::config::{Config as ConfigLib, File, FileFormat};

        let config = ConfigLib::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}
