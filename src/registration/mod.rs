//! Interceptor registration from configuration.
//!
//! Hosts register a factory per interceptor name once at startup; the
//! configured plugin list then decides which interceptors are built, in
//! what order and with which properties.
//!
//! ```ignore
//! let mut registry = InterceptorRegistry::new();
//! registry
//!     .register("audit", || Box::new(Audit::default()))
//!     .register("slow_query_log", || Box::new(SlowQueryLog::default()));
//!
//! let chain = registry.build_chain(&Config::load(None)?)?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::config::{Config, PluginConfig};
use crate::plugin::{Interceptor, InterceptorChain, PluginError, Result};

/// Builds a fresh, unconfigured interceptor.
pub type InterceptorFactory = fn() -> Box<dyn Interceptor>;

/// Named interceptor factories.
#[derive(Default)]
pub struct InterceptorRegistry {
    factories: HashMap<String, InterceptorFactory>,
}

impl InterceptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, factory: InterceptorFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiate and configure one interceptor.
    ///
    /// `configure` runs exactly once, before the interceptor is shared.
    pub fn create(&self, plugin: &PluginConfig) -> Result<Arc<dyn Interceptor>> {
        let factory = self
            .factories
            .get(&plugin.interceptor)
            .ok_or_else(|| PluginError::UnknownInterceptor(plugin.interceptor.clone()))?;

        let mut interceptor = factory();
        interceptor.configure(&plugin.properties)?;
        Ok(Arc::from(interceptor))
    }

    /// Build a chain holding every configured plugin, in configuration order.
    ///
    /// With `eager_validation` set, every interceptor's signatures are
    /// resolved before returning.
    pub fn build_chain(&self, config: &Config) -> Result<InterceptorChain> {
        let mut chain = InterceptorChain::new();
        for plugin in &config.plugins {
            let interceptor = self.create(plugin)?;
            info!(
                interceptor = %plugin.interceptor,
                properties = plugin.properties.len(),
                "Registered interceptor"
            );
            chain.append(interceptor);
        }

        if config.eager_validation {
            chain.validate()?;
        }
        Ok(chain)
    }
}
