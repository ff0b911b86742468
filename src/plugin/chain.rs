//! Ordered composition of interceptors.

use std::sync::{Arc, OnceLock};

use tracing::{debug, error};

use super::error::Result;
use super::interceptor::Interceptor;
use super::proxy::Plugin;
use super::signature::SignatureMap;
use super::target::Target;

/// Append-only, ordered list of interceptors.
///
/// Registration order is nesting order: the first interceptor wraps the
/// target directly and the last one is outermost, so it sees every call
/// first.
///
/// Assembled once during configuration, then shared read-only:
///
/// ```ignore
/// let mut chain = InterceptorChain::new();
/// chain.append(Arc::new(Audit::default()));
/// chain.append(Arc::new(SlowQueryLog::default()));
/// let chain = Arc::new(chain);
///
/// // per unit of work
/// let executor = chain.apply_all(Arc::new(SimpleExecutor::new(tx)))?;
/// ```
#[derive(Default)]
pub struct InterceptorChain {
    entries: Vec<ChainEntry>,
}

struct ChainEntry {
    interceptor: Arc<dyn Interceptor>,
    signature_map: OnceLock<Arc<SignatureMap>>,
}

impl ChainEntry {
    /// Resolved signatures, computed on first use and cached on success.
    fn signature_map(&self) -> Result<Arc<SignatureMap>> {
        if let Some(map) = self.signature_map.get() {
            return Ok(Arc::clone(map));
        }

        let map = SignatureMap::resolve(self.interceptor.as_ref()).map_err(|e| {
            error!(interceptor = %self.interceptor.name(), error = %e, "Signature resolution failed");
            e
        })?;
        debug!(interceptor = %self.interceptor.name(), "Resolved interceptor signatures");
        Ok(Arc::clone(self.signature_map.get_or_init(|| Arc::new(map))))
    }
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor after every interceptor already registered.
    ///
    /// No deduplication: appending the same interceptor twice wraps twice.
    pub fn append(&mut self, interceptor: Arc<dyn Interceptor>) {
        debug!(
            interceptor = %interceptor.name(),
            position = self.entries.len(),
            "Appending interceptor"
        );
        self.entries.push(ChainEntry {
            interceptor,
            signature_map: OnceLock::new(),
        });
    }

    /// Wrap `target` with every interceptor, in registration order.
    ///
    /// Equivalent to `wrap(...wrap(wrap(target, first), second)..., last)`.
    /// Interceptors that cover nothing on the current object leave it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`PluginError::MethodNotFound`](super::PluginError::MethodNotFound)
    /// for the first interceptor whose signatures do not resolve. No
    /// interceptor logic has run when this is returned.
    pub fn apply_all(&self, target: Arc<dyn Target>) -> Result<Arc<dyn Target>> {
        let mut observable = target;
        for entry in &self.entries {
            let signature_map = entry.signature_map()?;
            observable =
                Plugin::wrap_resolved(observable, Arc::clone(&entry.interceptor), signature_map);
        }
        Ok(observable)
    }

    /// Registered interceptors, in registration order.
    pub fn list(&self) -> Vec<Arc<dyn Interceptor>> {
        self.entries
            .iter()
            .map(|entry| Arc::clone(&entry.interceptor))
            .collect()
    }

    /// Resolve every interceptor's signatures now rather than on first
    /// [`apply_all`](Self::apply_all).
    pub fn validate(&self) -> Result<()> {
        for entry in &self.entries {
            entry.signature_map()?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
