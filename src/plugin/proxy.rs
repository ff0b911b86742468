//! Wrappers that route selected calls through an interceptor.

use std::sync::Arc;

use super::error::{DispatchError, Result};
use super::interceptor::Interceptor;
use super::invocation::{Args, CallResult, Invocation};
use super::signature::{Interface, Method, SignatureMap};
use super::target::{Target, TypeDescriptor};

/// Wrap `target` with `interceptor`.
///
/// Returns `target` itself when the interceptor declares nothing against
/// any interface the target realizes. Otherwise returns a [`Plugin`]
/// exposing exactly the covered interfaces.
///
/// # Errors
///
/// [`PluginError::MethodNotFound`](super::PluginError::MethodNotFound) if
/// any declared signature does not resolve.
pub fn wrap(target: Arc<dyn Target>, interceptor: Arc<dyn Interceptor>) -> Result<Arc<dyn Target>> {
    let signature_map = Arc::new(SignatureMap::resolve(interceptor.as_ref())?);
    Ok(Plugin::wrap_resolved(target, interceptor, signature_map))
}

/// Wrapper standing in for a target on behalf of one interceptor.
///
/// Calls to intercepted methods become an [`Invocation`] handed to the
/// interceptor; every other call on an exposed interface goes straight to
/// the wrapped target.
pub struct Plugin {
    target: Arc<dyn Target>,
    interceptor: Arc<dyn Interceptor>,
    signature_map: Arc<SignatureMap>,
    type_name: String,
    interfaces: Vec<&'static Interface>,
}

impl Plugin {
    /// Wrap with an already-resolved signature map.
    pub fn wrap_resolved(
        target: Arc<dyn Target>,
        interceptor: Arc<dyn Interceptor>,
        signature_map: Arc<SignatureMap>,
    ) -> Arc<dyn Target> {
        let interfaces = covered_interfaces(target.type_descriptor(), &signature_map);
        if interfaces.is_empty() {
            return target;
        }

        let type_name = format!("Plugin<{}>", target.type_descriptor().name);
        Arc::new(Self {
            target,
            interceptor,
            signature_map,
            type_name,
            interfaces,
        })
    }

    /// The wrapped object, which may itself be a wrapper.
    pub fn target(&self) -> &Arc<dyn Target> {
        &self.target
    }

    pub fn interceptor(&self) -> &Arc<dyn Interceptor> {
        &self.interceptor
    }

    fn exposes(&self, method: &Method) -> bool {
        self.interfaces
            .iter()
            .any(|interface| interface.is_or_extends(method.interface()))
    }

    fn intercepts(&self, method: &Method) -> bool {
        self.interfaces
            .iter()
            .any(|interface| self.signature_map.intercepts(interface.name, method))
    }
}

impl Target for Plugin {
    fn type_descriptor(&self) -> TypeDescriptor<'_> {
        TypeDescriptor {
            name: &self.type_name,
            interfaces: &self.interfaces,
            parent: None,
        }
    }

    fn invoke(&self, method: &Method, args: Args) -> CallResult {
        if !self.exposes(method) {
            return Err(DispatchError::NotExposed {
                type_name: self.type_name.clone(),
                interface: method.interface(),
                method: method.name(),
            }
            .into());
        }

        if self.intercepts(method) {
            let invocation = Invocation::new(Arc::clone(&self.target), *method, args);
            return self.interceptor.intercept(invocation);
        }

        self.target.invoke(method, args)
    }
}

/// Interfaces realized anywhere in the target's hierarchy that the
/// signature map covers.
fn covered_interfaces(
    descriptor: TypeDescriptor<'_>,
    signature_map: &SignatureMap,
) -> Vec<&'static Interface> {
    descriptor
        .all_interfaces()
        .into_iter()
        .filter(|interface| signature_map.covers(interface.name))
        .collect()
}
