//! Objects that can be wrapped.

use std::any::Any;

use super::error::BoxError;
use super::invocation::{downcast, Args, CallResult};
use super::signature::{Interface, Method};

/// Describes the concrete type behind a [`Target`].
///
/// `interfaces` lists what the type realizes directly; `parent` links to the
/// type it builds on, whose interfaces it realizes as well.
///
/// ```ignore
/// static BASE_EXECUTOR: TypeDescriptor = TypeDescriptor {
///     name: "BaseExecutor",
///     interfaces: &[&EXECUTOR],
///     parent: None,
/// };
///
/// static REUSE_EXECUTOR: TypeDescriptor = TypeDescriptor {
///     name: "ReuseExecutor",
///     interfaces: &[],
///     parent: Some(&BASE_EXECUTOR),
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor<'a> {
    pub name: &'a str,
    pub interfaces: &'a [&'static Interface],
    pub parent: Option<&'static TypeDescriptor<'static>>,
}

impl<'a> TypeDescriptor<'a> {
    /// Every interface this type realizes, at any depth of the type and
    /// interface hierarchies, each listed once in discovery order.
    pub fn all_interfaces(&self) -> Vec<&'static Interface> {
        let mut found: Vec<&'static Interface> = Vec::new();
        let mut level: Option<TypeDescriptor<'a>> = Some(*self);
        while let Some(descriptor) = level {
            for interface in descriptor.interfaces {
                collect(*interface, &mut found);
            }
            level = descriptor.parent.copied();
        }
        found
    }

    /// Whether this type realizes the named interface anywhere in its
    /// hierarchy.
    pub fn realizes(&self, interface: &str) -> bool {
        self.all_interfaces()
            .iter()
            .any(|realized| realized.name == interface)
    }
}

fn collect(interface: &'static Interface, found: &mut Vec<&'static Interface>) {
    if found.iter().any(|seen| *seen == interface) {
        return;
    }
    found.push(interface);
    for parent in interface.extends {
        collect(*parent, found);
    }
}

/// An object whose methods are reachable through one dispatch entry point.
///
/// Implemented by the concrete components a host builds and by the
/// wrappers this crate produces, so wrappers nest.
pub trait Target: Send + Sync {
    fn type_descriptor(&self) -> TypeDescriptor<'_>;

    /// Call `method` with `args`.
    ///
    /// Implementations return the method's own failures boxed, and a
    /// [`DispatchError`](super::DispatchError) for methods they do not
    /// implement or arguments of the wrong type.
    fn invoke(&self, method: &Method, args: Args) -> CallResult;
}

impl dyn Target {
    /// Call `method` and downcast its result to `R`.
    pub fn call<R: Any>(&self, method: &Method, args: Args) -> Result<R, BoxError> {
        let value = self.invoke(method, args)?;
        Ok(downcast::<R>(value)?)
    }
}
