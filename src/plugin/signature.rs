//! Interface descriptors, method identities and interceptor signatures.
//!
//! Interfaces are declared once as statics and referenced by everything
//! else:
//!
//! ```ignore
//! static CLOSE: Method = Method::new("Closeable", "close", &[]);
//! static CLOSEABLE: Interface = Interface {
//!     name: "Closeable",
//!     methods: &[&CLOSE],
//!     extends: &[],
//! };
//!
//! static QUERY: Method = Method::new("Executor", "query", &["String", "i64"]);
//! static EXECUTOR: Interface = Interface {
//!     name: "Executor",
//!     methods: &[&QUERY],
//!     extends: &[&CLOSEABLE],
//! };
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::error::{PluginError, Result};
use super::interceptor::Interceptor;

/// Identity of one callable method: declaring interface, name and
/// parameter type list.
///
/// Overloads that share a name but differ in parameters are distinct
/// methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Method {
    interface: &'static str,
    name: &'static str,
    params: &'static [&'static str],
}

impl Method {
    pub const fn new(
        interface: &'static str,
        name: &'static str,
        params: &'static [&'static str],
    ) -> Self {
        Self {
            interface,
            name,
            params,
        }
    }

    /// Name of the interface that declares this method.
    pub fn interface(&self) -> &'static str {
        self.interface
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &'static [&'static str] {
        self.params
    }

    fn matches(&self, name: &str, params: &[&str]) -> bool {
        self.name == name && self.params == params
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.interface,
            self.name,
            self.params.join(", ")
        )
    }
}

/// Static description of an interceptable interface.
#[derive(Debug)]
pub struct Interface {
    /// Unique interface name. Identity is by name.
    pub name: &'static str,
    /// Methods declared directly on this interface.
    pub methods: &'static [&'static Method],
    /// Super-interfaces whose methods are inherited.
    pub extends: &'static [&'static Interface],
}

impl Interface {
    /// Find a method declared here or inherited from any super-interface.
    pub fn find_method(&self, name: &str, params: &[&str]) -> Option<&'static Method> {
        self.methods
            .iter()
            .copied()
            .find(|method| method.matches(name, params))
            .or_else(|| {
                self.extends
                    .iter()
                    .find_map(|parent| parent.find_method(name, params))
            })
    }

    /// Whether this interface is `name` or extends it, at any depth.
    pub fn is_or_extends(&self, name: &str) -> bool {
        self.name == name || self.extends.iter().any(|parent| parent.is_or_extends(name))
    }
}

impl PartialEq for Interface {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Interface {}

/// One declared interception point: a method, by name and parameter
/// types, on a target interface.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub interface: &'static Interface,
    pub method: &'static str,
    pub params: &'static [&'static str],
}

impl Signature {
    pub const fn new(
        interface: &'static Interface,
        method: &'static str,
        params: &'static [&'static str],
    ) -> Self {
        Self {
            interface,
            method,
            params,
        }
    }
}

/// Resolved signatures of one interceptor: declared interface name to the
/// set of methods intercepted on it.
#[derive(Debug, Clone, Default)]
pub struct SignatureMap {
    methods: HashMap<&'static str, HashSet<Method>>,
}

impl SignatureMap {
    /// Resolve every signature an interceptor declares.
    ///
    /// Fails on the first signature that names a method not reachable on
    /// its declared interface.
    pub fn resolve(interceptor: &dyn Interceptor) -> Result<Self> {
        let mut map = Self::default();
        for signature in interceptor.signatures() {
            let method = signature
                .interface
                .find_method(signature.method, signature.params)
                .ok_or_else(|| PluginError::MethodNotFound {
                    interceptor: interceptor.name().to_string(),
                    interface: signature.interface.name,
                    method: signature.method,
                    params: signature.params.join(", "),
                })?;
            map.methods
                .entry(signature.interface.name)
                .or_default()
                .insert(*method);
        }
        Ok(map)
    }

    /// Whether any signature was declared against this interface.
    pub fn covers(&self, interface: &str) -> bool {
        self.methods.contains_key(interface)
    }

    /// Whether `method` is intercepted when reached through `interface`.
    pub fn intercepts(&self, interface: &str, method: &Method) -> bool {
        self.methods
            .get(interface)
            .is_some_and(|methods| methods.contains(method))
    }

    /// Methods intercepted through `interface`, if it is covered.
    pub fn methods(&self, interface: &str) -> Option<&HashSet<Method>> {
        self.methods.get(interface)
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
