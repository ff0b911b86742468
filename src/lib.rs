//! Weave - method interception for data-access components.
//!
//! Lets independently written interceptors attach behavior (timing,
//! auditing, caching, argument and result rewriting) to selected methods of
//! selected interfaces on an existing object, without touching the object's
//! implementation.
//!
//! - [`plugin`] - signatures, wrappers and the interceptor chain
//! - [`config`] - which interceptors to register, loaded from YAML/env
//! - [`registration`] - named interceptor factories and chain assembly

pub mod config;
pub mod plugin;
pub mod registration;

#[cfg(test)]
pub(crate) mod test_utils;
