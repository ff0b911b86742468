//! Runtime method interception.
//!
//! Interceptors declare, as [`Signature`]s, which methods of which
//! [`Interface`]s they observe. [`wrap`] puts one interceptor in front of a
//! [`Target`]; [`InterceptorChain`] folds any number of them over a target
//! in registration order.
//!
//! # Architecture
//!
//! Targets expose their methods through a single dispatch entry point,
//! [`Target::invoke`], keyed by [`Method`] identity. A wrapper ([`Plugin`])
//! is itself a `Target`: calls to methods in the interceptor's
//! [`SignatureMap`] become an [`Invocation`]; everything else goes straight
//! to the wrapped object.
//!
//! ```ignore
//! let mut chain = InterceptorChain::new();
//! chain.append(Arc::new(Audit::default()));
//!
//! let executor = chain.apply_all(Arc::new(SimpleExecutor::new()))?;
//! let rows: Vec<Row> = executor.call(&QUERY, Args::new().with(statement).with(params))?;
//! ```

mod chain;
mod error;
mod interceptor;
mod invocation;
mod proxy;
mod signature;
mod target;

pub use chain::InterceptorChain;
pub use error::{BoxError, DispatchError, PluginError, Result};
pub use interceptor::{Interceptor, Properties};
pub use invocation::{downcast, Args, CallResult, Invocation, Value};
pub use proxy::{wrap, Plugin};
pub use signature::{Interface, Method, Signature, SignatureMap};
pub use target::{Target, TypeDescriptor};
