//! The extension point: interceptors observe selected method calls.

use std::collections::HashMap;

use super::error::Result;
use super::invocation::{CallResult, Invocation};
use super::signature::Signature;

/// User-supplied settings handed to [`Interceptor::configure`].
pub type Properties = HashMap<String, String>;

/// Cross-cutting behavior attached to selected methods of selected
/// interfaces.
///
/// An interceptor declares what it observes through [`signatures`] and is
/// handed an [`Invocation`] for every matching call. Calling
/// [`Invocation::proceed`] continues to the next wrapper or the real target;
/// not calling it short-circuits the call.
///
/// ```ignore
/// static SIGNATURES: &[Signature] = &[Signature::new(&EXECUTOR, "query", &["String", "i64"])];
///
/// struct Timing;
///
/// impl Interceptor for Timing {
///     fn signatures(&self) -> &[Signature] {
///         SIGNATURES
///     }
///
///     fn intercept(&self, invocation: Invocation) -> CallResult {
///         let start = Instant::now();
///         let result = invocation.proceed();
///         info!(elapsed_ms = start.elapsed().as_millis() as u64, "query");
///         result
///     }
/// }
/// ```
///
/// [`signatures`]: Interceptor::signatures
pub trait Interceptor: Send + Sync {
    /// Name used in error messages and logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Methods this interceptor observes. Must not change after
    /// construction.
    fn signatures(&self) -> &[Signature];

    /// Handle one intercepted call.
    ///
    /// Failures from `proceed` should be returned as received; failures of
    /// the interceptor's own reach the caller exactly as returned here.
    fn intercept(&self, invocation: Invocation) -> CallResult;

    /// Inject user-supplied settings. Called once, after construction and
    /// before the interceptor is registered.
    fn configure(&mut self, properties: &Properties) -> Result<()> {
        let _ = properties;
        Ok(())
    }
}
