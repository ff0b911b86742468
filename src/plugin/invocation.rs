//! Captured calls and type-erased argument lists.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use super::error::{BoxError, DispatchError};
use super::signature::Method;
use super::target::Target;

/// Type-erased argument or return value.
pub type Value = Box<dyn Any + Send>;

/// Outcome of one dispatched call.
pub type CallResult = std::result::Result<Value, BoxError>;

/// Recover a concrete value from a type-erased one.
pub fn downcast<T: Any>(value: Value) -> Result<T, DispatchError> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| DispatchError::ReturnType {
            expected: type_name::<T>(),
        })
}

/// Ordered argument list of one call.
#[derive(Default)]
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument, builder style.
    pub fn with<T: Any + Send>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn push<T: Any + Send>(&mut self, value: T) {
        self.values.push(Box::new(value));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the argument at `index` as a `T`.
    pub fn get<T: Any>(&self, index: usize) -> Result<&T, DispatchError> {
        self.values
            .get(index)
            .ok_or(DispatchError::MissingArgument { index })?
            .downcast_ref::<T>()
            .ok_or(DispatchError::ArgumentType {
                index,
                expected: type_name::<T>(),
            })
    }

    /// Mutably borrow the argument at `index` as a `T`.
    pub fn get_mut<T: Any>(&mut self, index: usize) -> Result<&mut T, DispatchError> {
        self.values
            .get_mut(index)
            .ok_or(DispatchError::MissingArgument { index })?
            .downcast_mut::<T>()
            .ok_or(DispatchError::ArgumentType {
                index,
                expected: type_name::<T>(),
            })
    }

    /// Replace the argument at `index`, returning the previous value.
    pub fn replace<T: Any + Send>(&mut self, index: usize, value: T) -> Result<Value, DispatchError> {
        let slot = self
            .values
            .get_mut(index)
            .ok_or(DispatchError::MissingArgument { index })?;
        Ok(std::mem::replace(slot, Box::new(value)))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.values.len()).finish()
    }
}

/// One intercepted call: receiver, method and arguments.
///
/// The receiver is the object one level below the wrapper that built the
/// invocation: either the real target or the next inner wrapper.
pub struct Invocation {
    target: Arc<dyn Target>,
    method: Method,
    args: Args,
}

impl Invocation {
    pub fn new(target: Arc<dyn Target>, method: Method, args: Args) -> Self {
        Self {
            target,
            method,
            args,
        }
    }

    pub fn target(&self) -> &Arc<dyn Target> {
        &self.target
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Arguments, for interceptors that rewrite them before proceeding.
    pub fn args_mut(&mut self) -> &mut Args {
        &mut self.args
    }

    /// Perform the captured call on the captured receiver.
    ///
    /// Consumes the invocation, so the receiver runs at most once per
    /// invocation. The receiver's result or failure is returned unchanged.
    pub fn proceed(self) -> CallResult {
        self.target.invoke(&self.method, self.args)
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("target", &self.target.type_descriptor().name)
            .field("method", &self.method)
            .field("args", &self.args)
            .finish()
    }
}
