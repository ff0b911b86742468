//! Test utilities and mock implementations.
//!
//! Provides a small executor-shaped interface hierarchy, mock targets with
//! call counters, and interceptors that record what they observe.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::plugin::{
    Args, CallResult, DispatchError, Interceptor, Interface, Invocation, Method, PluginError,
    Properties, Result, Signature, Target, TypeDescriptor,
};

pub static CLOSE: Method = Method::new("Closeable", "close", &[]);

pub static CLOSEABLE: Interface = Interface {
    name: "Closeable",
    methods: &[&CLOSE],
    extends: &[],
};

pub static UPDATE: Method = Method::new("Executor", "update", &["String", "i64"]);
pub static QUERY: Method = Method::new("Executor", "query", &["String", "i64"]);
pub static QUERY_LIMITED: Method = Method::new("Executor", "query", &["String", "i64", "usize"]);
pub static FAIL: Method = Method::new("Executor", "fail", &["String"]);

pub static EXECUTOR: Interface = Interface {
    name: "Executor",
    methods: &[&UPDATE, &QUERY, &QUERY_LIMITED, &FAIL],
    extends: &[&CLOSEABLE],
};

pub static PARAMETER_OBJECT: Method = Method::new("ParameterHandler", "parameter_object", &[]);
pub static SET_PARAMETERS: Method =
    Method::new("ParameterHandler", "set_parameters", &["Vec<String>"]);

pub static PARAMETER_HANDLER: Interface = Interface {
    name: "ParameterHandler",
    methods: &[&PARAMETER_OBJECT, &SET_PARAMETERS],
    extends: &[],
};

static BASE_EXECUTOR: TypeDescriptor<'static> = TypeDescriptor {
    name: "BaseExecutor",
    interfaces: &[&EXECUTOR],
    parent: None,
};

static MOCK_EXECUTOR: TypeDescriptor<'static> = TypeDescriptor {
    name: "MockExecutor",
    interfaces: &[],
    parent: Some(&BASE_EXECUTOR),
};

static MOCK_PARAMETER_HANDLER: TypeDescriptor<'static> = TypeDescriptor {
    name: "MockParameterHandler",
    interfaces: &[&PARAMETER_HANDLER, &CLOSEABLE],
    parent: None,
};

/// Failures raised by the mock targets and interceptors.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Statement rejected: {0}")]
    Rejected(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),
}

fn rows(statement: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{statement}#{i}")).collect()
}

/// Mock executor that counts calls per method name.
///
/// Realizes `Executor` (and through it `Closeable`) via its parent type.
#[derive(Default)]
pub struct MockExecutor {
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received for a method name, across overloads.
    pub fn calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(method)
            .copied()
            .unwrap_or(0)
    }

    fn record(&self, method: &Method) {
        *self.calls.lock().unwrap().entry(method.name()).or_default() += 1;
    }
}

impl Target for MockExecutor {
    fn type_descriptor(&self) -> TypeDescriptor<'_> {
        MOCK_EXECUTOR
    }

    fn invoke(&self, method: &Method, args: Args) -> CallResult {
        self.record(method);

        if *method == UPDATE {
            let parameter = *args.get::<i64>(1)?;
            Ok(Box::new(parameter as u64))
        } else if *method == QUERY {
            let statement = args.get::<String>(0)?;
            let count = *args.get::<i64>(1)?;
            Ok(Box::new(rows(statement, count as usize)))
        } else if *method == QUERY_LIMITED {
            let statement = args.get::<String>(0)?;
            let count = *args.get::<i64>(1)? as usize;
            let limit = *args.get::<usize>(2)?;
            Ok(Box::new(rows(statement, count.min(limit))))
        } else if *method == FAIL {
            let statement = args.get::<String>(0)?;
            Err(ExecutorError::Rejected(statement.clone()).into())
        } else if *method == CLOSE {
            Ok(Box::new(()))
        } else {
            Err(DispatchError::Unsupported {
                type_name: MOCK_EXECUTOR.name.to_string(),
                interface: method.interface(),
                method: method.name(),
            }
            .into())
        }
    }
}

/// Mock parameter handler realizing `ParameterHandler` and `Closeable`
/// directly.
pub struct MockParameterHandler {
    parameter: i64,
    closed: AtomicUsize,
}

impl MockParameterHandler {
    pub fn new(parameter: i64) -> Self {
        Self {
            parameter,
            closed: AtomicUsize::new(0),
        }
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Target for MockParameterHandler {
    fn type_descriptor(&self) -> TypeDescriptor<'_> {
        MOCK_PARAMETER_HANDLER
    }

    fn invoke(&self, method: &Method, args: Args) -> CallResult {
        if *method == PARAMETER_OBJECT {
            Ok(Box::new(self.parameter))
        } else if *method == SET_PARAMETERS {
            let values = args.get::<Vec<String>>(0)?;
            Ok(Box::new(values.len()))
        } else if *method == CLOSE {
            self.closed.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(()))
        } else {
            Err(DispatchError::Unsupported {
                type_name: MOCK_PARAMETER_HANDLER.name.to_string(),
                interface: method.interface(),
                method: method.name(),
            }
            .into())
        }
    }
}

/// Log shared between interceptors to observe call order.
pub type SharedLog = Arc<Mutex<Vec<String>>>;

pub fn shared_log() -> SharedLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// What a [`RecordingInterceptor`] saw for one call.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub receiver: String,
    pub arg_count: usize,
    /// Calls the observed target had received for this method before the
    /// interceptor ran.
    pub target_calls_before: usize,
}

/// Interceptor that records every invocation, then proceeds.
pub struct RecordingInterceptor {
    name: String,
    signatures: Vec<Signature>,
    log: SharedLog,
    observed: Option<Arc<MockExecutor>>,
    captured: Mutex<Vec<Captured>>,
}

impl RecordingInterceptor {
    pub fn new(name: &str, signatures: Vec<Signature>) -> Self {
        Self {
            name: name.to_string(),
            signatures,
            log: shared_log(),
            observed: None,
            captured: Mutex::new(Vec::new()),
        }
    }

    pub fn with_log(mut self, log: SharedLog) -> Self {
        self.log = log;
        self
    }

    /// Snapshot the target's call counter on every interception.
    pub fn observing_target(mut self, target: Arc<MockExecutor>) -> Self {
        self.observed = Some(target);
        self
    }

    pub fn seen(&self) -> usize {
        self.captured.lock().unwrap().len()
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

impl Interceptor for RecordingInterceptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    fn intercept(&self, invocation: Invocation) -> CallResult {
        let target_calls_before = self
            .observed
            .as_ref()
            .map(|target| target.calls(invocation.method().name()))
            .unwrap_or(0);

        self.captured.lock().unwrap().push(Captured {
            method: *invocation.method(),
            receiver: invocation.target().type_descriptor().name.to_string(),
            arg_count: invocation.args().len(),
            target_calls_before,
        });
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, invocation.method()));

        invocation.proceed()
    }
}

static UPDATE_SIGNATURE: [Signature; 1] = [Signature::new(&EXECUTOR, "update", &["String", "i64"])];

enum ShortCircuit {
    Value(u64),
    Failure(String),
}

/// Interceptor on `Executor.update` that never proceeds.
pub struct ShortCircuitInterceptor {
    outcome: ShortCircuit,
}

impl ShortCircuitInterceptor {
    pub fn returning(value: u64) -> Self {
        Self {
            outcome: ShortCircuit::Value(value),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: ShortCircuit::Failure(message.to_string()),
        }
    }
}

impl Interceptor for ShortCircuitInterceptor {
    fn signatures(&self) -> &[Signature] {
        &UPDATE_SIGNATURE
    }

    fn intercept(&self, _invocation: Invocation) -> CallResult {
        match &self.outcome {
            ShortCircuit::Value(value) => Ok(Box::new(*value)),
            ShortCircuit::Failure(message) => Err(ExecutorError::Quota(message.clone()).into()),
        }
    }
}

static QUERY_SIGNATURE: [Signature; 1] = [Signature::new(&EXECUTOR, "query", &["String", "i64"])];

/// Interceptor that caps the row count of `Executor.query` at a
/// configured `limit`.
#[derive(Default)]
pub struct LimitInterceptor {
    limit: Option<i64>,
}

impl Interceptor for LimitInterceptor {
    fn name(&self) -> &str {
        "limit"
    }

    fn signatures(&self) -> &[Signature] {
        &QUERY_SIGNATURE
    }

    fn intercept(&self, mut invocation: Invocation) -> CallResult {
        if let Some(limit) = self.limit {
            let count = invocation.args_mut().get_mut::<i64>(1)?;
            *count = (*count).min(limit);
        }
        invocation.proceed()
    }

    fn configure(&mut self, properties: &Properties) -> Result<()> {
        if let Some(raw) = properties.get("limit") {
            let limit = raw.parse().map_err(|e: std::num::ParseIntError| {
                PluginError::InvalidProperty {
                    interceptor: self.name().to_string(),
                    key: "limit".to_string(),
                    message: e.to_string(),
                }
            })?;
            self.limit = Some(limit);
        }
        Ok(())
    }
}

pub fn limit_factory() -> Box<dyn Interceptor> {
    Box::new(LimitInterceptor::default())
}
