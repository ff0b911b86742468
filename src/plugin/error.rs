//! Plugin error types.

/// Boxed runtime failure relayed unchanged through wrappers.
///
/// Targets and interceptors box their own error types; callers recover them
/// with `downcast_ref`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for chain assembly and signature resolution.
pub type Result<T> = std::result::Result<T, PluginError>;

/// Errors raised while configuring interceptors or building wrappers.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Interceptor {interceptor} declares {interface}.{method}({params}), but no such method exists on {interface}")]
    MethodNotFound {
        interceptor: String,
        interface: &'static str,
        method: &'static str,
        params: String,
    },

    #[error("Unknown interceptor: {0}")]
    UnknownInterceptor(String),

    #[error("Invalid property '{key}' for interceptor {interceptor}: {message}")]
    InvalidProperty {
        interceptor: String,
        key: String,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// Errors raised by the dispatch plumbing itself, as opposed to the
/// target's or an interceptor's own failures.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{type_name} does not expose {interface}.{method}")]
    NotExposed {
        type_name: String,
        interface: &'static str,
        method: &'static str,
    },

    #[error("{type_name} has no implementation for {interface}.{method}")]
    Unsupported {
        type_name: String,
        interface: &'static str,
        method: &'static str,
    },

    #[error("Missing argument at position {index}")]
    MissingArgument { index: usize },

    #[error("Argument at position {index} is not a {expected}")]
    ArgumentType { index: usize, expected: &'static str },

    #[error("Return value is not a {expected}")]
    ReturnType { expected: &'static str },
}
