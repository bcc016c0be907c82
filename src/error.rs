use thiserror::Error;

/// Errors surfaced by the completion client and the round-trip orchestrator.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("conversation must contain at least one message")]
    EmptyConversation,

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("expected a function call, got a plain answer: {0}")]
    NoFunctionCall(String),

    #[error("malformed arguments for function '{name}': {detail}")]
    MalformedArguments { name: String, detail: String },

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("tool error: {0}")]
    Tool(#[from] ToolError),
}

impl ChatError {
    /// Transient failures are worth retrying; everything else is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited | Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Tool/function execution errors.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
