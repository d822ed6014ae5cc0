use thiserror::Error;

/// Opening a connection failed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ConnectionError {
    pub message: String,
    pub cause: Option<String>,
}

impl ConnectionError {
    pub fn new(message: impl Into<String>) -> Self {
        ConnectionError {
            message: message.into(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

/// A `conn` spec that is not `user/password@host:port:sid`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected exactly one '@' in connect spec")]
    At,
    #[error("expected exactly one '/' between user and password")]
    Slash,
    #[error("connect spec has an empty {0}")]
    EmptyPart(&'static str),
}

/// A submitted statement failed inside the database.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{message}")]
pub struct StatementError {
    pub message: String,
    pub state: Option<String>,
    pub code: i32,
}

impl StatementError {
    pub fn new(message: impl Into<String>, state: Option<String>, code: i32) -> Self {
        StatementError {
            message: message.into(),
            state,
            code,
        }
    }
}

/// Everything `reconnect` can fail with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconnectError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

/// Failures of the loop itself; these are the only ones that end the process.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("console output failed: {0}")]
    Output(#[from] std::io::Error),
    #[error("reading input failed: {0}")]
    Input(#[source] std::io::Error),
}
