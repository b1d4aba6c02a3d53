#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Telemetry unavailable: {0}")]
    Unavailable(String),

    #[error("Feature not available: {0}")]
    NotAvailable(String),

    #[error("Invalid argument: {context} (value: {value})")]
    InvalidArgument { context: String, value: String },
}

impl Error {
    pub(crate) fn unavailable<S: Into<String>>(msg: S) -> Self {
        Error::Unavailable(msg.into())
    }

    #[allow(dead_code)]
    pub(crate) fn not_available<S: Into<String>>(msg: S) -> Self {
        Error::NotAvailable(msg.into())
    }

    pub(crate) fn invalid_argument<C: Into<String>, V: Into<String>>(context: C, value: V) -> Self {
        Error::InvalidArgument { context: context.into(), value: value.into() }
    }
}

/// Result type for memory-telemetry operations
pub type Result<T> = std::result::Result<T, Error>;
