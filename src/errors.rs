use thiserror::Error;

/// All errors that can occur when using the Glober AI SDK.
///
/// Non-success responses are never special-cased by status: a 401, a 404 and
/// a 500 all come back as [`GloberError::Api`] with the raw body attached.
#[derive(Error, Debug)]
pub enum GloberError {
    /// The request never produced a response (DNS, connection refused,
    /// transport timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// A success response whose body did not match the expected shape.
    #[error("failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// An I/O error, typically from reading a file to upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The call was rejected before any request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GloberError {
    /// HTTP status of an [`Api`](Self::Api) error, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` if no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// A convenience alias for `Result<T, GloberError>`.
pub type Result<T> = std::result::Result<T, GloberError>;
