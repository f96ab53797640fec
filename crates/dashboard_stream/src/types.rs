use std::fmt;

use dashboard_core::Snapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// The subscription is connected and the event stream accepted.
    Opened,
    Snapshot(Box<Snapshot>),
    /// A message arrived but could not be turned into a snapshot.
    Skipped(SkipReason),
    /// The subscription ended. Carries the error when it did not end cleanly.
    Closed(Option<StreamError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("event larger than {max_bytes} bytes")]
    Oversized { max_bytes: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct StreamError {
    pub kind: FailureKind,
    pub message: String,
}

impl StreamError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    UnsupportedContentType { content_type: String },
    Timeout,
    Network,
    Runtime,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Runtime => write!(f, "runtime error"),
        }
    }
}
