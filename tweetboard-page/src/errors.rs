use std::fmt;
use tweetboard_common::BoardError;

/// Which part of the page a reported failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// The load-time bootstrap (element lookup or the initial fetch).
    Load,
    /// One activation of the send control.
    Post,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => f.write_str("load"),
            Self::Post => f.write_str("post"),
        }
    }
}

/// Receives failures that have no caller to return to.
pub trait ErrorSink: Send + Sync {
    fn report(&self, origin: ErrorOrigin, err: &BoardError);
}

/// Logs reported failures at error level and does nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, origin: ErrorOrigin, err: &BoardError) {
        tracing::error!(%origin, error = %err, "page.unhandled_error");
    }
}
