//! Error type for the request helper.
//!
//! # Design
//! Every failure surfaced by `Fetcher` is one of two kinds. A response with a
//! non-2xx status keeps its real status code. Anything else (transport
//! failure, undecodable body, unserializable payload) collapses into
//! `Unexpected` with a fixed status of 500 and the original cause dropped.
//! The collapse is lossy; callers only ever branch on `status()` and
//! `message()`.

/// Message carried by `HttpError::FetchFailed`.
pub const FAIL_FETCH_MESSAGE: &str = "fetch failed";

/// Message carried by `HttpError::Unexpected`.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "unexpected error";

/// Status reported for failures that never produced a usable response.
pub const UNEXPECTED_ERROR_STATUS: u16 = 500;

/// Normalized failure of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    /// The server answered with a status outside 200-299.
    #[error("{message} (status {status})", message = FAIL_FETCH_MESSAGE)]
    FetchFailed { status: u16 },

    /// No usable response: network, decode or encode failure.
    #[error("{message} (status {status})", message = UNEXPECTED_ERROR_MESSAGE, status = UNEXPECTED_ERROR_STATUS)]
    Unexpected,
}

impl HttpError {
    pub fn message(&self) -> &'static str {
        match self {
            HttpError::FetchFailed { .. } => FAIL_FETCH_MESSAGE,
            HttpError::Unexpected => UNEXPECTED_ERROR_MESSAGE,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            HttpError::FetchFailed { status } => *status,
            HttpError::Unexpected => UNEXPECTED_ERROR_STATUS,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == 404
    }
}
