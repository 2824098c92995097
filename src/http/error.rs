//! HTTP error types

use thiserror::Error;

/// Failure of a single HTTP request.
///
/// Every variant renders as `Request to [<url>] failed: <reason>`.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request to [{url}] failed: {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },
    #[error("Request to [{url}] failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("Request to [{url}] failed: {reason}")]
    Decode { url: String, reason: String },
}

impl HttpError {
    pub(crate) fn status(url: &str, status: reqwest::StatusCode) -> Self {
        HttpError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
        }
    }

    pub(crate) fn transport(url: &str, err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        HttpError::Transport {
            url: url.to_string(),
            reason,
        }
    }

    pub(crate) fn decode(url: &str, reason: impl Into<String>) -> Self {
        HttpError::Decode {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            HttpError::Status { url, .. }
            | HttpError::Transport { url, .. }
            | HttpError::Decode { url, .. } => url,
        }
    }

    /// HTTP status code, when the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
