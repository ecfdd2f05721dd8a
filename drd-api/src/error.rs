//! Error type for calls to the prediction backends.

use thiserror::Error;

/// Failure of a single backend call.
///
/// The `Display` text is the human-readable part of the message shown to the
/// user; workflows prefix it with the operation name.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Connection refused, DNS failure, aborted fetch...
    #[error("{0}")]
    Transport(String),

    /// The fixed client-side timeout elapsed
    #[error("timeout of {0}ms exceeded")]
    Timeout(u64),

    /// Non-2xx response, with the server's `detail`/`error` text if it sent one
    #[error("Request failed with status code {status}")]
    Status { status: u16, detail: Option<String> },

    /// The backend answered but reported an error in its body
    #[error("{0}")]
    Server(String),

    /// A body that could not be decoded at all
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Server-provided explanation, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                detail: Some(d), ..
            } => Some(d.as_str()),
            ApiError::Server(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(crate::config::REQUEST_TIMEOUT.as_millis() as u64)
        } else if e.is_decode() {
            ApiError::Malformed(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_prefers_server_text() {
        let e = ApiError::Status {
            status: 422,
            detail: Some("Station not supported".to_string()),
        };
        assert_eq!(e.detail(), Some("Station not supported"));
        assert_eq!(e.to_string(), "Request failed with status code 422");
    }

    #[test]
    fn test_transport_has_no_detail() {
        assert_eq!(ApiError::Transport("Network Error".into()).detail(), None);
    }
}
