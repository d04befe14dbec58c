//! Error types for Slack API operations.

use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

/// Boxed error returned by an [`HttpExecutor`](crate::HttpExecutor).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while talking to the Slack Web API.
///
/// Each variant names the stage that failed. Wrapping variants keep the
/// original cause reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum Error {
    /// The client was created with an empty bearer token.
    #[error("token is required")]
    MissingCredentials,

    /// The base URL and path did not form a valid URL.
    #[error("can't create http request: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The token can't be carried in an `Authorization` header.
    #[error("can't create authorization header: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    /// The default HTTP client could not be constructed.
    #[error("can't build http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The executor failed to deliver the request or the deadline elapsed.
    #[error("can't send http request: {0}")]
    Network(#[source] BoxError),

    /// Slack answered with something other than `200 OK`.
    #[error("slack respond with {} status code", .status.as_u16())]
    UnexpectedStatus { status: StatusCode },

    /// The response body could not be read to the end.
    #[error("can't read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The request payload could not be serialized.
    #[error("can't marshal request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body was not the expected JSON shape.
    #[error("can't unmarshal response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Slack returned `"ok": false` with a machine-readable error code.
    #[error("slack respond with error: {code}")]
    Remote { code: String },
}

impl Error {
    /// Returns `true` when the request failed because a deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        let Error::Network(source) = self else {
            return false;
        };

        source.is::<tokio::time::error::Elapsed>()
            || source
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout)
    }

    /// The Slack error code, e.g. `"users_not_found"`, for [`Error::Remote`].
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            Error::Remote { code } => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn unexpected_status_message_carries_code() {
        let err = Error::UnexpectedStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.to_string(), "slack respond with 500 status code");
    }

    #[test]
    fn network_keeps_cause_inspectable() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::Network(Box::new(cause));

        let source = err.source().expect("network error has a source");
        let io = source
            .downcast_ref::<std::io::Error>()
            .expect("source is the io error");
        assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
        assert!(!err.is_timeout());
    }

    #[test]
    fn remote_code_only_for_remote_errors() {
        let err = Error::Remote {
            code: "users_not_found".to_string(),
        };
        assert_eq!(err.remote_code(), Some("users_not_found"));
        assert_eq!(Error::MissingCredentials.remote_code(), None);
    }
}
