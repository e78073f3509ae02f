//! Error types for the WebUntis client.

use thiserror::Error;

/// JSON-RPC error code the server answers with when no session is active.
pub const NOT_AUTHENTICATED_CODE: i64 = -8520;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UntisError>;

/// Errors that can occur while talking to a WebUntis server.
#[derive(Debug, Error, Clone)]
pub enum UntisError {
    /// Network/HTTP request failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// Server answered with a non-success status and no JSON-RPC error body
    #[error("Unexpected response (status {status}): {message}")]
    UnexpectedResponse { status: u16, message: String },

    /// Server answered with a JSON-RPC error envelope
    #[error("RPC error {code}: {message}{}", hint_suffix(.hint))]
    Rpc {
        code: i64,
        message: String,
        /// Actionable hint for well-known codes
        hint: Option<String>,
        /// The original `error` object
        payload: serde_json::Value,
    },

    /// Caller passed an invalid argument; nothing was sent
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Operation needs the identity returned by `login()`
    #[error("Not logged in: {message}")]
    NotLoggedIn { message: String },

    /// Response body could not be decoded
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// URL parsing/construction failed
    #[error("URL error: {message}")]
    Url { message: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref().map(|h| format!(" ({h})")).unwrap_or_default()
}

impl UntisError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        UntisError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Builds an RPC error from the `error` member of a response envelope.
    pub(crate) fn from_rpc_payload(payload: serde_json::Value) -> Self {
        let code = payload
            .get("code")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or_default();
        let message = payload
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        let hint = (code == NOT_AUTHENTICATED_CODE)
            .then(|| "you must authenticate with login() before calling this method".to_string());

        UntisError::Rpc {
            code,
            message,
            hint,
            payload,
        }
    }

    /// Returns true if the server rejected the call because no session is active.
    pub fn needs_login(&self) -> bool {
        matches!(self, UntisError::Rpc { code, .. } if *code == NOT_AUTHENTICATED_CODE)
    }

    /// Returns true for failures raised by the transport or the remote service,
    /// as opposed to local argument/configuration problems.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            UntisError::Network { .. }
                | UntisError::UnexpectedResponse { .. }
                | UntisError::Rpc { .. }
        )
    }
}

impl From<reqwest::Error> for UntisError {
    fn from(err: reqwest::Error) -> Self {
        UntisError::Network {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for UntisError {
    fn from(err: url::ParseError) -> Self {
        UntisError::Url {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for UntisError {
    fn from(err: serde_json::Error) -> Self {
        UntisError::Parse {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for UntisError {
    fn from(err: std::io::Error) -> Self {
        UntisError::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_authenticated_hint() {
        let err = UntisError::from_rpc_payload(json!({"code": -8520, "message": "not authenticated"}));

        assert!(err.needs_login());
        assert!(err.is_transport());
        assert_eq!(
            err.to_string(),
            "RPC error -8520: not authenticated (you must authenticate with login() before calling this method)"
        );
    }

    #[test]
    fn test_other_rpc_error_keeps_payload() {
        let payload = json!({"code": -7004, "message": "no allowed date"});
        let err = UntisError::from_rpc_payload(payload.clone());

        assert!(!err.needs_login());
        assert_eq!(err.to_string(), "RPC error -7004: no allowed date");
        match err {
            UntisError::Rpc { payload: p, hint, .. } => {
                assert_eq!(p, payload);
                assert!(hint.is_none());
            }
            _ => panic!("Expected Rpc"),
        }
    }

    #[test]
    fn test_local_errors_are_not_transport() {
        assert!(!UntisError::invalid_argument("bad").is_transport());
        let parse: UntisError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(!parse.is_transport());
    }
}
