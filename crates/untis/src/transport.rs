//! HTTP transport used by the RPC client.

use crate::config::SessionConfig;
use crate::error::{Result, UntisError};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Status code and body of an HTTP response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request body and returns the raw response.
///
/// Implementations must be `Send + Sync` so a session can move between tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` to `url`, attaching `JSESSIONID=<session_id>` when given.
    async fn post(
        &self,
        url: &Url,
        body: String,
        session_id: Option<&str>,
    ) -> Result<TransportResponse>;
}

/// reqwest-backed transport.
///
/// Certificate validation is disabled: WebUntis test servers commonly present
/// self-signed certificates.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| UntisError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &Url,
        body: String,
        session_id: Option<&str>,
    ) -> Result<TransportResponse> {
        let mut request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        if let Some(session_id) = session_id {
            request = request.header(COOKIE, format!("JSESSIONID={session_id}"));
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = TransportResponse {
            status: 200,
            body: String::new(),
        };
        let err = TransportResponse {
            status: 500,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!err.is_success());
    }

    #[test]
    fn test_http_transport_builds() {
        let config = SessionConfig::new("localhost", "school", "u", "p");
        assert!(HttpTransport::new(&config).is_ok());
    }
}
