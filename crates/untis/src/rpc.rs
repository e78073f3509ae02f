//! JSON-RPC request pipeline.
//!
//! Every remote call goes through [`RpcClient::call`]:
//! 1. Wrap method and params in a JSON-RPC 2.0 envelope with id `req-<n>`
//! 2. Serve a fresh cached response if the caller allows caching
//! 3. Otherwise POST the envelope with the session cookie attached
//! 4. Decode the envelope into its `result`, or into [`UntisError::Rpc`]
//! 5. Cache successful responses for cacheable calls

use crate::cache::{CacheLookup, ResponseCache};
use crate::error::{Result, UntisError};
use crate::transport::{Transport, TransportResponse};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt::Write;
use tracing::{debug, warn};
use url::Url;

const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub id: String,
    pub method: String,
    pub params: Value,
    pub jsonrpc: &'static str,
}

impl RpcRequest {
    pub fn new(request_number: u64, method: &str, params: Value) -> Self {
        Self {
            id: format!("req-{request_number}"),
            method: method.to_string(),
            params,
            jsonrpc: JSONRPC_VERSION,
        }
    }

    /// Serializes the envelope without its id.
    ///
    /// Map keys are emitted in sorted order, so two requests for the same
    /// method and params always produce the same key.
    pub fn cache_key(&self) -> Result<String> {
        let keyed = serde_json::json!({
            "method": self.method,
            "params": self.params,
            "jsonrpc": self.jsonrpc,
        });
        Ok(serde_json::to_string(&keyed)?)
    }
}

/// A session id handed out by `authenticate`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short SHA-256 fingerprint, safe to log.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        digest[..4]
            .iter()
            .fold(String::with_capacity(8), |mut out, byte| {
                let _ = write!(out, "{byte:02x}");
                out
            })
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}...", self.fingerprint())
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionToken").field(&self.fingerprint()).finish()
    }
}

/// Client issuing JSON-RPC calls against one endpoint.
///
/// Owns the response cache, the request counter and the session token.
pub struct RpcClient {
    transport: Box<dyn Transport>,
    url: Url,
    cache: ResponseCache,
    request_counter: u64,
    session: Option<SessionToken>,
}

impl RpcClient {
    pub fn new(transport: Box<dyn Transport>, url: Url, cache: ResponseCache) -> Self {
        Self {
            transport,
            url,
            cache,
            request_counter: 0,
            session: None,
        }
    }

    /// Calls `method` with `params` and returns the decoded `result`.
    ///
    /// # Arguments
    /// * `method` - The RPC method name (e.g. "getSubjects")
    /// * `params` - Method parameters as a JSON value
    /// * `use_cache` - Serve and store the raw response in the cache
    ///
    /// # Errors
    /// * `UntisError::Network` - The transport failed
    /// * `UntisError::Rpc` - The server answered with an error envelope
    /// * `UntisError::UnexpectedResponse` - Non-success status without an error envelope
    /// * `UntisError::Parse` - The body is not a JSON-RPC envelope
    pub async fn call(&mut self, method: &str, params: Value, use_cache: bool) -> Result<Value> {
        self.request_counter += 1;
        let request = RpcRequest::new(self.request_counter, method, params);
        let key = request.cache_key()?;

        if use_cache {
            match self.cache.lookup(&key) {
                CacheLookup::Hit(raw) => {
                    debug!(request_id = %request.id, method = %method, "Serving cached response");
                    return decode_envelope(&raw, &request.id);
                }
                CacheLookup::Expired => {
                    debug!(request_id = %request.id, method = %method, "Cached response expired, refetching");
                }
                CacheLookup::Miss => {}
            }
        }

        let response = self.send(&request).await?;
        let result = decode_response(&response, &request.id);

        if use_cache && result.is_ok() {
            self.cache.put(key, response.body);
        }

        result
    }

    async fn send(&self, request: &RpcRequest) -> Result<TransportResponse> {
        let body = serde_json::to_string(request)?;

        debug!(
            request_id = %request.id,
            method = %request.method,
            session = ?self.session,
            "Sending request"
        );

        self.transport
            .post(&self.url, body, self.session.as_ref().map(SessionToken::as_str))
            .await
    }

    pub fn session(&self) -> Option<&SessionToken> {
        self.session.as_ref()
    }

    pub fn set_session(&mut self, session: Option<SessionToken>) {
        self.session = session;
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ResponseCache {
        &mut self.cache
    }

    /// Number of calls issued so far, cached or not.
    pub fn requests_issued(&self) -> u64 {
        self.request_counter
    }
}

fn decode_response(response: &TransportResponse, request_id: &str) -> Result<Value> {
    if response.is_success() {
        return decode_envelope(&response.body, request_id);
    }

    // Error envelopes may come with a non-success status
    match serde_json::from_str::<Value>(&response.body) {
        Ok(envelope) if has_error(&envelope) => decode_envelope(&response.body, request_id),
        _ => Err(UntisError::UnexpectedResponse {
            status: response.status,
            message: response.body.chars().take(200).collect(),
        }),
    }
}

fn decode_envelope(raw: &str, request_id: &str) -> Result<Value> {
    let mut envelope: Value = serde_json::from_str(raw)?;

    if has_error(&envelope) {
        let error = UntisError::from_rpc_payload(envelope["error"].take());
        warn!(request_id = %request_id, error = %error, "RPC call failed");
        return Err(error);
    }

    match envelope.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => Err(UntisError::Parse {
            message: "response missing both result and error".to_string(),
        }),
    }
}

fn has_error(envelope: &Value) -> bool {
    envelope.get("error").is_some_and(|e| !e.is_null())
}
