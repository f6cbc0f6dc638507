//! Authenticated HTTP client with the global 401 interceptor.
//!
//! ARCHITECTURE
//! ============
//! Request phase: the bearer credential is read from the durable slot at
//! call time and attached when present. Response phase: a `401` from any
//! endpoint commits the shared logout (credential and user cleared, one hard
//! redirect to `/login`) before the error is returned, unless the credential
//! was replaced or removed while the request was in flight. Other statuses
//! pass through untouched.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::store::SessionContext;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";
const JSON: &str = "application/json";

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Human-readable message from an error body: gin-style `{"error": ...}`,
/// then `{"message": ...}`, then the raw text.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                return text.to_owned();
            }
        }
    }
    body.trim().to_owned()
}

#[derive(Clone)]
pub struct HttpClient {
    config: ClientConfig,
    transport: Rc<dyn Transport>,
    context: SessionContext,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn new(config: ClientConfig, transport: Rc<dyn Transport>, context: SessionContext) -> Self {
        Self { config, transport, context }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    fn build(&self, method: Method, path: &str, body: Option<String>, token: Option<&str>) -> ApiRequest {
        let mut headers = vec![(CONTENT_TYPE.to_owned(), JSON.to_owned())];
        if let Some(token) = token {
            headers.push((AUTHORIZATION.to_owned(), bearer(token)));
        }
        ApiRequest { method, url: self.config.endpoint(path), headers, body }
    }

    /// Send a request through the interceptor. `Ok` only for 2xx responses.
    ///
    /// # Errors
    ///
    /// `Network` if no response arrived, `Unauthorized` for 401 (after the
    /// session has been reset, unless the credential changed in flight),
    /// `Status` for any other non-2xx.
    pub async fn request(&self, method: Method, path: &str, body: Option<String>) -> Result<ApiResponse, ApiError> {
        let sent_token = self.context.credential();
        let request = self.build(method, path, body, sent_token.as_deref());
        let response = self.transport.send(request).await.map_err(ApiError::from)?;
        if response.is_success() {
            return Ok(response);
        }
        if response.status == 401 {
            // Only the credential that was actually rejected may be revoked.
            if self.context.credential() == sent_token {
                log::warn!("http: {method} {path} rejected with 401; forcing logout");
                self.context.commit_logout("authentication failure");
            } else {
                log::info!("http: {method} {path} rejected with 401 for a replaced credential; ignoring");
            }
            return Err(ApiError::Unauthorized);
        }
        Err(ApiError::Status { status: response.status, message: error_message(&response.body) })
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let response = self.request(method, path, body).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
        serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
    }

    /// # Errors
    ///
    /// See [`HttpClient::request`]; `Decode` if the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(Method::Get, path, None).await
    }

    /// POST without a body, decoding the response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get_json`].
    pub async fn post_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(Method::Post, path, None).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::get_json`]; `Encode` if `body` fails to serialize.
    pub async fn post_body<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = Self::encode(body)?;
        self.request_json(Method::Post, path, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::post_body`].
    pub async fn put_body<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = Self::encode(body)?;
        self.request_json(Method::Put, path, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::get_json`].
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(Method::Delete, path, None).await
    }
}
