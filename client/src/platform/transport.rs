//! `gloo-net` implementation of the session transport.

#![allow(clippy::unused_async)]

use async_trait::async_trait;
use session::{ApiRequest, ApiResponse, Transport, TransportError};
#[cfg(feature = "csr")]
use session::Method;

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

#[cfg(feature = "csr")]
fn to_gloo(method: Method) -> gloo_net::http::Method {
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
        Method::Put => gloo_net::http::Method::PUT,
        Method::Delete => gloo_net::http::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            let mut builder = gloo_net::http::RequestBuilder::new(&request.url).method(to_gloo(request.method));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let prepared = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError(e.to_string()))?;

            let response = prepared.send().await.map_err(|e| TransportError(e.to_string()))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| TransportError(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportError("fetch is only available in the browser".to_owned()))
        }
    }
}
