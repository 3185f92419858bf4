//! Blocking execution of `HttpRequest` values.
//!
//! # Design
//! `Transport` is the seam between the deterministic core and the network.
//! Any non-2xx status is still a response: only failures that leave no
//! response at all (refused connection, timeout, broken body stream) are
//! reported as `TransportError`, which the classifier folds into
//! `ApiError::ServerOrConnection`.

use thiserror::Error;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// The request produced no HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// `Transport` backed by a ureq agent.
///
/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses come
/// back as data and the classifier decides what they mean.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(request.url.as_str()),
        };
        for (key, value) in &request.query {
            builder = builder.query(key, value);
        }

        let mut response = builder
            .call()
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;

        tracing::debug!(url = %request.url, status, "received response");
        Ok(HttpResponse { status, body })
    }
}
