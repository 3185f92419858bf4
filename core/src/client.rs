//! Stateless HTTP request builder and response parser for the Polr API.
//!
//! # Design
//! `PolrClient` holds the normalized endpoints and the API key and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! the transport result. The caller executes the HTTP round-trip in between,
//! keeping this type deterministic and free of I/O.

use serde::Deserialize;
use serde_json::Value;

use crate::classify::{classify, Call, Classified};
use crate::endpoints::Endpoints;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::TransportError;
use crate::types::{LinkInfo, Lookup, LookupRequest, ShortenRequest};

/// Synchronous, stateless client for the Polr API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolrClient {
    endpoints: Endpoints,
    api_key: String,
}

impl PolrClient {
    pub fn new(server: &str, api_key: &str, api_root: &str) -> Self {
        Self {
            endpoints: Endpoints::new(server, api_root),
            api_key: api_key.to_string(),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Short URL ending of `short_url`.
    ///
    /// `https://ti.ny/5N3f8` on server `https://ti.ny` gives `5N3f8`; a bare
    /// `5N3f8` is returned as is. A URL that merely starts with the same
    /// characters as the server (`https://ti.nyc/x`) is left untouched.
    pub fn url_ending<'a>(&self, short_url: &'a str) -> &'a str {
        match short_url.strip_prefix(self.endpoints.server()) {
            Some(rest) if rest.is_empty() => rest,
            Some(rest) => rest.strip_prefix('/').unwrap_or(short_url),
            None => short_url,
        }
    }

    fn base_request(&self, url: String) -> HttpRequest {
        HttpRequest::get(&url)
            .param("key", self.api_key.as_str())
            .param("response_type", "json")
    }

    pub fn build_shorten(&self, input: &ShortenRequest) -> HttpRequest {
        self.base_request(self.endpoints.shorten())
            .param("url", input.long_url.as_str())
            .param("is_secret", if input.is_secret { "true" } else { "false" })
            .opt_param("custom_encoding", input.custom_ending.as_deref())
    }

    pub fn build_lookup(&self, input: &LookupRequest) -> HttpRequest {
        self.base_request(self.endpoints.lookup())
            .param("url_ending", self.url_ending(&input.short_url))
            .opt_param("url_key", input.url_key.as_deref())
    }

    /// Short URL created by the server.
    pub fn parse_shorten(
        &self,
        input: &ShortenRequest,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<String, ApiError> {
        let call = Call::Shorten {
            custom_ending: input.custom_ending.as_deref(),
        };
        match classify(call, response)? {
            Classified::Result(Value::String(short_url)) => Ok(short_url),
            Classified::Result(other) => Err(unexpected(call, &other)),
            Classified::NotFound => Err(unexpected(call, &Value::Null)),
        }
    }

    pub fn parse_lookup(
        &self,
        input: &LookupRequest,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<Lookup, ApiError> {
        let call = Call::Lookup {
            url_key: input.url_key.as_deref(),
        };
        match classify(call, response)? {
            Classified::NotFound => Ok(Lookup::NotFound),
            Classified::Result(result) => LinkInfo::deserialize(&result)
                .map(Lookup::Found)
                .map_err(|_| unexpected(call, &result)),
        }
    }
}

fn unexpected(call: Call<'_>, result: &Value) -> ApiError {
    ApiError::UnexpectedResponse {
        expected: call.action(),
        body: result.to_string(),
    }
}
