//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and classifies `HttpResponse` values
//! without touching the network itself; a `Transport` executes the round-trip.
//!
//! The Polr API is GET-only, so every operation parameter travels in the
//! query string and requests never carry a body.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// An HTTP request described as plain data.
///
/// Built by `PolrClient::build_*` methods. Query pairs are kept in insertion
/// order and contain no duplicate keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub(crate) fn get(url: &str) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.to_string(),
            query: Vec::new(),
        }
    }

    /// Set a query parameter, replacing any earlier value for the same key.
    pub(crate) fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.query.push((key.to_string(), value)),
        }
        self
    }

    /// Like `param`, but does nothing when `value` is `None`.
    pub(crate) fn opt_param(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Value of a query parameter, if present.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by a `Transport` after executing an `HttpRequest`, then passed
/// to `PolrClient::parse_*` for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_replaces_existing_key_in_place() {
        let req = HttpRequest::get("http://ti.ny/api/v2/action/shorten")
            .param("key", "a")
            .param("response_type", "json")
            .param("key", "b");
        assert_eq!(
            req.query,
            vec![
                ("key".to_string(), "b".to_string()),
                ("response_type".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn opt_param_skips_none() {
        let req = HttpRequest::get("http://ti.ny")
            .opt_param("url_key", None)
            .opt_param("url_ending", Some("abcd"));
        assert_eq!(req.query.len(), 1);
        assert_eq!(req.query_value("url_ending"), Some("abcd"));
        assert_eq!(req.query_value("url_key"), None);
    }
}
