//! Blocking facade over `PolrClient` and a `Transport`.

use crate::client::PolrClient;
use crate::endpoints::DEFAULT_API_ROOT;
use crate::error::{no_raise, ApiError};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Lookup, LookupRequest, ShortenRequest};

/// Polr API client that performs one blocking round-trip per call.
///
/// Configuration is read-only after construction, so a `PolrApi` can be
/// shared between threads whenever its transport can.
pub struct PolrApi<T = UreqTransport> {
    client: PolrClient,
    transport: T,
}

impl PolrApi<UreqTransport> {
    /// Client for `server` using the default API root `/api/v2/`.
    pub fn new(server: &str, api_key: &str) -> Self {
        Self::with_root(server, api_key, DEFAULT_API_ROOT)
    }

    pub fn with_root(server: &str, api_key: &str, api_root: &str) -> Self {
        Self::with_transport(PolrClient::new(server, api_key, api_root), UreqTransport::new())
    }
}

impl<T: Transport> PolrApi<T> {
    pub fn with_transport(client: PolrClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PolrClient {
        &self.client
    }

    /// Create a short URL for `long_url`.
    ///
    /// Fails with `CustomEndingUnavailable` when `custom_ending` is already
    /// taken and with `QuotaExceeded` once the key's quota is used up.
    pub fn shorten(
        &self,
        long_url: &str,
        custom_ending: Option<&str>,
        is_secret: bool,
    ) -> Result<String, ApiError> {
        let input = ShortenRequest {
            long_url: long_url.to_string(),
            custom_ending: custom_ending.map(str::to_string),
            is_secret,
        };
        self.shorten_request(&input)
    }

    pub fn shorten_request(&self, input: &ShortenRequest) -> Result<String, ApiError> {
        let request = self.client.build_shorten(input);
        tracing::debug!(url = %request.url, long_url = %input.long_url, "shorten");
        self.client
            .parse_shorten(input, self.transport.execute(&request))
    }

    /// Look up a short URL or bare ending.
    ///
    /// `url_key` is the access key of a secret short URL. An unknown ending
    /// yields `Ok(Lookup::NotFound)`.
    pub fn lookup(&self, short_url: &str, url_key: Option<&str>) -> Result<Lookup, ApiError> {
        let input = LookupRequest {
            short_url: short_url.to_string(),
            url_key: url_key.map(str::to_string),
        };
        self.lookup_request(&input)
    }

    pub fn lookup_request(&self, input: &LookupRequest) -> Result<Lookup, ApiError> {
        let request = self.client.build_lookup(input);
        tracing::debug!(url = %request.url, short_url = %input.short_url, "lookup");
        self.client
            .parse_lookup(input, self.transport.execute(&request))
    }

    /// `shorten`, with any error turned into `None`.
    pub fn shorten_no_raise(
        &self,
        long_url: &str,
        custom_ending: Option<&str>,
        is_secret: bool,
    ) -> Option<String> {
        no_raise(self.shorten(long_url, custom_ending, is_secret))
    }

    /// `lookup`, with any error turned into `None`. `Some(Lookup::NotFound)`
    /// still reports a missing short URL.
    pub fn lookup_no_raise(&self, short_url: &str, url_key: Option<&str>) -> Option<Lookup> {
        no_raise(self.lookup(short_url, url_key))
    }
}

impl<T> std::fmt::Debug for PolrApi<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PolrApi({})", self.client.endpoints().base())
    }
}
