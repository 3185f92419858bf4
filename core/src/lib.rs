//! Synchronous client core for the Polr URL-shortener API.
//!
//! # Overview
//! Builds `HttpRequest` values, executes them through a `Transport`, and
//! classifies the responses into typed outcomes: a short URL, link metadata,
//! `Lookup::NotFound`, or an `ApiError`.
//!
//! # Design
//! - `PolrClient` is stateless: it holds only the normalized endpoints and
//!   the API key.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `classify` is the single place where status codes and body shapes are
//!   mapped to outcomes.
//! - `PolrApi` is the blocking facade most callers want, with `*_no_raise`
//!   variants for callers that prefer `Option` over error handling.

pub mod api;
pub mod classify;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::PolrApi;
pub use client::PolrClient;
pub use endpoints::{Endpoints, DEFAULT_API_ROOT};
pub use error::{no_raise, ApiError, ErrorKind, RejectedKey};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{LinkInfo, LinkTimestamp, Lookup, LookupRequest, PolrTimestamp, ShortenRequest};
