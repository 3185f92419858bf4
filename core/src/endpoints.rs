//! Canonical endpoint URLs for a Polr server.
//!
//! # Design
//! The server URL is stored without a trailing slash and the API root with
//! exactly one leading and one trailing slash, so every endpoint is a plain
//! concatenation `{server}{root}{path}`. Normalizing an already normalized
//! pair is a no-op.

/// API root used when none is configured.
pub const DEFAULT_API_ROOT: &str = "/api/v2/";

const SHORTEN_PATH: &str = "action/shorten";
const LOOKUP_PATH: &str = "action/lookup";
const LINK_DATA_PATH: &str = "data/link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    server: String,
    root: String,
}

impl Endpoints {
    pub fn new(server: &str, root: &str) -> Self {
        Self {
            server: normalize_server(server),
            root: normalize_root(root),
        }
    }

    /// Server URL without trailing slash, e.g. `https://ti.ny`.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// API root with leading and trailing slash, e.g. `/api/v2/`.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn base(&self) -> String {
        format!("{}{}", self.server, self.root)
    }

    pub fn shorten(&self) -> String {
        self.endpoint(SHORTEN_PATH)
    }

    pub fn lookup(&self) -> String {
        self.endpoint(LOOKUP_PATH)
    }

    /// Link statistics endpoint. The client exposes the URL but issues no
    /// calls against it.
    pub fn link_data(&self) -> String {
        self.endpoint(LINK_DATA_PATH)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{path}", self.server, self.root)
    }
}

pub fn normalize_server(server: &str) -> String {
    server.trim_end_matches('/').to_string()
}

pub fn normalize_root(root: &str) -> String {
    let inner = root.trim_matches('/');
    if inner.is_empty() {
        "/".to_string()
    } else {
        format!("/{inner}/")
    }
}
