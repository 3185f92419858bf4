//! Request inputs and response payloads for the Polr API.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Input of the shorten operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub long_url: String,
    #[serde(default)]
    pub custom_ending: Option<String>,
    #[serde(default)]
    pub is_secret: bool,
}

impl ShortenRequest {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            custom_ending: None,
            is_secret: false,
        }
    }

    pub fn custom_ending(mut self, ending: impl Into<String>) -> Self {
        self.custom_ending = Some(ending.into());
        self
    }

    pub fn secret(mut self, is_secret: bool) -> Self {
        self.is_secret = is_secret;
        self
    }
}

/// Input of the lookup operation.
///
/// `short_url` may be a bare ending (`5N3f8`) or a full short URL on the
/// configured server (`https://ti.ny/5N3f8`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub short_url: String,
    #[serde(default)]
    pub url_key: Option<String>,
}

impl LookupRequest {
    pub fn new(short_url: impl Into<String>) -> Self {
        Self {
            short_url: short_url.into(),
            url_key: None,
        }
    }

    pub fn url_key(mut self, key: impl Into<String>) -> Self {
        self.url_key = Some(key.into());
        self
    }
}

/// Timestamp as serialized by the Polr server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolrTimestamp {
    pub date: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub timezone_type: Option<u8>,
}

/// A `created_at`/`updated_at` value: either the structured form or a bare
/// date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkTimestamp {
    Structured(PolrTimestamp),
    Plain(String),
}

impl LinkTimestamp {
    pub fn date(&self) -> &str {
        match self {
            LinkTimestamp::Structured(ts) => &ts.date,
            LinkTimestamp::Plain(date) => date,
        }
    }
}

/// Metadata the server returns for an existing short URL.
///
/// Only `long_url` is required. Fields without a typed counterpart are kept
/// in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub long_url: String,
    #[serde(
        default,
        deserialize_with = "clicks_from_number_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub clicks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<LinkTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<LinkTimestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts `42` as well as `"42"`.
fn clicks_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Clicks {
        Number(u64),
        Text(String),
    }

    match Option::<Clicks>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Clicks::Number(n)) => Ok(Some(n)),
        Some(Clicks::Text(text)) => text.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

/// Outcome of a lookup that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(LinkInfo),
    /// The server answered 404: no short URL with that ending exists.
    NotFound,
}

impl Lookup {
    pub fn found(self) -> Option<LinkInfo> {
        match self {
            Lookup::Found(info) => Some(info),
            Lookup::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clicks_accepts_number_or_numeric_string() {
        let info: LinkInfo =
            serde_json::from_value(json!({"long_url": "https://example.com", "clicks": 42})).unwrap();
        assert_eq!(info.clicks, Some(42));
        let info: LinkInfo =
            serde_json::from_value(json!({"long_url": "https://example.com", "clicks": " 42"})).unwrap();
        assert_eq!(info.clicks, Some(42));
        let info: LinkInfo =
            serde_json::from_value(json!({"long_url": "https://example.com", "clicks": null})).unwrap();
        assert_eq!(info.clicks, None);
    }

    #[test]
    fn non_numeric_clicks_is_rejected() {
        let result: Result<LinkInfo, _> =
            serde_json::from_value(json!({"long_url": "https://example.com", "clicks": "many"}));
        assert!(result.is_err());
    }

    #[test]
    fn timestamps_accept_object_or_string() {
        let info: LinkInfo = serde_json::from_value(json!({
            "long_url": "https://example.com",
            "created_at": {"date": "2017-12-03 00:40:45.000000", "timezone": "UTC", "timezone_type": 3},
            "updated_at": "2017-12-24 13:37:00"
        }))
        .unwrap();
        assert!(matches!(info.created_at, Some(LinkTimestamp::Structured(_))));
        assert_eq!(info.created_at.unwrap().date(), "2017-12-03 00:40:45.000000");
        assert_eq!(
            info.updated_at,
            Some(LinkTimestamp::Plain("2017-12-24 13:37:00".to_string()))
        );
    }

    #[test]
    fn unknown_fields_are_kept() {
        let info: LinkInfo = serde_json::from_value(json!({
            "long_url": "https://example.com",
            "short_url": "https://ti.ny/abcd",
            "is_disabled": false
        }))
        .unwrap();
        assert_eq!(info.extra["short_url"], "https://ti.ny/abcd");
        assert_eq!(info.extra["is_disabled"], false);
        assert!(!info.extra.contains_key("long_url"));
    }

    #[test]
    fn long_url_is_required() {
        let result: Result<LinkInfo, _> = serde_json::from_value(json!({"clicks": 1}));
        assert!(result.is_err());
    }
}
