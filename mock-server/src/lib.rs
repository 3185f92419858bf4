use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct MockConfig {
    /// Prefix of generated short URLs, e.g. `http://127.0.0.1:3000`.
    pub public_url: String,
    pub api_key: String,
    /// Maximum number of links the key may create.
    pub quota: Option<usize>,
}

impl MockConfig {
    pub fn new(public_url: &str, api_key: &str) -> Self {
        Self {
            public_url: public_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            quota: None,
        }
    }

    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }
}

#[derive(Debug)]
struct Link {
    long_url: String,
    secret_key: Option<String>,
    clicks: u64,
}

#[derive(Default)]
struct Links {
    by_ending: HashMap<String, Link>,
    next_id: u64,
}

#[derive(Clone)]
struct AppState {
    config: Arc<MockConfig>,
    links: Arc<RwLock<Links>>,
}

pub fn app(config: MockConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        links: Arc::new(RwLock::new(Links::default())),
    };
    Router::new()
        .route("/api/v2/action/shorten", get(shorten))
        .route("/api/v2/action/lookup", get(lookup))
        .with_state(state)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

type Reply = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> Reply {
    (
        status,
        Json(json!({"status_code": status.as_u16(), "error": message})),
    )
}

fn authorized(state: &AppState, params: &HashMap<String, String>) -> Result<(), Reply> {
    match params.get("key") {
        Some(key) if *key == state.config.api_key => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Authentication token required.")),
    }
}

/// Base-36 encoding of `n`, used for generated endings.
pub fn encode_ending(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = Vec::new();
    loop {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn valid_custom_ending(ending: &str) -> bool {
    !ending.is_empty()
        && ending
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

async fn shorten(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    if let Err(reply) = authorized(&state, &params) {
        return reply;
    }
    let long_url = match params.get("url") {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => url.clone(),
        _ => return error(StatusCode::BAD_REQUEST, "Invalid URL."),
    };

    let mut links = state.links.write().await;
    if let Some(quota) = state.config.quota {
        if links.by_ending.len() >= quota {
            return error(StatusCode::FORBIDDEN, "Quota exceeded.");
        }
    }

    let ending = match params.get("custom_encoding") {
        Some(custom) if !valid_custom_ending(custom) => {
            return error(StatusCode::BAD_REQUEST, "Invalid custom ending.")
        }
        Some(custom) if links.by_ending.contains_key(custom) => {
            return error(StatusCode::BAD_REQUEST, "Custom ending already in use.")
        }
        Some(custom) => custom.clone(),
        None => loop {
            let candidate = encode_ending(links.next_id);
            links.next_id += 1;
            if !links.by_ending.contains_key(&candidate) {
                break candidate;
            }
        },
    };

    let secret_key = (params.get("is_secret").map(String::as_str) == Some("true"))
        .then(|| Uuid::new_v4().simple().to_string()[..6].to_string());
    let short_url = match &secret_key {
        Some(key) => format!("{}/{ending}/{key}", state.config.public_url),
        None => format!("{}/{ending}", state.config.public_url),
    };

    links.by_ending.insert(
        ending,
        Link {
            long_url,
            secret_key,
            clicks: 0,
        },
    );
    (
        StatusCode::OK,
        Json(json!({"action": "shorten", "result": short_url})),
    )
}

async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    if let Err(reply) = authorized(&state, &params) {
        return reply;
    }
    let Some(ending) = params.get("url_ending") else {
        return error(StatusCode::BAD_REQUEST, "Missing url_ending.");
    };

    let links = state.links.read().await;
    let Some(link) = links.by_ending.get(ending) else {
        return error(StatusCode::NOT_FOUND, "Link not found.");
    };
    if let Some(secret) = &link.secret_key {
        if params.get("url_key") != Some(secret) {
            return error(StatusCode::UNAUTHORIZED, "Invalid URL code for secret URL.");
        }
    }

    (
        StatusCode::OK,
        Json(json!({
            "action": "lookup",
            "result": {"long_url": link.long_url, "clicks": link.clicks},
        })),
    )
}
