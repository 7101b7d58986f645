use axum::{
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::account::AccountService;
use crate::GIT_COMMIT_HASH;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    store: String,
}

/// `GET|HEAD /health`: 200 when the user store answers, 503 otherwise.
pub async fn health(method: Method, accounts: Extension<Arc<AccountService>>) -> impl IntoResponse {
    let store = accounts.store();
    let result = store.ping().await;
    if let Err(ref err) = result {
        error!("Health check failed for {} store: {err:#}", store.kind());
    }

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: if result.is_ok() {
            format!("{}:ok", store.kind())
        } else {
            format!("{}:error", store.kind())
        },
    };

    let short_hash = GIT_COMMIT_HASH.get(0..7).unwrap_or_default();

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!(
        "{}:{}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_hash
    )) {
        headers.insert("X-App", value);
    }

    let status = if result.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    if method == Method::HEAD {
        return (status, headers).into_response();
    }

    (status, headers, Json(health)).into_response()
}
