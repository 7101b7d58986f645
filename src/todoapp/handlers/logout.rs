use axum::{extract::Extension, response::IntoResponse};
use std::sync::Arc;
use tower_cookies::Cookies;

use super::{found, TOP_PATH};
use crate::todoapp::session::SessionState;

/// `POST /v1/logout`: always redirects to the top page, session or not.
pub async fn logout(
    sessions: Extension<Arc<SessionState>>,
    cookies: Cookies,
) -> impl IntoResponse {
    sessions.logout(&cookies).await;
    found(TOP_PATH)
}
