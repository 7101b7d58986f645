use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::{error, info};

use super::{found, render, MYPAGE_PATH};
use crate::account::{AccountError, AccountService, Credentials, STORE_MESSAGE};
use crate::todoapp::{
    session::SessionState,
    templates::{ErrorPage, TopPage},
};

/// `POST /v1/login`
///
/// Success creates a session and redirects to `/v1/mypage` with `302 Found`.
/// Bad credentials answer `401` with the top page; no cookie is set.
pub async fn login(
    accounts: Extension<Arc<AccountService>>,
    sessions: Extension<Arc<SessionState>>,
    cookies: Cookies,
    Form(credentials): Form<Credentials>,
) -> Response {
    let record = match accounts.authenticate(credentials).await {
        Ok(record) => record,
        Err(AccountError::Store(err)) => {
            error!("Failed to authenticate: {err:#}");
            return server_error();
        }
        Err(err) => {
            return render(StatusCode::UNAUTHORIZED, &TopPage::with_errors(err.messages()));
        }
    };

    if let Err(err) = sessions.login(&cookies, &record.user_id).await {
        error!("Failed to create session: {err:#}");
        return server_error();
    }

    info!(user_id = %record.user_id, "Logged in");

    found(MYPAGE_PATH).into_response()
}

fn server_error() -> Response {
    render(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ErrorPage {
            message: STORE_MESSAGE.to_string(),
        },
    )
}
