use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::error;

use super::{render, TOP_PATH};
use crate::account::{AccountError, AccountService, NewAccount};
use crate::todoapp::templates::CreateAccountPage;

/// `POST /v1/register`
///
/// Success redirects to the top page with `303 See Other`. Any failure
/// re-renders the form with the messages and the entered `user_id`/`name`:
/// `200` for rejected input, `500` with a generic message for store faults.
pub async fn register(
    accounts: Extension<Arc<AccountService>>,
    Form(account): Form<NewAccount>,
) -> Response {
    let user_id = account.user_id.clone();
    let name = account.name.clone();

    match accounts.register(account).await {
        Ok(()) => Redirect::to(TOP_PATH).into_response(),
        Err(err) => {
            let status = if let AccountError::Store(ref inner) = err {
                error!("Failed to register account: {inner:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::OK
            };
            let page = CreateAccountPage {
                errors: err.messages(),
                user_id,
                name,
            };
            render(status, &page)
        }
    }
}
