use axum::{extract::Extension, http::StatusCode, response::Response};

use super::render;
use crate::todoapp::{session::CurrentUser, templates::MyPage};

/// `GET /v1/mypage`, mounted behind the session gate.
pub async fn mypage(Extension(user): Extension<CurrentUser>) -> Response {
    render(
        StatusCode::OK,
        &MyPage {
            user_id: user.user_id,
        },
    )
}
