use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

use super::render;
use crate::todoapp::templates::{CreateAccountPage, TopPage, STYLESHEET};

pub async fn top() -> Response {
    render(StatusCode::OK, &TopPage::default())
}

pub async fn create_account_page() -> Response {
    render(StatusCode::OK, &CreateAccountPage::default())
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}
