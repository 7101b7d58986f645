//! Route handlers and the response helpers they share.

pub mod health;
pub mod login;
pub mod logout;
pub mod mypage;
pub mod pages;
pub mod register;


use axum::{
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};

use super::templates::Page;

pub const TOP_PATH: &str = "/v1/top";
pub const CREATE_ACCOUNT_PATH: &str = "/v1/create_account_page";
pub const REGISTER_PATH: &str = "/v1/register";
pub const LOGIN_PATH: &str = "/v1/login";
pub const MYPAGE_PATH: &str = "/v1/mypage";
pub const LOGOUT_PATH: &str = "/v1/logout";

/// `302 Found` redirect.
///
/// axum's `Redirect` only offers 303/307/308; login, logout and the session
/// gate answer with 302.
pub fn found(location: &'static str) -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [(LOCATION, HeaderValue::from_static(location))],
    )
}

/// Render `page` as HTML with `status`.
pub fn render<P: Page>(status: StatusCode, page: &P) -> Response {
    (status, Html(page.render())).into_response()
}
