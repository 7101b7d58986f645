pub mod handlers;
pub mod session;
pub mod templates;

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;

use crate::account::AccountService;
use handlers::{
    health, login, logout, mypage, pages, register, CREATE_ACCOUNT_PATH, LOGIN_PATH, LOGOUT_PATH,
    MYPAGE_PATH, REGISTER_PATH, TOP_PATH,
};
use session::{require_session, SessionState};
use templates::STYLESHEET_PATH;

/// Build the application router.
///
/// `/v1/mypage` is the only gated route; everything else is public.
pub fn router(accounts: Arc<AccountService>, sessions: Arc<SessionState>) -> Router {
    Router::new()
        .route(TOP_PATH, get(pages::top))
        .route(CREATE_ACCOUNT_PATH, get(pages::create_account_page))
        .route(REGISTER_PATH, post(register::register))
        .route(LOGIN_PATH, post(login::login))
        .route(
            MYPAGE_PATH,
            get(mypage::mypage).route_layer(middleware::from_fn(require_session)),
        )
        .route(LOGOUT_PATH, post(logout::logout))
        .route("/health", get(health::health))
        .route(STYLESHEET_PATH, get(pages::stylesheet))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(CookieManagerLayer::new())
                .layer(Extension(accounts))
                .layer(Extension(sessions)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(
    port: u16,
    accounts: Arc<AccountService>,
    sessions: Arc<SessionState>,
) -> Result<()> {
    let app = router(accounts, sessions);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {err}");
                std::future::pending::<()>().await;
            }
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
