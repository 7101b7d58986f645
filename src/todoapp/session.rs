//! Cookie-backed sessions and the session gate.
//!
//! The cookie carries a random token; the attribute bag it points to lives in
//! process memory until it expires. Raw tokens are 32 random bytes, URL-safe
//! base64 without padding.

use anyhow::{Context, Result};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;
use tower_cookies::{
    cookie::{time, SameSite},
    Cookie, Cookies,
};
use tracing::debug;

use super::handlers::{found, TOP_PATH};

pub const DEFAULT_SESSION_NAME: &str = "todoapp";

pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 12 * 60 * 60;

/// Attribute under which the logged-in user's identifier is stored.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Cookie settings for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    name: String,
    secure: bool,
    ttl_seconds: i64,
}

impl SessionConfig {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            secure: false,
            ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn with_ttl_seconds(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn secure(&self) -> bool {
        self.secure
    }

    #[must_use]
    pub const fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Session lifetime; a negative TTL counts as zero.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(u64::try_from(self.ttl_seconds).unwrap_or(0))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_NAME.to_string())
    }
}

/// Attribute bag attached to a session token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    attributes: HashMap<String, String>,
}

impl SessionData {
    #[must_use]
    pub fn for_user(user_id: &str) -> Self {
        let mut data = Self::default();
        data.insert(SESSION_USER_ID_KEY, user_id);
        data
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.get(SESSION_USER_ID_KEY)
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    data: SessionData,
    expires_at: Instant,
}

impl SessionEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory token to attribute bag map. Sessions are lost on restart.
///
/// Expired entries are never returned and are pruned whenever a session is created.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(SessionConfig::default().ttl())
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Store `data` under a fresh token and return the token.
    ///
    /// # Errors
    /// Return error if the OS random source fails
    pub async fn create(&self, data: SessionData) -> Result<String> {
        let token = generate_session_token()?;
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.is_live(now));
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!("Pruned {pruned} expired sessions");
        }
        sessions.insert(
            token.clone(),
            SessionEntry {
                data,
                expires_at: now + self.ttl,
            },
        );
        Ok(token)
    }

    pub async fn get(&self, token: &str) -> Option<SessionData> {
        let sessions = self.sessions.read().await;
        let entry = sessions.get(token)?;
        entry.is_live(Instant::now()).then(|| entry.data.clone())
    }

    /// Returns `true` when a session was removed.
    pub async fn destroy(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Session store plus the cookie settings used to address it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    store: SessionStore,
    config: SessionConfig,
}

impl SessionState {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: SessionStore::with_ttl(config.ttl()),
            config,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create a session for `user_id` and set its cookie.
    ///
    /// Any session named by the request's cookie is dropped first.
    ///
    /// # Errors
    /// Return error if no token could be generated
    pub async fn login(&self, cookies: &Cookies, user_id: &str) -> Result<()> {
        if let Some(previous) = cookies.get(self.config.name()) {
            self.store.destroy(previous.value()).await;
        }
        let token = self.store.create(SessionData::for_user(user_id)).await?;
        cookies.add(self.session_cookie(token));
        Ok(())
    }

    /// Drop the session entry and expire the cookie, if the request had one.
    pub async fn logout(&self, cookies: &Cookies) {
        if let Some(cookie) = cookies.get(self.config.name()) {
            if !self.store.destroy(cookie.value()).await {
                debug!("Session cookie did not match a live session");
            }
            cookies.remove(self.removal_cookie());
        }
    }

    /// Resolve the request's cookie into its session, if any.
    pub async fn current(&self, cookies: &Cookies) -> Option<SessionData> {
        let cookie = cookies.get(self.config.name())?;
        self.store.get(cookie.value()).await
    }

    fn session_cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.config.name().to_string(), token);
        cookie.set_http_only(true);
        cookie.set_path("/");
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(time::Duration::seconds(self.config.ttl_seconds().max(0)));
        if self.config.secure() {
            cookie.set_secure(true);
        }
        cookie
    }

    fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.config.name().to_string(), ""))
            .path("/")
            .build()
    }
}

/// The authenticated user, inserted into request extensions by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
}

/// Session gate: only let requests with a `user_id` session through.
///
/// Anything else is redirected to the top page and the inner handler never runs.
pub async fn require_session(
    Extension(sessions): Extension<Arc<SessionState>>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = sessions
        .current(&cookies)
        .await
        .and_then(|data| data.user_id().map(str::to_string));

    match user_id {
        Some(user_id) => {
            request.extensions_mut().insert(CurrentUser { user_id });
            next.run(request).await
        }
        None => found(TOP_PATH).into_response(),
    }
}

/// Create a new session token for the cookie.
///
/// # Errors
/// Return error if the OS random source fails
pub fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_is_32_bytes_url_safe() -> Result<()> {
        let token = generate_session_token()?;
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        let decoded = Base64UrlUnpadded::decode_vec(&token)
            .map_err(|err| anyhow::anyhow!("decode failed: {err}"))?;
        assert_eq!(decoded.len(), 32);
        Ok(())
    }

    #[test]
    fn session_tokens_differ() -> Result<()> {
        assert_ne!(generate_session_token()?, generate_session_token()?);
        Ok(())
    }

    #[test]
    fn session_data_holds_user_id() {
        let data = SessionData::for_user("valid_user");
        assert_eq!(data.user_id(), Some("valid_user"));
        assert_eq!(data.get(SESSION_USER_ID_KEY), Some("valid_user"));
        assert_eq!(SessionData::default().user_id(), None);
    }

    #[tokio::test]
    async fn store_create_get_destroy() -> Result<()> {
        let store = SessionStore::new();
        let token = store.create(SessionData::for_user("valid_user")).await?;

        let data = store.get(&token).await;
        assert_eq!(data.as_ref().and_then(SessionData::user_id), Some("valid_user"));
        assert_eq!(store.len().await, 1);

        assert!(store.destroy(&token).await);
        assert!(!store.destroy(&token).await);
        assert!(store.get(&token).await.is_none());
        assert!(store.is_empty().await);
        Ok(())
    }

    #[tokio::test]
    async fn expired_sessions_are_hidden_and_pruned() -> Result<()> {
        let store = SessionStore::with_ttl(Duration::ZERO);
        let first = store.create(SessionData::for_user("valid_user")).await?;
        assert!(store.get(&first).await.is_none());

        let second = store.create(SessionData::for_user("valid_user")).await?;
        assert!(store.get(&second).await.is_none());
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn live_sessions_survive_pruning() -> Result<()> {
        let store = SessionStore::with_ttl(Duration::from_secs(60));
        let first = store.create(SessionData::for_user("first")).await?;
        let second = store.create(SessionData::for_user("second")).await?;
        assert_eq!(store.len().await, 2);
        assert_eq!(
            store.get(&first).await.as_ref().and_then(SessionData::user_id),
            Some("first")
        );
        assert_eq!(
            store.get(&second).await.as_ref().and_then(SessionData::user_id),
            Some("second")
        );
        Ok(())
    }

    #[test]
    fn session_cookie_attributes() {
        let state = SessionState::new(SessionConfig::default().with_secure(true));
        let cookie = state.session_cookie("token".to_string());
        assert_eq!(cookie.name(), "todoapp");
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(DEFAULT_SESSION_TTL_SECONDS))
        );
    }

    #[test]
    fn config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.name(), DEFAULT_SESSION_NAME);
        assert!(!config.secure());
        assert_eq!(config.ttl_seconds(), DEFAULT_SESSION_TTL_SECONDS);
        assert_eq!(SessionConfig::default().with_ttl_seconds(-5).ttl(), Duration::ZERO);
    }
}
