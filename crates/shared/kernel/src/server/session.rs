//! Server-side guest sessions keyed by an opaque cookie.
//!
//! The cookie carries only a random identifier; all state lives in a bounded
//! in-memory cache that forgets sessions after `ttl_seconds` of inactivity.

use crate::safe_nanoid;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use moka::sync::Cache;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};
use vows_domain::config::SessionConfig;
use vows_domain::gift::LinkClickState;

const SESSION_ID_LENGTH: usize = 24;

/// Everything the server remembers about one browser.
#[derive(Debug, Default)]
pub struct SessionData {
    pub link_clicks: LinkClickState,
    pub is_admin: bool,
}

type SharedSession = Arc<Mutex<SessionData>>;

#[derive(Debug)]
struct SessionStoreInner {
    cache: Cache<String, SharedSession>,
    cookie_name: String,
    ttl_seconds: u64,
    secure: bool,
}

/// Bounded, idle-expiring map of session id to [`SessionData`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

impl SessionStore {
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_idle(Duration::from_secs(config.ttl_seconds))
            .build();

        Self {
            inner: Arc::new(SessionStoreInner {
                cache,
                cookie_name: config.cookie_name.clone(),
                ttl_seconds: config.ttl_seconds,
                secure: config.secure,
            }),
        }
    }

    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.inner.cookie_name
    }

    /// Resolves a live session.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<GuestSession> {
        self.inner.cache.get(id).map(|data| GuestSession::new(Arc::from(id), data, self.clone()))
    }

    /// Starts an empty session with a fresh unguessable id.
    #[must_use]
    pub fn create(&self) -> GuestSession {
        self.create_with(SessionData::default())
    }

    /// Starts a session holding `data` under a fresh unguessable id.
    #[must_use]
    pub fn create_with(&self, data: SessionData) -> GuestSession {
        let id: Arc<str> = Arc::from(safe_nanoid!(SESSION_ID_LENGTH));
        let data = Arc::new(Mutex::new(data));
        self.inner.cache.insert(id.to_string(), data.clone());
        debug!(session = %id, "Guest session created");
        GuestSession::new(id, data, self.clone())
    }

    pub fn destroy(&self, id: &str) {
        self.inner.cache.invalidate(id);
        debug!(session = %id, "Guest session destroyed");
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner.cache.contains_key(id)
    }

    /// `Set-Cookie` value binding the browser to `id`.
    #[must_use]
    pub fn cookie(&self, id: &str) -> String {
        let mut cookie = format!(
            "{}={id}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            self.inner.cookie_name, self.inner.ttl_seconds
        );
        if self.inner.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value telling the browser to forget its session.
    #[must_use]
    pub fn expired_cookie(&self) -> String {
        let mut cookie =
            format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", self.inner.cookie_name);
        if self.inner.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Handle to the caller's session, inserted into request extensions by
/// [`session_layer`].
#[derive(Debug, Clone)]
pub struct GuestSession {
    id: Arc<str>,
    data: SharedSession,
    store: SessionStore,
    /// Id that replaced this session during the current request.
    renewed: Arc<OnceLock<Arc<str>>>,
}

impl GuestSession {
    fn new(id: Arc<str>, data: SharedSession, store: SessionStore) -> Self {
        Self { id, data, store, renewed: Arc::default() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Locks the session for the rest of the request step.
    ///
    /// Holding the guard serializes concurrent requests of the same browser.
    pub async fn lock(&self) -> MutexGuard<'_, SessionData> {
        self.data.lock().await
    }

    /// Drops the session from the store; the response clears the cookie.
    pub fn destroy(&self) {
        self.store.destroy(&self.id);
    }

    /// Moves the session data under a fresh id and drops the old one.
    ///
    /// Call before granting privileges so an id known before login never
    /// carries them. The response binds the browser to the new id.
    pub async fn renew(&self) -> Self {
        let data = std::mem::take(&mut *self.lock().await);
        let fresh = self.store.create_with(data);
        self.store.destroy(&self.id);
        if self.renewed.set(fresh.id.clone()).is_err() {
            warn!(session = %self.id, "Session renewed twice in one request");
        }
        fresh
    }
}

impl<S: Send + Sync> FromRequestParts<S> for GuestSession {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "Guest session layer is not installed"))
    }
}

/// Middleware resolving the session cookie into a [`GuestSession`].
///
/// Unknown or missing cookies start a new session and the response carries
/// its cookie. A renewed session gets the cookie of its replacement, a
/// destroyed one an expired cookie.
pub async fn session_layer(
    State(sessions): State<SessionStore>,
    mut request: Request,
    next: Next,
) -> Response {
    let presented = cookie_value(request.headers(), sessions.cookie_name());
    let resolved = presented.as_deref().and_then(|id| sessions.get(id));
    let is_new = resolved.is_none();
    let session = resolved.unwrap_or_else(|| sessions.create());

    request.extensions_mut().insert(session.clone());
    let mut response = next.run(request).await;

    let set_cookie = if let Some(renewed) = session.renewed.get() {
        Some(if sessions.contains(renewed) {
            sessions.cookie(renewed)
        } else {
            sessions.expired_cookie()
        })
    } else if !sessions.contains(session.id()) {
        Some(sessions.expired_cookie())
    } else if is_new {
        Some(sessions.cookie(session.id()))
    } else {
        None
    };

    if let Some(cookie) = set_cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            },
            Err(e) => warn!(error = %e, "Session cookie is not a valid header value"),
        }
    }

    response
}

/// Extracts the named cookie from every `Cookie` header.
#[must_use]
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(secure: bool) -> SessionStore {
        SessionStore::new(&SessionConfig { secure, ..SessionConfig::default() })
    }

    #[test]
    fn cookie_attributes() {
        let sessions = store(false);
        assert_eq!(
            sessions.cookie("abc"),
            "vows_sid=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=86400"
        );
        assert!(store(true).cookie("abc").ends_with("; Secure"));
        assert!(sessions.expired_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn cookie_lookup_scans_all_pairs() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; vows_sid=abc123"));
        assert_eq!(cookie_value(&headers, "vows_sid").as_deref(), Some("abc123"));
        assert_eq!(cookie_value(&headers, "other"), None);

        let mut empty = HeaderMap::new();
        empty.append(COOKIE, HeaderValue::from_static("vows_sid="));
        assert_eq!(cookie_value(&empty, "vows_sid"), None);
    }

    #[tokio::test]
    async fn sessions_are_isolated_and_destroyable() {
        let sessions = store(false);
        let a = sessions.create();
        let b = sessions.create();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id().len(), SESSION_ID_LENGTH);

        a.lock().await.link_clicks.mark("dutch-oven");
        assert!(!b.lock().await.link_clicks.contains("dutch-oven"));

        let again = sessions.get(a.id()).expect("live session");
        assert!(again.lock().await.link_clicks.contains("dutch-oven"));

        a.destroy();
        assert!(sessions.get(a.id()).is_none());
    }

    #[tokio::test]
    async fn renewal_moves_data_to_a_new_id() {
        let sessions = store(false);
        let guest = sessions.create();
        guest.lock().await.link_clicks.mark("kayak");

        let fresh = guest.renew().await;
        assert_ne!(fresh.id(), guest.id());
        assert!(!sessions.contains(guest.id()));
        assert!(fresh.lock().await.link_clicks.contains("kayak"));
        assert_eq!(guest.renewed.get().map(|id| &**id), Some(fresh.id()));
    }
}
