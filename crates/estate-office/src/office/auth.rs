//! Session-based authentication for the back office.
//!
//! One administrator account comes from configuration; logging in issues an
//! opaque uuid token kept in an in-memory session table and handed to the
//! browser as an HttpOnly cookie. The `require_session` middleware guards
//! the `/api` routes. Message strings match what the SPA already expects.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::config::AuthConfig;

pub const SESSION_COOKIE: &str = "office_session";

/// The authenticated user attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// In-memory session table plus the configured administrator credentials.
pub struct SessionStore {
    admin: AuthConfig,
    sessions: Mutex<HashMap<String, SessionUser>>,
}

impl SessionStore {
    pub fn new(admin: AuthConfig) -> Self {
        Self {
            admin,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Verifies credentials and opens a session, returning the token.
    pub fn login(&self, email: &str, password: &str) -> Option<(String, SessionUser)> {
        if !email.eq_ignore_ascii_case(&self.admin.admin_email)
            || password != self.admin.admin_password
        {
            return None;
        }
        let user = SessionUser {
            id: 1,
            name: self.admin.admin_name.clone(),
            email: self.admin.admin_email.clone(),
        };
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.insert(token.clone(), user.clone());
        Some((token, user))
    }

    pub fn user(&self, token: &str) -> Option<SessionUser> {
        let sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.get(token).cloned()
    }

    pub fn logout(&self, token: &str) {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.remove(token);
    }
}

/// Router for session establishment and teardown, plus the current-user
/// endpoint mounted under `/api`.
pub fn auth_router(sessions: Arc<SessionStore>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/api/user", get(current_user_handler))
        .with_state(sessions)
}

/// Rejects `/api` requests that do not carry a live session cookie.
pub async fn require_session(
    State(sessions): State<Arc<SessionStore>>,
    request: Request,
    next: Next,
) -> Response {
    let authenticated = session_token(request.headers())
        .and_then(|token| sessions.user(&token))
        .is_some();
    if !authenticated {
        return unauthenticated();
    }
    next.run(request).await
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthenticated." })),
    )
        .into_response()
}

/// Extracts the session token from the Cookie header, if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .map(str::to_string)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

async fn login_handler(
    State(sessions): State<Arc<SessionStore>>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    let mut errors = serde_json::Map::new();
    if payload.email.as_deref().unwrap_or("").trim().is_empty() {
        errors.insert(
            "email".to_string(),
            json!(["The email field is required."]),
        );
    }
    if payload.password.as_deref().unwrap_or("").is_empty() {
        errors.insert(
            "password".to_string(),
            json!(["The password field is required."]),
        );
    }
    if !errors.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Validation failed", "errors": errors })),
        )
            .into_response();
    }

    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    match sessions.login(email.trim(), &password) {
        Some((token, user)) => {
            let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                Json(json!({ "user": user, "message": "Login successful" })),
            )
                .into_response()
        }
        None => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "These credentials do not match our records.",
                "errors": { "email": ["These credentials do not match our records."] },
            })),
        )
            .into_response(),
    }
}

async fn logout_handler(State(sessions): State<Arc<SessionStore>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        sessions.logout(&token);
    }
    let expired = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, expired)],
    )
        .into_response()
}

async fn current_user_handler(
    State(sessions): State<Arc<SessionStore>>,
    headers: HeaderMap,
) -> Response {
    match session_token(&headers).and_then(|token| sessions.user(&token)) {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => unauthenticated(),
    }
}
