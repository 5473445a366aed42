use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_cookies::Cookies;

use super::AppState;
use crate::models::User;

pub const SESSION_COOKIE: &str = "session_id";
pub const SESSION_TTL_DAYS: i64 = 7;
pub const DEFAULT_REDIRECT_FIELD: &str = "next";

/// Per-route override for the name of the return-path query parameter the
/// login redirect carries. Layer it onto a route as an `Extension`.
#[derive(Clone, Copy, Debug)]
pub struct RedirectField(pub &'static str);

/// The logged-in user, resolved from the session cookie. Gated handlers take
/// this as an argument; a request without a valid session is redirected to
/// the login page before any body extraction or write can happen.
pub struct AuthUser(pub User);

/// Rejection carrying the login URL with the original path as return target.
pub struct LoginRedirect(String);

impl LoginRedirect {
    fn from_parts(parts: &Parts) -> Self {
        let field = parts
            .extensions
            .get::<RedirectField>()
            .map(|f| f.0)
            .unwrap_or(DEFAULT_REDIRECT_FIELD);
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        Self(format!("/login?{}={}", field, path))
    }
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&self.0).into_response()
    }
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state).await;
        let Ok(cookies) = cookies else {
            return Err(LoginRedirect::from_parts(parts));
        };

        let Some(cookie) = cookies.get(SESSION_COOKIE) else {
            return Err(LoginRedirect::from_parts(parts));
        };

        match state.repo.session_user(cookie.value()).await {
            Ok(Some(user)) => Ok(AuthUser(user)),
            _ => Err(LoginRedirect::from_parts(parts)),
        }
    }
}
