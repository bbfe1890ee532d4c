//! Session cookie handling and the auth middleware other modules sit
//! behind.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use api_core::problem;

use crate::contract::client::AccountsApi;

/// Name of the session cookie, as the original board uses.
pub const SESSION_COOKIE: &str = "sid";

/// Build the session cookie. Lifetime is enforced server-side by the
/// session store's rolling TTL, so the cookie itself is a browser-session
/// cookie.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// A cookie that clears the session on the client.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Middleware guarding a router behind a live session.
///
/// Resolves the `sid` cookie through the accounts contract client and
/// inserts the resulting [`AuthContext`](crate::contract::model::AuthContext)
/// into request extensions for downstream handlers.
pub async fn require_auth(
    State(api): State<Arc<dyn AccountsApi>>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let instance = req.uri().path().to_owned();

    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return problem::unauthorized("UNAUTHORIZED", "Authentication required", &instance)
            .into_response();
    };

    match api.authenticate(cookie.value()).await {
        Ok(ctx) => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(_) => {
            problem::unauthorized("SESSION_EXPIRED", "The session is missing or has expired", &instance)
                .into_response()
        }
    }
}
