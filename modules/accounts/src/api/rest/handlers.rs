use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension, Json,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info};

use api_core::problem::ProblemResponse;

use crate::api::rest::auth::{removal_cookie, session_cookie, SESSION_COOKIE};
use crate::api::rest::dto::{
    AccountDto, ChangePasswordReq, LoginReq, SessionUserDto, SignupReq,
};
use crate::api::rest::error::map_domain_error;
use crate::domain::error::DomainError;
use crate::domain::service::Service;

/// Register a new account and open a session for it
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupReq,
    responses(
        (status = 201, description = "Account created, session cookie set", body = AccountDto),
        (status = 400, description = "Bad Request", body = api_core::Problem),
        (status = 409, description = "Username or email taken", body = api_core::Problem),
    )
)]
pub async fn signup(
    Extension(svc): Extension<Arc<Service>>,
    jar: CookieJar,
    uri: Uri,
    Json(req_body): Json<SignupReq>,
) -> Result<(StatusCode, CookieJar, Json<AccountDto>), ProblemResponse> {
    info!("Signing up user '{}'", req_body.username);

    match svc.sign_up(req_body.into()).await {
        Ok(opened) => {
            let jar = jar.add(session_cookie(opened.token));
            Ok((
                StatusCode::CREATED,
                jar,
                Json(AccountDto::from(opened.account)),
            ))
        }
        Err(e) => {
            error!("Failed to sign up: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Authenticate and open a fresh session
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = AccountDto),
        (status = 400, description = "Bad Request", body = api_core::Problem),
        (status = 401, description = "Invalid credentials", body = api_core::Problem),
        (status = 429, description = "Too many attempts", body = api_core::Problem),
    )
)]
pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    jar: CookieJar,
    uri: Uri,
    Json(req_body): Json<LoginReq>,
) -> Response {
    info!("Login attempt for '{}'", req_body.username);

    match svc.login(req_body.into()).await {
        Ok(opened) => {
            let jar = jar.add(session_cookie(opened.token));
            (jar, Json(AccountDto::from(opened.account))).into_response()
        }
        Err(e) => {
            error!("Login failed: {}", e);
            let mut resp = map_domain_error(&e, uri.path()).into_response();
            if let DomainError::TooManyAttempts { retry_after_secs } = e {
                if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                    resp.headers_mut().insert(header::RETRY_AFTER, value);
                }
            }
            resp
        }
    }
}

/// Destroy the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses((status = 204, description = "Session destroyed, cookie cleared"))
)]
pub async fn logout(
    Extension(svc): Extension<Arc<Service>>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        svc.logout(cookie.value());
    }
    (jar.remove(removal_cookie()), StatusCode::NO_CONTENT)
}

/// Report the identity behind the current session, if any
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "auth",
    responses(
        (status = 200, description = "Live session", body = SessionUserDto),
        (status = 401, description = "Session missing or expired", body = api_core::Problem),
    )
)]
pub async fn session(
    Extension(svc): Extension<Arc<Service>>,
    jar: CookieJar,
    uri: Uri,
) -> Result<Json<SessionUserDto>, ProblemResponse> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or_else(|| map_domain_error(&DomainError::SessionExpired, uri.path()))?;

    match svc.current_session(&token) {
        Ok(session) => Ok(Json(SessionUserDto::from(session))),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

/// Change the password of the logged-in account
#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    tag = "auth",
    request_body = ChangePasswordReq,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Bad Request", body = api_core::Problem),
        (status = 401, description = "Not authenticated or wrong password", body = api_core::Problem),
    )
)]
pub async fn change_password(
    Extension(svc): Extension<Arc<Service>>,
    jar: CookieJar,
    uri: Uri,
    Json(req_body): Json<ChangePasswordReq>,
) -> Result<StatusCode, ProblemResponse> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or_else(|| map_domain_error(&DomainError::SessionExpired, uri.path()))?;

    let session = svc
        .current_session(&token)
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc
        .change_password(
            session.account_id,
            req_body.current_password,
            req_body.new_password,
        )
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to change password: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
