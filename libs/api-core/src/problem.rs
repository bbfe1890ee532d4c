use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// RFC 9457 Problem Details for HTTP APIs.
///
/// `code` carries the stable machine-readable error code the clients
/// switch on; `detail` is a safe human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    title = "Problem",
    description = "RFC 9457 Problem Details for HTTP APIs"
)]
pub struct Problem {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The HTTP status code for this occurrence of the problem.
    pub status: u16,
    /// A human-readable explanation specific to this occurrence.
    pub detail: String,
    /// A URI reference that identifies the specific occurrence.
    pub instance: String,
    /// Machine-readable error code defined by the application.
    pub code: String,
    /// Request id useful for tracing, when one is known.
    pub request_id: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_string(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
            instance: String::new(),
            code: String::new(),
            request_id: None,
        }
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// Axum response wrapper that renders `Problem` with correct status & content type.
#[derive(Debug, Clone)]
pub struct ProblemResponse(pub Problem);

impl From<Problem> for ProblemResponse {
    fn from(p: Problem) -> Self {
        Self(p)
    }
}

impl IntoResponse for ProblemResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut resp = axum::Json(self.0).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

/// Build a `ProblemResponse` from its usual parts with less boilerplate.
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    ProblemResponse(
        Problem::new(status, title, detail)
            .with_code(code)
            .with_instance(instance),
    )
}

pub fn bad_request(code: &str, detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(StatusCode::BAD_REQUEST, code, "Bad Request", detail, instance)
}

pub fn unauthorized(code: &str, detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::UNAUTHORIZED,
        code,
        "Unauthorized",
        detail,
        instance,
    )
}

pub fn not_found(code: &str, detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(StatusCode::NOT_FOUND, code, "Not Found", detail, instance)
}

pub fn conflict(code: &str, detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(StatusCode::CONFLICT, code, "Conflict", detail, instance)
}

pub fn internal_error(instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_SERVER_ERROR",
        "Internal Server Error",
        "An internal error occurred",
        instance,
    )
}
