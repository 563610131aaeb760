use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use clients_sdk::ClientsError;
use http::{HeaderValue, StatusCode, header};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::error::DomainError;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 9457 problem details.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl Problem {
    #[must_use]
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
            instance: None,
            trace_id: tracing::Span::current()
                .id()
                .map(|id| id.into_u64().to_string()),
        }
    }

    #[must_use]
    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

const TYPE_BASE: &str = "https://errors.client-manager.dev/";

/// Map each `ClientsError` kind to exactly one problem document.
#[must_use]
pub fn clients_error_to_problem(e: &ClientsError) -> Problem {
    match e {
        ClientsError::MalformedInput { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Malformed input", message.clone())
                .with_type(format!("{TYPE_BASE}malformed-input"))
        }
        ClientsError::MalformedClient { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Malformed client", message.clone())
                .with_type(format!("{TYPE_BASE}malformed-client"))
        }
        ClientsError::InvalidCredentials => Problem::new(
            StatusCode::BAD_REQUEST,
            "Invalid credentials",
            "The supplied credentials are not valid",
        )
        .with_type(format!("{TYPE_BASE}invalid-credentials")),
        ClientsError::Unauthorized => Problem::new(
            StatusCode::FORBIDDEN,
            "Unauthorized",
            "Missing or invalid access credential",
        )
        .with_type(format!("{TYPE_BASE}unauthorized")),
        ClientsError::Conflict { identifier } => Problem::new(
            StatusCode::CONFLICT,
            "Conflict",
            format!("'{identifier}' already exists"),
        )
        .with_type(format!("{TYPE_BASE}conflict")),
        ClientsError::NotFound => Problem::new(
            StatusCode::NOT_FOUND,
            "Not found",
            "The requested client was not found",
        )
        .with_type(format!("{TYPE_BASE}not-found")),
        // Logged where the failure was raised; the detail stays server-side.
        ClientsError::StorageFailure { .. } => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error",
            "An internal error occurred",
        )
        .with_type(format!("{TYPE_BASE}internal")),
    }
}

impl From<ClientsError> for Problem {
    fn from(e: ClientsError) -> Self {
        clients_error_to_problem(&e)
    }
}

/// Implement `From<DomainError>` so `?` works in handlers
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        ClientsError::from(e).into()
    }
}

impl From<JsonRejection> for Problem {
    fn from(rejection: JsonRejection) -> Self {
        Problem::new(
            StatusCode::BAD_REQUEST,
            "Malformed request body",
            rejection.body_text(),
        )
        .with_type(format!("{TYPE_BASE}malformed-body"))
    }
}

pub type ApiResult<T> = Result<T, Problem>;
