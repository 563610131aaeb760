use std::sync::Arc;

use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use http::{StatusCode, header};
use uuid::Uuid;

use super::dto::{ClientDto, CreateClientReq, CredentialsReq, TokenDto};
use super::error::{ApiResult, Problem};
use super::extract::Credential;
use crate::module::ConcreteService;

/// A path segment that is not a UUID cannot name a stored client. The nil
/// UUID is never assigned, so lookups with it find nothing and deletes
/// remove nothing, after the credential has been checked as usual.
fn parse_client_id(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap_or(Uuid::nil())
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CredentialsReq,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Missing username or password", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Username already taken", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal error", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(
    Extension(svc): Extension<Arc<ConcreteService>>,
    body: Result<Json<CredentialsReq>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(req) = body?;
    svc.register(&req.username, &req.password).await?;
    Ok(StatusCode::CREATED)
}

/// Log in and obtain a credential
#[utoipa::path(
    post,
    path = "/tokens",
    tag = "users",
    request_body = CredentialsReq,
    responses(
        (status = 201, description = "Credential issued", body = TokenDto),
        (status = 400, description = "Invalid credentials", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal error", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(
    Extension(svc): Extension<Arc<ConcreteService>>,
    body: Result<Json<CredentialsReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TokenDto>)> {
    let Json(req) = body?;
    let token = svc.login(&req.username, &req.password).await?;
    Ok((StatusCode::CREATED, Json(TokenDto { token })))
}

/// Create a client owned by the caller
#[utoipa::path(
    post,
    path = "/clients",
    tag = "clients",
    request_body = CreateClientReq,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Client created; see the Location header"),
        (status = 400, description = "Malformed client", body = Problem, content_type = "application/problem+json"),
        (status = 403, description = "Missing or invalid credential", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal error", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn add_client(
    Extension(svc): Extension<Arc<ConcreteService>>,
    credential: Credential,
    body: Result<Json<CreateClientReq>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = body?;
    let id = svc.add_client(credential.as_str(), req.into()).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/clients/{id}"))],
    ))
}

/// Fetch one of the caller's clients
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Client UUID")),
    responses(
        (status = 200, description = "Client found", body = ClientDto),
        (status = 403, description = "Missing or invalid credential", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "No such client for this caller", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal error", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(skip_all, fields(client.id = %id))]
pub async fn view_client(
    Extension(svc): Extension<Arc<ConcreteService>>,
    credential: Credential,
    Path(id): Path<String>,
) -> ApiResult<Json<ClientDto>> {
    let client = svc
        .view_client(credential.as_str(), parse_client_id(&id))
        .await?;
    Ok(Json(client.into()))
}

/// Delete one of the caller's clients
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Client UUID")),
    responses(
        (status = 204, description = "Client removed (or never existed)"),
        (status = 403, description = "Missing or invalid credential", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal error", body = Problem, content_type = "application/problem+json")
    )
)]
#[tracing::instrument(skip_all, fields(client.id = %id))]
pub async fn remove_client(
    Extension(svc): Extension<Arc<ConcreteService>>,
    credential: Credential,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    svc.remove_client(credential.as_str(), parse_client_id(&id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
