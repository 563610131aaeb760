use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

use super::dto::{ClientDto, CreateClientReq, CredentialsReq, TokenDto};
use super::error::Problem;
use super::handlers;
use crate::module::ConcreteService;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Client Manager API",
        description = "Register, log in, and manage owner-scoped clients. Client endpoints take the credential from the Authorization header (raw or Bearer)."
    ),
    paths(
        handlers::register,
        handlers::login,
        handlers::add_client,
        handlers::view_client,
        handlers::remove_client,
    ),
    components(schemas(CredentialsReq, TokenDto, CreateClientReq, ClientDto, Problem)),
    modifiers(&BearerAuth),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "clients", description = "Owner-scoped client resources")
    )
)]
pub struct ClientsApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// REST routes of the clients module.
#[must_use]
pub fn router(service: Arc<ConcreteService>) -> Router {
    Router::new()
        .route("/users", post(handlers::register))
        .route("/tokens", post(handlers::login))
        .route("/clients", post(handlers::add_client))
        .route(
            "/clients/{id}",
            get(handlers::view_client).delete(handlers::remove_client),
        )
        .route(
            "/openapi.json",
            get(|| async { Json(ClientsApiDoc::openapi()) }),
        )
        .layer(Extension(service))
}
