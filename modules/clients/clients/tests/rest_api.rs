//! REST surface of the clients module, driven with `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use clients::{ClientsConfig, ClientsModule};
use http::{Request, StatusCode, header};
use identity::{IdentityConfig, IdentityModule};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn router() -> Router {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    IdentityModule::migrate(&db).await.unwrap();
    ClientsModule::migrate(&db).await.unwrap();

    let identity = IdentityModule::init(
        &IdentityConfig {
            token_secret: "rest-secret".to_owned(),
            token_ttl: Duration::from_secs(600),
            ..IdentityConfig::default()
        },
        db.clone(),
    )
    .unwrap();
    ClientsModule::init(&ClientsConfig::default(), db, identity.client())
        .unwrap()
        .router()
}

fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: http::Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router, username: &str) -> String {
    let creds = json!({"username": username, "password": "secret1"});
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/users", None, &creds))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/tokens", None, &creds))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn create_view_remove() {
    let app = router().await;
    let token = login(&app, "alice").await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/clients",
            Some(&token),
            &json!({"type": "sensor", "name": "temp1", "meta": {"unit": "C"}}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers()[header::LOCATION].to_str().unwrap().to_owned();
    assert!(location.starts_with("/clients/"));

    let resp = app
        .clone()
        .oneshot(empty_request("GET", &location, Some(&format!("Bearer {token}"))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["type"], "sensor");
    assert_eq!(body["name"], "temp1");
    assert_eq!(body["meta"], json!({"unit": "C"}));
    assert_eq!(format!("/clients/{}", body["id"].as_str().unwrap()), location);

    for _ in 0..2 {
        let resp = app
            .clone()
            .oneshot(empty_request("DELETE", &location, Some(&token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let resp = app
        .clone()
        .oneshot(empty_request("GET", &location, Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn error_statuses_are_problem_documents() {
    let app = router().await;
    let token = login(&app, "alice").await;

    let cases = [
        (
            json_request("POST", "/clients", None, &json!({"type": "s", "name": "n"})),
            StatusCode::FORBIDDEN,
        ),
        (
            json_request("POST", "/clients", Some(&token), &json!({"type": "", "name": "n"})),
            StatusCode::BAD_REQUEST,
        ),
        (
            json_request(
                "POST",
                "/users",
                None,
                &json!({"username": "alice", "password": "secret1"}),
            ),
            StatusCode::CONFLICT,
        ),
        (
            json_request(
                "POST",
                "/tokens",
                None,
                &json!({"username": "alice", "password": "wrong"}),
            ),
            StatusCode::BAD_REQUEST,
        ),
        (
            empty_request("GET", "/clients/not-a-uuid", Some(&token)),
            StatusCode::NOT_FOUND,
        ),
        (
            empty_request("GET", "/clients/not-a-uuid", Some("forged")),
            StatusCode::FORBIDDEN,
        ),
    ];

    for (request, expected) in cases {
        let uri = request.uri().clone();
        let resp = app.clone().oneshot(request).await.unwrap();
        assert_eq!(resp.status(), expected, "{uri}");
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "application/problem+json",
            "{uri}"
        );
        assert_eq!(body_json(resp).await["status"], expected.as_u16(), "{uri}");
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );
}

#[tokio::test]
async fn remove_of_unknown_id_succeeds() {
    let app = router().await;
    let token = login(&app, "alice").await;

    let resp = app
        .oneshot(empty_request("DELETE", "/clients/not-a-uuid", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = router().await;

    let resp = app
        .oneshot(empty_request("GET", "/openapi.json", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let doc = body_json(resp).await;
    for path in ["/users", "/tokens", "/clients", "/clients/{id}"] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
    assert!(doc.pointer("/components/schemas/Problem").is_some());
}
