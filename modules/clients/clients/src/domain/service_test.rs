//! Service tests against an in-memory `SQLite` database with a mocked identity.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use clients_sdk::NewClient;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use tracing_test::traced_test;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::infra::storage::entity;
use crate::test_support::{
    FailingIdentity, MockIdentity, build_service, build_service_on, inmem_db,
};

fn sensor(name: &str) -> NewClient {
    NewClient::new("sensor", name)
        .with_description("rooftop thermometer")
        .with_key("k-123")
        .with_meta(json!({"location": "roof", "floor": 7}).as_object().unwrap().clone())
}

// ============================================================================
// add / view round trip
// ============================================================================

#[tokio::test]
async fn added_client_reads_back_with_resolved_owner() {
    let identity = MockIdentity::new();
    let (alice, token) = identity.with_user("alice");
    let svc = build_service(Arc::new(identity)).await;

    let draft = sensor("temp1");
    let id = svc.add_client(&token, draft.clone()).await.unwrap();
    let stored = svc.view_client(&token, id).await.unwrap();

    assert_eq!(stored.id, id);
    assert_eq!(stored.owner_id, alice);
    assert_eq!(stored.client_type, draft.client_type);
    assert_eq!(stored.name, draft.name);
    assert_eq!(stored.description, draft.description);
    assert_eq!(stored.key, draft.key);
    assert_eq!(stored.meta, draft.meta);
}

#[tokio::test]
async fn empty_key_is_generated() {
    let identity = MockIdentity::new();
    let (_, token) = identity.with_user("alice");
    let svc = build_service(Arc::new(identity)).await;

    let a = svc
        .add_client(&token, NewClient::new("sensor", "a"))
        .await
        .unwrap();
    let b = svc
        .add_client(&token, NewClient::new("sensor", "b"))
        .await
        .unwrap();

    let a = svc.view_client(&token, a).await.unwrap();
    let b = svc.view_client(&token, b).await.unwrap();

    assert_eq!(a.key.len(), 64);
    assert!(a.key.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a.key, b.key);
    assert!(a.meta.is_empty());
    assert_eq!(a.description, None);
}

#[tokio::test]
async fn caller_supplied_owner_is_ignored() {
    let identity = MockIdentity::new();
    let (alice, alice_token) = identity.with_user("alice");
    let (bob, bob_token) = identity.with_user("bob");
    let svc = build_service(Arc::new(identity)).await;

    let mut draft = NewClient::new("sensor", "spoofed");
    draft.owner_id = Some(bob);
    let id = svc.add_client(&alice_token, draft).await.unwrap();

    assert_eq!(svc.view_client(&alice_token, id).await.unwrap().owner_id, alice);
    assert!(matches!(
        svc.view_client(&bob_token, id).await,
        Err(DomainError::NotFound { .. })
    ));
}

// ============================================================================
// ownership boundary
// ============================================================================

#[tokio::test]
async fn other_owner_sees_not_found() {
    let identity = MockIdentity::new();
    let (_, alice) = identity.with_user("alice");
    let (_, bob) = identity.with_user("bob");
    let svc = build_service(Arc::new(identity)).await;

    let id = svc.add_client(&alice, sensor("temp1")).await.unwrap();

    let as_bob = svc.view_client(&bob, id).await.unwrap_err();
    let missing = svc.view_client(&bob, Uuid::now_v7()).await.unwrap_err();

    assert!(matches!(as_bob, DomainError::NotFound { .. }));
    assert!(matches!(missing, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn other_owner_cannot_remove() {
    let identity = MockIdentity::new();
    let (_, alice) = identity.with_user("alice");
    let (_, bob) = identity.with_user("bob");
    let svc = build_service(Arc::new(identity)).await;

    let id = svc.add_client(&alice, sensor("temp1")).await.unwrap();

    svc.remove_client(&bob, id).await.unwrap();
    assert!(svc.view_client(&alice, id).await.is_ok());
}

#[tokio::test]
async fn invalid_credential_is_unauthorized_before_storage() {
    let identity = MockIdentity::new();
    let (_, alice) = identity.with_user("alice");
    let svc = build_service(Arc::new(identity)).await;
    let id = svc.add_client(&alice, sensor("temp1")).await.unwrap();

    assert!(matches!(
        svc.add_client("bogus", sensor("x")).await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        svc.add_client("", NewClient::default()).await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        svc.view_client("bogus", id).await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        svc.remove_client("bogus", id).await,
        Err(DomainError::Unauthorized)
    ));
    assert!(svc.view_client(&alice, id).await.is_ok());
}

#[tokio::test]
#[traced_test]
async fn rejected_credential_is_logged() {
    let svc = build_service(Arc::new(MockIdentity::new())).await;

    let result = svc.view_client("forged", Uuid::now_v7()).await;

    assert!(matches!(result, Err(DomainError::Unauthorized)));
    assert!(logs_contain("Rejected credential"));
    assert!(!logs_contain("forged"));
}

// ============================================================================
// remove
// ============================================================================

#[tokio::test]
async fn remove_is_idempotent() {
    let identity = MockIdentity::new();
    let (_, token) = identity.with_user("alice");
    let svc = build_service(Arc::new(identity)).await;

    let id = svc.add_client(&token, sensor("temp1")).await.unwrap();

    svc.remove_client(&token, id).await.unwrap();
    svc.remove_client(&token, id).await.unwrap();
    svc.remove_client(&token, Uuid::now_v7()).await.unwrap();

    assert!(matches!(
        svc.view_client(&token, id).await,
        Err(DomainError::NotFound { .. })
    ));
}

// ============================================================================
// validation
// ============================================================================

#[tokio::test]
async fn malformed_client_is_not_persisted() {
    let identity = MockIdentity::new();
    let (owner, token) = identity.with_user("alice");
    let db = inmem_db().await;
    let svc = build_service_on(db.clone(), Arc::new(identity));

    for draft in [
        NewClient::new("", "temp1"),
        NewClient::new("sensor", ""),
        NewClient::new("", ""),
    ] {
        let err = svc.add_client(&token, draft).await.unwrap_err();
        assert!(matches!(err, DomainError::MalformedClient { .. }), "{err}");
    }
    assert_eq!(entity::Entity::find().count(&db).await.unwrap(), 0);

    let id = svc.add_client(&token, sensor("ok")).await.unwrap();
    assert_eq!(entity::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(svc.view_client(&token, id).await.unwrap().owner_id, owner);
}

#[tokio::test]
async fn blank_but_non_empty_fields_are_accepted() {
    let identity = MockIdentity::new();
    let (_, token) = identity.with_user("alice");
    let svc = build_service(Arc::new(identity)).await;

    let id = svc
        .add_client(&token, NewClient::new(" ", "temp1"))
        .await
        .unwrap();
    assert_eq!(svc.view_client(&token, id).await.unwrap().client_type, " ");
}

// ============================================================================
// concurrency
// ============================================================================

#[tokio::test]
async fn concurrent_adds_get_distinct_ids() {
    let identity = MockIdentity::new();
    let (_, token) = identity.with_user("alice");
    let svc = Arc::new(build_service(Arc::new(identity)).await);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let svc = Arc::clone(&svc);
            let token = token.clone();
            tokio::spawn(async move {
                svc.add_client(&token, NewClient::new("sensor", format!("s{i}")))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut ids = Vec::new();
    for h in handles {
        ids.push(h.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);
}

// ============================================================================
// register / login
// ============================================================================

#[tokio::test]
async fn register_and_login() {
    let svc = build_service(Arc::new(MockIdentity::new())).await;

    let user_id = svc.register("alice", "secret1").await.unwrap();
    let token = svc.login("alice", "secret1").await.unwrap();

    let id = svc.add_client(&token, sensor("temp1")).await.unwrap();
    assert_eq!(svc.view_client(&token, id).await.unwrap().owner_id, user_id);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let svc = build_service(Arc::new(MockIdentity::new())).await;
    svc.register("alice", "secret1").await.unwrap();

    assert!(matches!(
        svc.register("alice", "other").await,
        Err(DomainError::Conflict { .. })
    ));
}

#[tokio::test]
async fn empty_registration_fields_are_malformed() {
    let svc = build_service(Arc::new(MockIdentity::new())).await;

    assert!(matches!(
        svc.register("", "secret1").await,
        Err(DomainError::MalformedInput { .. })
    ));
    assert!(matches!(
        svc.login("alice", "").await,
        Err(DomainError::MalformedInput { .. })
    ));
}

#[tokio::test]
async fn bad_login_is_invalid_credentials() {
    let svc = build_service(Arc::new(MockIdentity::new())).await;
    svc.register("alice", "secret1").await.unwrap();

    assert!(matches!(
        svc.login("alice", "wrong").await,
        Err(DomainError::InvalidCredentials)
    ));
    assert!(matches!(
        svc.login("nobody", "secret1").await,
        Err(DomainError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn identity_failure_surfaces_as_storage_error() {
    let svc = build_service(Arc::new(FailingIdentity)).await;

    assert!(matches!(
        svc.view_client("any", Uuid::now_v7()).await,
        Err(DomainError::Storage { .. })
    ));
    assert!(matches!(
        svc.register("alice", "secret1").await,
        Err(DomainError::Storage { .. })
    ));
}

// ============================================================================
// scenario
// ============================================================================

#[tokio::test]
async fn alice_and_bob_scenario() {
    let svc = build_service(Arc::new(MockIdentity::new())).await;

    let alice = svc.register("alice", "secret1").await.unwrap();
    let t1 = svc.login("alice", "secret1").await.unwrap();
    let x = svc
        .add_client(&t1, NewClient::new("sensor", "temp1"))
        .await
        .unwrap();

    let record = svc.view_client(&t1, x).await.unwrap();
    assert_eq!(record.owner_id, alice);
    assert_eq!(record.client_type, "sensor");
    assert_eq!(record.name, "temp1");

    svc.register("bob", "secret2").await.unwrap();
    let t_bob = svc.login("bob", "secret2").await.unwrap();
    assert!(matches!(
        svc.view_client(&t_bob, x).await,
        Err(DomainError::NotFound { .. })
    ));
}
