#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use identity_sdk::{IdentityClient, IdentityError};
use manager_security::SecurityContext;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use crate::domain::service::{ClientsService, ServiceConfig};
use crate::infra::storage::SeaOrmClientsRepository;
use crate::infra::storage::migrations::Migrator;
use crate::module::ConcreteService;

/// Create an in-memory database with the clients schema applied.
pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

#[derive(Default)]
struct Accounts {
    // username -> (id, secret)
    users: HashMap<String, (Uuid, String)>,
    // token -> owner
    tokens: HashMap<String, Uuid>,
}

/// Identity stand-in: tokens are `token-<username>` and map to fixed owners.
#[derive(Default, Clone)]
pub struct MockIdentity {
    accounts: Arc<Mutex<Accounts>>,
}

impl MockIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and return `(owner_id, token)`.
    pub fn with_user(&self, username: &str) -> (Uuid, String) {
        let id = Uuid::now_v7();
        let token = format!("token-{username}");
        let mut accounts = self.accounts.lock().unwrap();
        accounts
            .users
            .insert(username.to_owned(), (id, "secret".to_owned()));
        accounts.tokens.insert(token.clone(), id);
        (id, token)
    }
}

#[async_trait]
impl IdentityClient for MockIdentity {
    async fn resolve(&self, credential: &str) -> Result<SecurityContext, IdentityError> {
        let accounts = self.accounts.lock().unwrap();
        let owner = accounts
            .tokens
            .get(credential)
            .copied()
            .ok_or(IdentityError::InvalidCredentials)?;
        Ok(SecurityContext::builder()
            .subject_id(owner)
            .subject_type("user")
            .build())
    }

    async fn authenticate(&self, username: &str, secret: &str) -> Result<String, IdentityError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.users.get(username) {
            Some((_, stored)) if stored == secret => Ok(format!("token-{username}")),
            _ => Err(IdentityError::InvalidCredentials),
        }
    }

    async fn create(&self, username: &str, secret: &str) -> Result<Uuid, IdentityError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.users.contains_key(username) {
            return Err(IdentityError::already_exists(username));
        }
        let id = Uuid::now_v7();
        accounts
            .users
            .insert(username.to_owned(), (id, secret.to_owned()));
        accounts.tokens.insert(format!("token-{username}"), id);
        Ok(id)
    }
}

/// Identity whose every call fails as if its backing store were down.
pub struct FailingIdentity;

#[async_trait]
impl IdentityClient for FailingIdentity {
    async fn resolve(&self, _credential: &str) -> Result<SecurityContext, IdentityError> {
        Err(IdentityError::internal("identity store unavailable"))
    }

    async fn authenticate(&self, _username: &str, _secret: &str) -> Result<String, IdentityError> {
        Err(IdentityError::internal("identity store unavailable"))
    }

    async fn create(&self, _username: &str, _secret: &str) -> Result<Uuid, IdentityError> {
        Err(IdentityError::internal("identity store unavailable"))
    }
}

pub async fn build_service(identity: Arc<dyn IdentityClient>) -> ConcreteService {
    build_service_on(inmem_db().await, identity)
}

/// Service over a caller-provided database, for tests that inspect the rows.
pub fn build_service_on(
    db: DatabaseConnection,
    identity: Arc<dyn IdentityClient>,
) -> ConcreteService {
    ClientsService::new(
        db,
        Arc::new(SeaOrmClientsRepository::new()),
        identity,
        ServiceConfig::default(),
    )
}
