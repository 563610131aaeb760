use std::sync::Arc;

use axum::Router;
use clients_sdk::ClientsClientV1;
use identity_sdk::IdentityClient;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::ClientsConfig;
use crate::domain::local_client::ClientsLocalClient;
use crate::domain::service::{ClientsService, ServiceConfig};
use crate::infra::storage::SeaOrmClientsRepository;
use crate::infra::storage::migrations::Migrator;

/// Concrete service type used by the REST layer. Lives in the composition
/// root so the domain never names an infra type.
pub type ConcreteService = ClientsService<SeaOrmClientsRepository>;

/// Clients module: owns the `clients_by_owner` store and its REST surface.
pub struct ClientsModule {
    service: Arc<ConcreteService>,
}

impl ClientsModule {
    /// Build the module on an already connected (and migrated) database.
    ///
    /// # Errors
    /// Fails if the configuration is invalid.
    pub fn init(
        cfg: &ClientsConfig,
        db: DatabaseConnection,
        identity: Arc<dyn IdentityClient>,
    ) -> anyhow::Result<Self> {
        info!("Initializing clients module");
        cfg.validate().map_err(anyhow::Error::msg)?;
        debug!(access_key_bytes = cfg.access_key_bytes, "Loaded clients config");

        let service = ClientsService::new(
            db,
            Arc::new(SeaOrmClientsRepository::new()),
            identity,
            ServiceConfig {
                access_key_bytes: cfg.access_key_bytes,
            },
        );

        Ok(Self {
            service: Arc::new(service),
        })
    }

    /// Apply the module's schema migrations.
    ///
    /// # Errors
    /// Propagates any migration failure.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        Migrator::up(db, None).await?;
        info!("Clients migrations applied");
        Ok(())
    }

    /// In-process client for other modules and tests.
    #[must_use]
    pub fn client(&self) -> Arc<dyn ClientsClientV1> {
        Arc::new(ClientsLocalClient::new(Arc::clone(&self.service)))
    }

    /// REST routes (`/users`, `/tokens`, `/clients`, `/openapi.json`).
    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(Arc::clone(&self.service))
    }
}
