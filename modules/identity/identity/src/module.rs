use std::sync::Arc;

use identity_sdk::IdentityClient;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::IdentityConfig;
use crate::domain::local_client::IdentityLocalClient;
use crate::domain::service::Service;
use crate::infra::storage::SeaOrmUsersRepository;
use crate::infra::storage::migrations::Migrator;
use crate::infra::token::TokenIssuer;

pub type ConcreteService = Service<SeaOrmUsersRepository>;

/// Identity module: wires storage, hashing and token issuance behind
/// [`IdentityClient`].
pub struct IdentityModule {
    service: Arc<ConcreteService>,
}

impl IdentityModule {
    /// Build the module on an already connected (and migrated) database.
    ///
    /// # Errors
    /// Fails if the configuration is invalid.
    pub fn init(cfg: &IdentityConfig, db: DatabaseConnection) -> anyhow::Result<Self> {
        info!("Initializing identity module");
        cfg.validate().map_err(anyhow::Error::msg)?;

        let tokens = TokenIssuer::new(cfg.token_secret.as_bytes(), &cfg.issuer, cfg.token_ttl);
        let service = Service::new(db, Arc::new(SeaOrmUsersRepository::new()), tokens);

        info!(issuer = %cfg.issuer, "Identity module initialized");
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
        info!("Identity migrations applied");
        Ok(())
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn IdentityClient> {
        Arc::new(IdentityLocalClient::new(Arc::clone(&self.service)))
    }
}
