//! Module declaration and lifecycle

use crate::api::native::NativeClient;
use crate::api::rest::{register_routes, TokenRegistry};
use crate::config::{AuthConfig, Config};
use crate::domain::{CapabilityAuthorizer, Clock, NonceIssuer, OptionStore, Service};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Dependencies handed to the module at init
pub struct ModuleCtx {
    pub config: Config,
    pub auth: AuthConfig,
    pub options: Arc<dyn OptionStore>,
    pub clock: Arc<dyn Clock>,
}

/// Notice service module
pub struct NoticeServiceModule {
    service: RwLock<Option<Arc<Service>>>,
    tokens: RwLock<Arc<TokenRegistry>>,
}

impl Default for NoticeServiceModule {
    fn default() -> Self {
        Self {
            service: RwLock::new(None),
            tokens: RwLock::new(Arc::new(TokenRegistry::default())),
        }
    }
}

impl NoticeServiceModule {
    pub fn init(&self, ctx: ModuleCtx) -> Result<()> {
        let secret = if ctx.auth.nonce_secret.is_empty() {
            tracing::warn!("no nonce secret configured; dashboard forms will not survive a restart");
            generate_secret()
        } else {
            ctx.auth.nonce_secret.clone()
        };
        let nonces = NonceIssuer::new(secret, ctx.auth.nonce_lifetime_secs, ctx.clock.clone());

        let service = Arc::new(Service::new(
            ctx.options,
            Arc::new(CapabilityAuthorizer),
            ctx.clock,
            nonces,
            &ctx.config,
        )?);
        let tokens = Arc::new(TokenRegistry::from_config(&ctx.auth)?);

        tracing::info!(
            option_key = %ctx.config.option_key,
            timezone = %ctx.config.timezone,
            tokens = tokens.len(),
            "Notice service initialized"
        );
        if tokens.is_empty() {
            tracing::warn!("no bearer tokens configured; settings and dashboard routes will answer 401");
        }

        *self.service.write() = Some(service);
        *self.tokens.write() = tokens;
        Ok(())
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client over the shared service
    pub fn native_client(&self) -> Result<Arc<dyn crate::contract::NoticeApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// Register the REST routes on `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        let tokens = self.tokens.read().clone();

        tracing::info!("Registering notice service REST routes");
        Ok(register_routes(router, service, tokens))
    }

    /// Run the option table migrations
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Notice service migrations completed");
        Ok(())
    }
}

fn generate_secret() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}
