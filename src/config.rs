// src/config.rs

pub mod settings;

pub use settings::Config;

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::{
    db::{OwnerRepository, ProductRepository, SalesRepository, StoreRepository, UserRepository},
    services::{
        auth::AuthService, owner_service::OwnerService, ownership::OwnershipGuard,
        product_service::ProductService, sales_service::SalesService, store_service::StoreService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub owner_service: OwnerService,
    pub store_service: StoreService,
    pub product_service: ProductService,
    pub sales_service: SalesService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: &Config) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let owner_repo = OwnerRepository::new(db_pool.clone());
        let store_repo = StoreRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let sales_repo = SalesRepository::new(db_pool.clone());

        let guard = OwnershipGuard::new(store_repo.clone(), product_repo.clone());

        let owner_service = OwnerService::new(owner_repo);
        let auth_service = AuthService::new(
            user_repo,
            owner_service.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration_days,
            db_pool.clone(),
        );
        let store_service = StoreService::new(store_repo, guard.clone(), db_pool.clone());
        let product_service = ProductService::new(product_repo, guard.clone(), db_pool.clone());
        let sales_service = SalesService::new(sales_repo, guard, db_pool.clone());

        Self {
            db_pool,
            auth_service,
            owner_service,
            store_service,
            product_service,
            sales_service,
        }
    }
}
