// src/services/product_service.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::{AppError, Resource},
    db::ProductRepository,
    models::{
        owner::Owner,
        product::{
            CreateProductPayload, Product, ProductStatus, UpdateProductPayload,
            UpdateProductStatusPayload,
        },
    },
    services::ownership::OwnershipGuard,
};

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    guard: OwnershipGuard,
    pool: PgPool,
}

impl ProductService {
    pub fn new(product_repo: ProductRepository, guard: OwnershipGuard, pool: PgPool) -> Self {
        Self { product_repo, guard, pool }
    }

    /// Gancho de criação de produto: todo produto tem exatamente um status.
    pub async fn on_product_created<'e, E>(&self, executor: E, product_id: i64, owner_id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.product_repo.create_status(executor, product_id, owner_id).await
    }

    // --- CREATE PRODUCT ---
    pub async fn create_product(
        &self,
        owner: &Owner,
        store_id: i64,
        payload: &CreateProductPayload,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. A loja precisa ser do dono
        let store = self.guard.store_owned_by(&mut *tx, owner, store_id).await?;

        // 2. Produto
        let new_id = self
            .product_repo
            .create(
                &mut *tx,
                store.id,
                owner.id,
                &payload.name,
                &payload.product_id,
                payload.price,
                payload.main_price,
            )
            .await?;

        // 3. Status (mesma transação)
        self.on_product_created(&mut *tx, new_id, owner.id).await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, new_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Product))?;

        tx.commit().await?;
        tracing::info!("📦 Produto {} ({}) criado na loja {}", product.id, product.product_id, store.id);
        Ok(product)
    }

    pub async fn list_products(&self, owner: &Owner, store_id: i64) -> Result<Vec<Product>, AppError> {
        self.guard.store_owned_by(&self.pool, owner, store_id).await?;
        self.product_repo.list_by_store(owner.id, store_id).await
    }

    pub async fn get_product(&self, owner: &Owner, product_id: i64) -> Result<Product, AppError> {
        self.guard.product_owned_by(&self.pool, owner, product_id).await
    }

    pub async fn update_product(
        &self,
        owner: &Owner,
        product_id: i64,
        payload: &UpdateProductPayload,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        self.guard.product_owned_by(&mut *tx, owner, product_id).await?;
        self.product_repo
            .update(&mut *tx, product_id, &payload.name, payload.price, payload.main_price)
            .await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, product_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Product))?;

        tx.commit().await?;
        Ok(product)
    }

    pub async fn delete_product(&self, owner: &Owner, product_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.guard.product_owned_by(&mut *tx, owner, product_id).await?;
        self.product_repo.delete(&mut *tx, product_id).await?;

        tx.commit().await?;
        tracing::info!("🗑️ Produto {} removido pelo dono {}", product_id, owner.id);
        Ok(())
    }

    // ---
    // Status
    // ---

    pub async fn get_status(&self, owner: &Owner, product_id: i64) -> Result<ProductStatus, AppError> {
        self.guard.product_owned_by(&self.pool, owner, product_id).await?;

        self.product_repo
            .find_status(&self.pool, product_id)
            .await?
            .ok_or(AppError::NotFound(Resource::ProductStatus))
    }

    pub async fn list_statuses(&self, owner: &Owner) -> Result<Vec<ProductStatus>, AppError> {
        self.product_repo.list_status_by_owner(owner.id).await
    }

    pub async fn update_status(
        &self,
        owner: &Owner,
        product_id: i64,
        payload: &UpdateProductStatusPayload,
    ) -> Result<ProductStatus, AppError> {
        let mut tx = self.pool.begin().await?;

        self.guard.product_owned_by(&mut *tx, owner, product_id).await?;
        self.product_repo
            .update_status(
                &mut *tx,
                product_id,
                payload.is_in_store,
                payload.is_for_sale,
                payload.quantity,
            )
            .await?;

        let status = self
            .product_repo
            .find_status(&mut *tx, product_id)
            .await?
            .ok_or(AppError::NotFound(Resource::ProductStatus))?;

        tx.commit().await?;
        Ok(status)
    }
}
