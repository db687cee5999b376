// src/services/store_service.rs

use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::StoreRepository,
    models::{
        owner::Owner,
        store::{CreateStorePayload, Store, UpdateStorePayload},
    },
    services::ownership::OwnershipGuard,
};

#[derive(Clone)]
pub struct StoreService {
    store_repo: StoreRepository,
    guard: OwnershipGuard,
    pool: PgPool,
}

impl StoreService {
    pub fn new(store_repo: StoreRepository, guard: OwnershipGuard, pool: PgPool) -> Self {
        Self { store_repo, guard, pool }
    }

    pub async fn create_store(&self, owner: &Owner, payload: &CreateStorePayload) -> Result<Store, AppError> {
        let store_id = self
            .store_repo
            .create(
                &self.pool,
                owner.id,
                &payload.name,
                payload.license_type.as_deref(),
                &payload.address,
                payload.store_type,
            )
            .await?;

        tracing::info!("🏪 Loja {} criada pelo dono {}", store_id, owner.id);

        self.store_repo
            .find_by_id(&self.pool, store_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Store))
    }

    pub async fn list_stores(&self, owner: &Owner) -> Result<Vec<Store>, AppError> {
        self.store_repo.list_by_owner(owner.id).await
    }

    pub async fn get_store(&self, owner: &Owner, store_id: i64) -> Result<Store, AppError> {
        self.guard.store_owned_by(&self.pool, owner, store_id).await
    }

    pub async fn update_store(
        &self,
        owner: &Owner,
        store_id: i64,
        payload: &UpdateStorePayload,
    ) -> Result<Store, AppError> {
        let mut tx = self.pool.begin().await?;

        self.guard.store_owned_by(&mut *tx, owner, store_id).await?;

        self.store_repo
            .update(
                &mut *tx,
                store_id,
                payload.name.as_deref(),
                payload.license_type.as_deref(),
                payload.address.as_deref(),
                payload.store_type,
            )
            .await?;

        let store = self
            .store_repo
            .find_by_id(&mut *tx, store_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Store))?;

        tx.commit().await?;
        Ok(store)
    }

    pub async fn delete_store(&self, owner: &Owner, store_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.guard.store_owned_by(&mut *tx, owner, store_id).await?;
        self.store_repo.delete(&mut *tx, store_id).await?;

        tx.commit().await?;
        tracing::info!("🗑️ Loja {} removida pelo dono {}", store_id, owner.id);
        Ok(())
    }
}
