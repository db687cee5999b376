// src/services/ownership.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::{AppError, Resource},
    db::{ProductRepository, StoreRepository},
    models::{owner::Owner, product::Product, store::Store},
};

/// Confere que o recurso pertence ao dono logado.
/// Recurso alheio vira `Forbidden`, que na borda HTTP sai como 404.
pub fn ensure_owned(resource: Resource, owner_id: i64, actual_owner_id: i64) -> Result<(), AppError> {
    if owner_id != actual_owner_id {
        return Err(AppError::forbidden(
            resource,
            format!("dono {} tentou acessar recurso do dono {}", owner_id, actual_owner_id),
        ));
    }
    Ok(())
}

// Checagens de existência + posse usadas por todas as mutações.
#[derive(Clone)]
pub struct OwnershipGuard {
    store_repo: StoreRepository,
    product_repo: ProductRepository,
}

impl OwnershipGuard {
    pub fn new(store_repo: StoreRepository, product_repo: ProductRepository) -> Self {
        Self { store_repo, product_repo }
    }

    pub async fn store_owned_by<'e, E>(&self, executor: E, owner: &Owner, store_id: i64) -> Result<Store, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let store = self
            .store_repo
            .find_by_id(executor, store_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Store))?;

        ensure_owned(Resource::Store, owner.id, store.owner_id)?;
        Ok(store)
    }

    pub async fn product_owned_by<'e, E>(&self, executor: E, owner: &Owner, product_id: i64) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = self
            .product_repo
            .find_by_id(executor, product_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Product))?;

        ensure_owned(Resource::Product, owner.id, product.owner_id)?;
        Ok(product)
    }

    /// O produto precisa estar na mesma loja da venda e ser do mesmo dono.
    pub async fn product_in_store<'e, E>(
        &self,
        executor: E,
        owner: &Owner,
        store_id: i64,
        product_id: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = self
            .product_repo
            .exists_in_store(executor, store_id, owner.id, product_id)
            .await?;

        if !exists {
            return Err(AppError::NotFound(Resource::StoreProduct));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_owner_passes() {
        assert!(ensure_owned(Resource::Store, 3, 3).is_ok());
    }

    #[test]
    fn other_owner_is_forbidden_but_reads_as_not_found() {
        let err = ensure_owned(Resource::Sales, 1, 2).unwrap_err();
        assert!(matches!(err, AppError::Forbidden { resource: Resource::Sales, .. }));
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
    }
}
