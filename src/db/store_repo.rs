// src/db/store_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::store::{Store, StoreType},
};

const SELECT_STORE: &str = r#"
    SELECT s.*, u.username AS owner_name
    FROM stores s
    JOIN owners o ON o.id = s.owner_id
    JOIN users u ON u.id = o.user_id
"#;

#[derive(Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca por id sem filtrar pelo dono: quem chama decide entre NotFound e Forbidden.
    pub async fn find_by_id<'e, E>(&self, executor: E, store_id: i64) -> Result<Option<Store>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let store = sqlx::query_as::<_, Store>(&format!("{SELECT_STORE} WHERE s.id = $1"))
            .bind(store_id)
            .fetch_optional(executor)
            .await?;
        Ok(store)
    }

    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Store>, AppError> {
        let stores = sqlx::query_as::<_, Store>(&format!(
            "{SELECT_STORE} WHERE s.owner_id = $1 ORDER BY s.name ASC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stores)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        owner_id: i64,
        name: &str,
        license_type: Option<&str>,
        address: &str,
        store_type: StoreType,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO stores (owner_id, name, license_type, address, store_type)
            VALUES ($1, $2, COALESCE($3, 'N/A'), $4, $5)
            RETURNING id
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(license_type)
        .bind(address)
        .bind(store_type)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        store_id: i64,
        name: Option<&str>,
        license_type: Option<&str>,
        address: Option<&str>,
        store_type: Option<StoreType>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE stores SET
                name = COALESCE($2, name),
                license_type = COALESCE($3, license_type),
                address = COALESCE($4, address),
                store_type = COALESCE($5, store_type),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(license_type)
        .bind(address)
        .bind(store_type)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Produtos, status e vendas caem junto (ON DELETE CASCADE).
    pub async fn delete<'e, E>(&self, executor: E, store_id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(store_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
