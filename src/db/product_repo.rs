// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{map_foreign_key_violation, map_unique_violation},
        error::AppError,
    },
    models::product::{Product, ProductStatus},
};

const SELECT_PRODUCT: &str = r#"
    SELECT p.*, s.name AS store_name
    FROM products p
    JOIN stores s ON s.id = p.store_id
"#;

const SELECT_STATUS: &str = r#"
    SELECT
        ps.*,
        p.name AS product_name,
        s.name AS store_name,
        p.price,
        p.main_price,
        p.product_id
    FROM product_status ps
    JOIN products p ON p.id = ps.origin_id
    JOIN stores s ON s.id = p.store_id
"#;

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(product)
    }

    pub async fn list_by_store(&self, owner_id: i64, store_id: i64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "{SELECT_PRODUCT} WHERE p.store_id = $1 AND p.owner_id = $2 ORDER BY p.name ASC"
        ))
        .bind(store_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// O par loja/dono/produto existe? (a checagem "Store and product" das linhas de venda)
    pub async fn exists_in_store<'e, E>(
        &self,
        executor: E,
        store_id: i64,
        owner_id: i64,
        product_id: i64,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM products
                WHERE id = $1 AND store_id = $2 AND owner_id = $3
            )
            "#,
        )
        .bind(product_id)
        .bind(store_id)
        .bind(owner_id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    pub async fn find_status<'e, E>(&self, executor: E, product_id: i64) -> Result<Option<ProductStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let status = sqlx::query_as::<_, ProductStatus>(&format!("{SELECT_STATUS} WHERE ps.origin_id = $1"))
            .bind(product_id)
            .fetch_optional(executor)
            .await?;
        Ok(status)
    }

    pub async fn list_status_by_owner(&self, owner_id: i64) -> Result<Vec<ProductStatus>, AppError> {
        let statuses = sqlx::query_as::<_, ProductStatus>(&format!(
            "{SELECT_STATUS} WHERE ps.owner_id = $1 ORDER BY p.name ASC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(statuses)
    }

    // ---
    // Escrita (genéricas em Executor para rodar na transação)
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        store_id: i64,
        owner_id: i64,
        name: &str,
        product_id: &str,
        price: Decimal,
        main_price: Decimal,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar(
            r#"
            INSERT INTO products (store_id, owner_id, name, product_id, price, main_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(store_id)
        .bind(owner_id)
        .bind(name)
        .bind(product_id)
        .bind(price)
        .bind(main_price)
        .fetch_one(executor)
        .await
        .map_err(|e| map_unique_violation(e, |_| AppError::ProductIdAlreadyExists(product_id.to_string())))
    }

    pub async fn create_status<'e, E>(&self, executor: E, origin_id: i64, owner_id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("INSERT INTO product_status (origin_id, owner_id) VALUES ($1, $2)")
            .bind(origin_id)
            .bind(owner_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        price: Decimal,
        main_price: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3, main_price = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(main_price)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        origin_id: i64,
        is_in_store: bool,
        is_for_sale: bool,
        quantity: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE product_status
            SET is_in_store = $2, is_for_sale = $3, quantity = $4, updated_at = NOW()
            WHERE origin_id = $1
            "#,
        )
        .bind(origin_id)
        .bind(is_in_store)
        .bind(is_for_sale)
        .bind(quantity)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| map_foreign_key_violation(e, AppError::ProductInUse))?;
        Ok(result.rows_affected())
    }
}
