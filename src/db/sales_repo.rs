// src/db/sales_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sales::{DailySales, Sales},
};

const SELECT_SALES: &str = r#"
    SELECT sa.*, u.username AS owner_name, st.name AS store_name
    FROM sales sa
    JOIN owners o ON o.id = sa.owner_id
    JOIN users u ON u.id = o.user_id
    JOIN stores st ON st.id = sa.store_id
"#;

const SELECT_LINES: &str = r#"
    SELECT ds.*, p.name AS product_name
    FROM daily_sales ds
    JOIN products p ON p.id = ds.product_id
"#;

#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Agregado
    // ---

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Sales>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sales = sqlx::query_as::<_, Sales>(&format!("{SELECT_SALES} WHERE sa.id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(sales)
    }

    /// Mesma busca, travando a linha da venda até o fim da transação.
    /// Serializa atualizações concorrentes do mesmo agregado.
    pub async fn find_by_id_for_update<'e, E>(&self, executor: E, id: i64) -> Result<Option<Sales>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sales = sqlx::query_as::<_, Sales>(&format!("{SELECT_SALES} WHERE sa.id = $1 FOR UPDATE OF sa"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(sales)
    }

    pub async fn list_by_owner(&self, owner_id: i64, store_id: Option<i64>) -> Result<Vec<Sales>, AppError> {
        let sales = sqlx::query_as::<_, Sales>(&format!(
            r#"{SELECT_SALES}
            WHERE sa.owner_id = $1 AND ($2::BIGINT IS NULL OR sa.store_id = $2)
            ORDER BY sa.created_at DESC, sa.id DESC"#
        ))
        .bind(owner_id)
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        owner_id: i64,
        store_id: i64,
        sale_id: Uuid,
        total_discounted: Decimal,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO sales (owner_id, store_id, sale_id, total_discounted)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(owner_id)
        .bind(store_id)
        .bind(sale_id)
        .bind(total_discounted)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    pub async fn update_total_discounted<'e, E>(
        &self,
        executor: E,
        id: i64,
        total_discounted: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE sales SET total_discounted = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(total_discounted)
            .execute(executor)
            .await?;
        Ok(())
    }

    // Linhas caem junto (ON DELETE CASCADE).
    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // ---
    // Linhas (DailySales)
    // ---

    pub async fn list_lines<'e, E>(&self, executor: E, sales_id: i64) -> Result<Vec<DailySales>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lines = sqlx::query_as::<_, DailySales>(&format!(
            "{SELECT_LINES} WHERE ds.sales_id = $1 ORDER BY ds.id ASC"
        ))
        .bind(sales_id)
        .fetch_all(executor)
        .await?;
        Ok(lines)
    }

    // Linhas de vários agregados numa consulta só, para listagens.
    pub async fn list_lines_of_many(&self, sales_ids: &[i64]) -> Result<Vec<DailySales>, AppError> {
        let lines = sqlx::query_as::<_, DailySales>(&format!(
            "{SELECT_LINES} WHERE ds.sales_id = ANY($1) ORDER BY ds.sales_id, ds.id ASC"
        ))
        .bind(sales_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }

    pub async fn line_ids<'e, E>(&self, executor: E, sales_id: i64) -> Result<Vec<i64>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar("SELECT id FROM daily_sales WHERE sales_id = $1")
            .bind(sales_id)
            .fetch_all(executor)
            .await?;
        Ok(ids)
    }

    pub async fn insert_line<'e, E>(
        &self,
        executor: E,
        sales_id: i64,
        product_id: i64,
        discounted: Decimal,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO daily_sales (sales_id, product_id, discounted)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(sales_id)
        .bind(product_id)
        .bind(discounted)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    // O filtro por sales_id impede tocar linhas de outro agregado.
    pub async fn update_line<'e, E>(
        &self,
        executor: E,
        sales_id: i64,
        line_id: i64,
        product_id: i64,
        discounted: Option<Decimal>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Desconto ausente mantém o valor gravado.
        let result = sqlx::query(
            r#"
            UPDATE daily_sales SET product_id = $3, discounted = COALESCE($4, discounted)
            WHERE id = $2 AND sales_id = $1
            "#,
        )
        .bind(sales_id)
        .bind(line_id)
        .bind(product_id)
        .bind(discounted)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_line<'e, E>(&self, executor: E, sales_id: i64, line_id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM daily_sales WHERE id = $2 AND sales_id = $1")
            .bind(sales_id)
            .bind(line_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
