// src/db/owner_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::owner::Owner};

// Todas as leituras trazem o username como owner_name.
const SELECT_OWNER: &str = r#"
    SELECT o.*, u.username AS owner_name
    FROM owners o
    JOIN users u ON u.id = o.user_id
"#;

#[derive(Clone)]
pub struct OwnerRepository {
    pool: PgPool,
}

impl OwnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Owner>, AppError> {
        let owner = sqlx::query_as::<_, Owner>(&format!("{SELECT_OWNER} WHERE o.user_id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    /// Cria o dono vinculado ao usuário (roda dentro da transação de registro).
    pub async fn create_for_user<'e, E>(&self, executor: E, user_id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id: i64 = sqlx::query_scalar("INSERT INTO owners (user_id) VALUES ($1) RETURNING id")
            .bind(user_id)
            .fetch_one(executor)
            .await?;
        Ok(id)
    }

    pub async fn update_profile(
        &self,
        owner_id: i64,
        birth_date: Option<NaiveDate>,
        ps_address: Option<&str>,
        pm_address: Option<&str>,
    ) -> Result<Option<Owner>, AppError> {
        // COALESCE mantém o valor atual quando o campo não veio no payload.
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            WITH updated AS (
                UPDATE owners SET
                    birth_date = COALESCE($2, birth_date),
                    ps_address = COALESCE($3, ps_address),
                    pm_address = COALESCE($4, pm_address),
                    profile_submitted = TRUE,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT o.*, u.username AS owner_name
            FROM updated o
            JOIN users u ON u.id = o.user_id
            "#,
        )
        .bind(owner_id)
        .bind(birth_date)
        .bind(ps_address)
        .bind(pm_address)
        .fetch_optional(&self.pool)
        .await?;
        Ok(owner)
    }
}
