// src/services/owner_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, Resource},
    db::OwnerRepository,
    models::owner::{Owner, UpdateOwnerProfilePayload},
};

#[derive(Clone)]
pub struct OwnerService {
    owner_repo: OwnerRepository,
}

impl OwnerService {
    pub fn new(owner_repo: OwnerRepository) -> Self {
        Self { owner_repo }
    }

    /// Gancho de criação de usuário: todo usuário tem exatamente um Owner.
    /// Recebe o executor da transação de registro.
    pub async fn on_user_created<'e, E>(&self, executor: E, user_id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let owner_id = self.owner_repo.create_for_user(executor, user_id).await?;
        tracing::debug!("Owner {} criado para o usuário {}", owner_id, user_id);
        Ok(owner_id)
    }

    pub async fn get_by_user(&self, user_id: Uuid) -> Result<Owner, AppError> {
        self.owner_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Owner))
    }

    pub async fn update_profile(&self, owner: &Owner, payload: &UpdateOwnerProfilePayload) -> Result<Owner, AppError> {
        self.owner_repo
            .update_profile(
                owner.id,
                payload.birth_date,
                payload.ps_address.as_deref(),
                payload.pm_address.as_deref(),
            )
            .await?
            .ok_or(AppError::NotFound(Resource::Owner))
    }
}
