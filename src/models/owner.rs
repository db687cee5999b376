// src/models/owner.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// Owner (o "Dono", tenant do sistema)
// ---
// Criado automaticamente junto com o usuário (ver OwnerService::on_user_created).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[schema(example = 1)]
    pub id: i64,
    pub user_id: Uuid,
    // Derivado: username do usuário dono
    #[schema(example = "joao")]
    pub owner_name: String,

    pub birth_date: Option<NaiveDate>,
    #[schema(example = "Rua das Flores, 10")]
    pub ps_address: String,
    #[schema(example = "N/A")]
    pub pm_address: String,

    pub is_active: bool,
    pub profile_submitted: bool,
    pub is_approved: bool,
    pub is_online: bool,

    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Apenas o perfil é editável pelo dono; as flags de status são administrativas.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOwnerProfilePayload {
    pub birth_date: Option<NaiveDate>,

    #[validate(length(min = 1, message = "O endereço não pode ser vazio."))]
    pub ps_address: Option<String>,

    #[validate(length(min = 1, message = "O endereço não pode ser vazio."))]
    pub pm_address: Option<String>,
}
