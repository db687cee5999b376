// src/models/store.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "store_type", rename_all = "snake_case")] // Banco
#[serde(rename_all = "snake_case")] // JSON
pub enum StoreType {
    #[default]
    General,  // "general"
    Pharmacy, // "pharmacy"
    Chain,
    Sports,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[schema(example = 1)]
    pub id: i64,
    pub owner_id: i64,
    // Derivado (JOIN com users)
    #[schema(example = "joao")]
    pub owner_name: String,

    #[schema(example = "Mercadinho Central")]
    pub name: String,
    #[schema(example = "N/A")]
    pub license_type: String,
    #[schema(example = "Av. Brasil, 100")]
    pub address: String,
    pub store_type: StoreType,

    pub profile_submitted: bool,
    pub is_approved: bool,
    pub is_online: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorePayload {
    #[validate(length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres."))]
    #[schema(example = "Mercadinho Central")]
    pub name: String,

    #[validate(length(max = 45, message = "O tipo de licença deve ter no máximo 45 caracteres."))]
    pub license_type: Option<String>,

    #[validate(length(min = 1, message = "O endereço é obrigatório."))]
    pub address: String,

    #[serde(default)]
    pub store_type: StoreType,
}

// Campos omitidos mantêm o valor atual.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStorePayload {
    #[validate(length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres."))]
    pub name: Option<String>,

    #[validate(length(max = 45, message = "O tipo de licença deve ter no máximo 45 caracteres."))]
    pub license_type: Option<String>,

    #[validate(length(min = 1, message = "O endereço não pode ser vazio."))]
    pub address: Option<String>,

    pub store_type: Option<StoreType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_type_defaults_to_general() {
        let payload: CreateStorePayload =
            serde_json::from_str(r#"{"name":"Loja","address":"Rua 1"}"#).unwrap();
        assert_eq!(payload.store_type, StoreType::General);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn store_type_uses_snake_case_on_the_wire() {
        let parsed: StoreType = serde_json::from_str(r#""pharmacy""#).unwrap();
        assert_eq!(parsed, StoreType::Pharmacy);
        assert!(serde_json::from_str::<StoreType>(r#""bakery""#).is_err());
    }

    #[test]
    fn long_store_name_is_rejected() {
        let payload = CreateStorePayload {
            name: "x".repeat(101),
            license_type: None,
            address: "Rua 1".into(),
            store_type: StoreType::Chain,
        };
        assert!(payload.validate().unwrap_err().field_errors().contains_key("name"));
    }
}
