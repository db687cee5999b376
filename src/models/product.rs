// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::validate_not_negative;

// --- Produto da loja ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = 1)]
    pub id: i64,
    pub store_id: i64,
    pub owner_id: i64,
    // Derivado (JOIN com stores)
    #[schema(example = "Mercadinho Central")]
    pub store_name: String,

    #[schema(example = "Arroz 5kg")]
    pub name: String,
    // Identificador externo, único no sistema inteiro
    #[schema(example = "sku-1")]
    pub product_id: String,

    #[schema(example = 25.90)]
    pub price: Decimal,
    #[schema(example = 29.90)]
    pub main_price: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Status do produto (estoque / disponibilidade) ---
// Um por produto, criado em ProductService::on_product_created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductStatus {
    pub id: i64,
    pub origin_id: i64,
    pub owner_id: i64,

    pub is_in_store: bool,
    pub is_for_sale: bool,
    #[schema(example = 12)]
    pub quantity: i32,

    // Derivados do produto de origem
    pub product_name: String,
    pub store_name: String,
    pub price: Decimal,
    pub main_price: Decimal,
    pub product_id: String,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, max = 255, message = "O nome deve ter entre 1 e 255 caracteres."))]
    #[schema(example = "Arroz 5kg")]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "O productId deve ter entre 1 e 255 caracteres."))]
    #[schema(example = "sku-1")]
    pub product_id: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub main_price: Decimal,
}

// productId, loja e dono não mudam depois da criação.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, max = 255, message = "O nome deve ter entre 1 e 255 caracteres."))]
    pub name: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub main_price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductStatusPayload {
    pub is_in_store: bool,
    pub is_for_sale: bool,

    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let payload: CreateProductPayload = serde_json::from_str(
            r#"{"name":"Arroz","productId":"sku-1","price":-1,"mainPrice":10}"#,
        )
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
        assert!(!errors.field_errors().contains_key("main_price"));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let payload = UpdateProductStatusPayload {
            is_in_store: true,
            is_for_sale: true,
            quantity: -3,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn update_payload_cannot_carry_product_id() {
        // Campos desconhecidos são ignorados: productId não chega ao serviço.
        let payload: UpdateProductPayload = serde_json::from_str(
            r#"{"name":"Arroz","price":1,"mainPrice":2,"productId":"outro"}"#,
        )
        .unwrap();
        assert_eq!(payload.name, "Arroz");
    }
}
