// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::validation::{single_field_error, validate_not_negative};

/// Id de linha que ainda não foi persistida.
pub const NEW_LINE_ID: i64 = 0;

// --- Agregado de venda ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sales {
    #[schema(example = 1)]
    pub id: i64,
    #[sqlx(rename = "owner_id")]
    pub object_owner: i64,
    #[schema(example = "joao")]
    pub owner_name: String,
    #[sqlx(rename = "store_id")]
    pub store: i64,
    #[schema(example = "Mercadinho Central")]
    pub store_name: String,
    pub sale_id: Uuid,
    #[schema(example = 5.0)]
    pub total_discounted: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Linha da venda ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    #[schema(example = 10)]
    pub id: i64,
    #[sqlx(rename = "sales_id")]
    pub sales: i64,
    #[sqlx(rename = "product_id")]
    pub product: i64,
    #[schema(example = "Arroz 5kg")]
    pub product_name: String,
    #[schema(example = 5.0)]
    pub discounted: Decimal,
    pub created_at: DateTime<Utc>,
}

// Resposta completa: agregado + linhas + campos derivados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesDetail {
    #[serde(flatten)]
    pub sales: Sales,
    #[schema(example = "/api/sales/1")]
    pub url: String,
    #[schema(example = "joao")]
    pub logged_in_user: String,
    pub sales_object: Vec<DailySales>,
}

impl SalesDetail {
    pub fn new(sales: Sales, sales_object: Vec<DailySales>, logged_in_user: &str) -> Self {
        Self {
            url: format!("/api/sales/{}", sales.id),
            logged_in_user: logged_in_user.to_string(),
            sales,
            sales_object,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesUpdateResponse {
    #[serde(flatten)]
    pub detail: SalesDetail,
    // Linhas criadas ou atualizadas nesta requisição
    pub activated_line_ids: Vec<i64>,
}

fn default_elect() -> bool {
    true
}

// Linha no payload. Em criação, `id` e `elect` são ignorados.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesLinePayload {
    // 0 = linha nova; ausente na atualização = linha ignorada
    #[schema(example = 0)]
    pub id: Option<i64>,

    #[schema(example = 1)]
    pub product: i64,

    // Ausente: 0 na criação, valor atual na atualização
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 5.0)]
    pub discounted: Option<Decimal>,

    // true = manter/criar, false = apagar (só na atualização)
    #[serde(default = "default_elect")]
    #[schema(example = true)]
    pub elect: bool,
}

impl SalesLinePayload {
    pub fn discounted_or_zero(&self) -> Decimal {
        self.discounted.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalesPayload {
    #[schema(example = 1)]
    pub store: i64,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub total_discounted: Decimal,

    #[validate(nested)]
    pub sales_object: Option<Vec<SalesLinePayload>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalesPayload {
    #[schema(example = 1)]
    pub store: i64,

    // Omitido mantém o valor atual
    pub total_discounted: Option<Decimal>,

    #[validate(nested)]
    #[serde(default)]
    pub sales_object: Vec<SalesLinePayload>,
}

impl UpdateSalesPayload {
    pub fn validate_consistency(&self) -> Result<(), validator::ValidationErrors> {
        if let Some(total) = &self.total_discounted {
            validate_not_negative(total)
                .map_err(|e| single_field_error("totalDiscounted", e))?;
        }

        // Mesmo id persistido duas vezes no payload é ambíguo.
        let mut seen = std::collections::HashSet::new();
        for id in self.sales_object.iter().filter_map(|line| line.id) {
            if id != NEW_LINE_ID && !seen.insert(id) {
                let mut err = ValidationError::new("duplicate_line");
                err.message = Some(format!("A linha {} aparece mais de uma vez.", id).into());
                return Err(single_field_error("salesObject", err));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalesListQuery {
    /// Filtra pelas vendas de uma loja
    pub store: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_without_id_is_not_new() {
        let line: SalesLinePayload = serde_json::from_str(r#"{"product": 3}"#).unwrap();
        assert_eq!(line.id, None);
        assert!(line.elect);
    }

    #[test]
    fn explicit_zero_id_marks_a_new_line() {
        let line: SalesLinePayload = serde_json::from_str(r#"{"id": 0, "product": 3}"#).unwrap();
        assert_eq!(line.id, Some(NEW_LINE_ID));
    }

    #[test]
    fn missing_discount_stays_unset() {
        let line: SalesLinePayload = serde_json::from_str(r#"{"id": 4, "product": 2}"#).unwrap();
        assert_eq!(line.discounted, None);
        assert_eq!(line.discounted_or_zero(), Decimal::ZERO);
        assert!(line.validate().is_ok());
    }

    #[test]
    fn negative_line_discount_fails_nested_validation() {
        let payload: CreateSalesPayload = serde_json::from_str(
            r#"{"store": 1, "salesObject": [{"product": 1, "discounted": -2}]}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn create_without_lines_is_valid() {
        let payload: CreateSalesPayload = serde_json::from_str(r#"{"store": 1}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.sales_object.is_none());
        assert_eq!(payload.total_discounted, Decimal::ZERO);
    }

    #[test]
    fn duplicate_persisted_line_ids_are_rejected() {
        let payload: UpdateSalesPayload = serde_json::from_str(
            r#"{"store": 1, "salesObject": [
                {"id": 4, "product": 1},
                {"id": 4, "product": 2, "elect": false}
            ]}"#,
        )
        .unwrap();
        let errors = payload.validate_consistency().unwrap_err();
        assert!(errors.field_errors().contains_key("salesObject"));
    }

    #[test]
    fn several_new_lines_are_not_duplicates() {
        let payload: UpdateSalesPayload = serde_json::from_str(
            r#"{"store": 1, "salesObject": [
                {"id": 0, "product": 1},
                {"id": 0, "product": 1}
            ]}"#,
        )
        .unwrap();
        assert!(payload.validate_consistency().is_ok());
    }

    #[test]
    fn negative_total_discount_on_update_is_rejected() {
        let payload: UpdateSalesPayload =
            serde_json::from_str(r#"{"store": 1, "totalDiscounted": -1}"#).unwrap();
        assert!(payload.validate_consistency().is_err());
    }

    #[test]
    fn detail_flattens_aggregate_fields() {
        let sales = Sales {
            id: 9,
            object_owner: 1,
            owner_name: "joao".into(),
            store: 2,
            store_name: "Central".into(),
            sale_id: Uuid::nil(),
            total_discounted: Decimal::new(500, 2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(SalesDetail::new(sales, vec![], "joao")).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["objectOwner"], 1);
        assert_eq!(json["storeName"], "Central");
        assert_eq!(json["url"], "/api/sales/9");
        assert_eq!(json["loggedInUser"], "joao");
        assert!(json["salesObject"].as_array().unwrap().is_empty());
    }
}
