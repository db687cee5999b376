// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

// Recursos que podem "não existir" para o dono logado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Owner,
    Store,
    Product,
    StoreProduct,
    ProductStatus,
    Sales,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Owner => "Owner",
            Resource::Store => "Store",
            Resource::Product => "Product",
            Resource::StoreProduct => "Store and product",
            Resource::ProductStatus => "Product status",
            Resource::Sales => "Sales",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Username já existe")]
    UsernameAlreadyExists,

    #[error("product_id já existe: {0}")]
    ProductIdAlreadyExists(String),

    #[error("Produto referenciado por vendas")]
    ProductInUse,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // A linha não existe.
    #[error("{0} not found")]
    NotFound(Resource),

    // A linha existe mas pertence a outro dono. Sai como 404 para não vazar existência.
    #[error("{resource} pertence a outro dono ({detail})")]
    Forbidden { resource: Resource, detail: String },

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn forbidden(resource: Resource, detail: impl Into<String>) -> Self {
        AppError::Forbidden { resource, detail: detail.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists
            | AppError::UsernameAlreadyExists
            | AppError::ProductIdAlreadyExists(_)
            | AppError::ProductInUse => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound | AppError::NotFound(_) | AppError::Forbidden { .. } => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::EmailAlreadyExists => "This e-mail is already in use.".to_string(),
            AppError::UsernameAlreadyExists => "This username is already in use.".to_string(),
            AppError::ProductIdAlreadyExists(pid) => format!("Product id '{}' already exists.", pid),
            AppError::ProductInUse => "Product has sales lines and cannot be deleted.".to_string(),
            AppError::InvalidCredentials => "Invalid e-mail or password.".to_string(),
            AppError::InvalidToken => "Invalid or missing authentication token.".to_string(),
            AppError::UserNotFound => "User not found.".to_string(),
            AppError::NotFound(resource) => format!("{} not found", resource),
            AppError::Forbidden { resource, detail } => {
                tracing::warn!("Acesso negado a {}: {}", resource, detail);
                format!("{} not found", resource)
            }

            // DatabaseError, InternalServerError, Bcrypt e JWT viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                "An unexpected error occurred.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
