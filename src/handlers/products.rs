// src/handlers/products.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentOwner,
    models::product::{
        CreateProductPayload, Product, ProductStatus, UpdateProductPayload,
        UpdateProductStatusPayload,
    },
};

// ---
// Produtos
// ---

// POST /api/stores/{store_id}/products
#[utoipa::path(
    post,
    path = "/api/stores/{store_id}/products",
    tag = "Products",
    params(("store_id" = i64, Path, description = "ID da loja")),
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado (status criado junto)", body = Product),
        (status = 404, description = "Store not found"),
        (status = 409, description = "productId já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(store_id): Path<i64>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .create_product(&owner, store_id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/products",
    tag = "Products",
    params(("store_id" = i64, Path, description = "ID da loja")),
    responses(
        (status = 200, description = "Produtos da loja", body = [Product]),
        (status = 404, description = "Store not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(store_id): Path<i64>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state.product_service.list_products(&owner, store_id).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{product_id}",
    tag = "Products",
    params(("product_id" = i64, Path, description = "ID interno do produto")),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Produto com linhas de venda")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(product_id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let product = app_state.product_service.get_product(&owner, product_id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/api/products/{product_id}",
    tag = "Products",
    params(("product_id" = i64, Path, description = "ID interno do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Produto com linhas de venda")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(product_id): Path<i64>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .update_product(&owner, product_id, &payload)
        .await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{product_id}",
    tag = "Products",
    params(("product_id" = i64, Path, description = "ID interno do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Produto com linhas de venda")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(product_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.product_service.delete_product(&owner, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Status do produto
// ---

#[utoipa::path(
    get,
    path = "/api/products/{product_id}/status",
    tag = "Product Status",
    params(("product_id" = i64, Path, description = "ID interno do produto")),
    responses(
        (status = 200, description = "Status do produto", body = ProductStatus),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Produto com linhas de venda")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product_status(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(product_id): Path<i64>,
) -> Result<Json<ProductStatus>, AppError> {
    let status = app_state.product_service.get_status(&owner, product_id).await?;
    Ok(Json(status))
}

#[utoipa::path(
    put,
    path = "/api/products/{product_id}/status",
    tag = "Product Status",
    params(("product_id" = i64, Path, description = "ID interno do produto")),
    request_body = UpdateProductStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = ProductStatus),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Produto com linhas de venda")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product_status(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(product_id): Path<i64>,
    Json(payload): Json<UpdateProductStatusPayload>,
) -> Result<Json<ProductStatus>, AppError> {
    payload.validate()?;

    let status = app_state
        .product_service
        .update_status(&owner, product_id, &payload)
        .await?;
    Ok(Json(status))
}

#[utoipa::path(
    get,
    path = "/api/product-status",
    tag = "Product Status",
    responses((status = 200, description = "Status de todos os produtos do dono", body = [ProductStatus])),
    security(("api_jwt" = []))
)]
pub async fn list_product_statuses(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
) -> Result<Json<Vec<ProductStatus>>, AppError> {
    let statuses = app_state.product_service.list_statuses(&owner).await?;
    Ok(Json(statuses))
}
