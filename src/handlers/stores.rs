// src/handlers/stores.rs

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
    models::store::{CreateStorePayload, Store, UpdateStorePayload},
};

// POST /api/stores
#[utoipa::path(
    post,
    path = "/api/stores",
    tag = "Stores",
    request_body = CreateStorePayload,
    responses(
        (status = 201, description = "Loja criada", body = Store),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Json(payload): Json<CreateStorePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let store = app_state.store_service.create_store(&owner, &payload).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

// GET /api/stores
#[utoipa::path(
    get,
    path = "/api/stores",
    tag = "Stores",
    responses((status = 200, description = "Lojas do dono", body = [Store])),
    security(("api_jwt" = []))
)]
pub async fn list_stores(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
) -> Result<Json<Vec<Store>>, AppError> {
    let stores = app_state.store_service.list_stores(&owner).await?;
    Ok(Json(stores))
}

#[utoipa::path(
    get,
    path = "/api/stores/{store_id}",
    tag = "Stores",
    params(("store_id" = i64, Path, description = "ID da loja")),
    responses(
        (status = 200, description = "Loja", body = Store),
        (status = 404, description = "Store not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_store(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(store_id): Path<i64>,
) -> Result<Json<Store>, AppError> {
    let store = app_state.store_service.get_store(&owner, store_id).await?;
    Ok(Json(store))
}

#[utoipa::path(
    put,
    path = "/api/stores/{store_id}",
    tag = "Stores",
    params(("store_id" = i64, Path, description = "ID da loja")),
    request_body = UpdateStorePayload,
    responses(
        (status = 200, description = "Loja atualizada", body = Store),
        (status = 404, description = "Store not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_store(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(store_id): Path<i64>,
    Json(payload): Json<UpdateStorePayload>,
) -> Result<Json<Store>, AppError> {
    payload.validate()?;

    let store = app_state
        .store_service
        .update_store(&owner, store_id, &payload)
        .await?;
    Ok(Json(store))
}

// Remove a loja com produtos, status e vendas.
#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}",
    tag = "Stores",
    params(("store_id" = i64, Path, description = "ID da loja")),
    responses(
        (status = 204, description = "Loja removida"),
        (status = 404, description = "Store not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_store(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(store_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.store_service.delete_store(&owner, store_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
