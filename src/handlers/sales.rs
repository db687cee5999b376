// src/handlers/sales.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentOwner,
    models::sales::{
        CreateSalesPayload, SalesDetail, SalesListQuery, SalesUpdateResponse, UpdateSalesPayload,
    },
};

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSalesPayload,
    responses(
        (status = 201, description = "Venda criada com as linhas", body = SalesDetail),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Store not found / Product not found / Store and product not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sales(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Json(payload): Json<CreateSalesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = app_state.sales_service.create_sales(&owner, &payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /api/sales?store=1
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    params(SalesListQuery),
    responses((status = 200, description = "Vendas do dono, mais recentes primeiro", body = [SalesDetail])),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Query(query): Query<SalesListQuery>,
) -> Result<Json<Vec<SalesDetail>>, AppError> {
    let sales = app_state.sales_service.list_sales(&owner, query.store).await?;
    Ok(Json(sales))
}

#[utoipa::path(
    get,
    path = "/api/sales/{sales_id}",
    tag = "Sales",
    params(("sales_id" = i64, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda", body = SalesDetail),
        (status = 404, description = "Sales not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sales(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(sales_id): Path<i64>,
) -> Result<Json<SalesDetail>, AppError> {
    let detail = app_state.sales_service.get_sales(&owner, sales_id).await?;
    Ok(Json(detail))
}

// PUT /api/sales/{id}: linhas com elect=false são apagadas, id=0 cria.
#[utoipa::path(
    put,
    path = "/api/sales/{sales_id}",
    tag = "Sales",
    params(("sales_id" = i64, Path, description = "ID da venda")),
    request_body = UpdateSalesPayload,
    responses(
        (status = 200, description = "Venda atualizada + ids ativados", body = SalesUpdateResponse),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Sales not found / Store not found / Product not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_sales(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(sales_id): Path<i64>,
    Json(payload): Json<UpdateSalesPayload>,
) -> Result<Json<SalesUpdateResponse>, AppError> {
    payload.validate()?;
    payload.validate_consistency()?;

    let response = app_state
        .sales_service
        .update_sales(&owner, sales_id, &payload)
        .await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/sales/{sales_id}",
    tag = "Sales",
    params(("sales_id" = i64, Path, description = "ID da venda")),
    responses(
        (status = 204, description = "Venda removida com as linhas"),
        (status = 404, description = "Sales not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_sales(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Path(sales_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.sales_service.delete_sales(&owner, sales_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
