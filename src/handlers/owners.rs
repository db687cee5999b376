// src/handlers/owners.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentOwner,
    models::owner::{Owner, UpdateOwnerProfilePayload},
};

#[utoipa::path(
    get,
    path = "/api/owners/me",
    tag = "Owners",
    responses((status = 200, description = "Perfil do dono logado", body = Owner)),
    security(("api_jwt" = []))
)]
pub async fn get_my_profile(CurrentOwner(owner): CurrentOwner) -> Json<Owner> {
    Json(owner)
}

#[utoipa::path(
    put,
    path = "/api/owners/me",
    tag = "Owners",
    request_body = UpdateOwnerProfilePayload,
    responses(
        (status = 200, description = "Perfil atualizado (profileSubmitted = true)", body = Owner),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_my_profile(
    State(app_state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Json(payload): Json<UpdateOwnerProfilePayload>,
) -> Result<Json<Owner>, AppError> {
    payload.validate()?;

    let updated = app_state.owner_service.update_profile(&owner, &payload).await?;
    Ok(Json(updated))
}
