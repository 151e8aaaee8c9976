use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use crate::dto::admin_dto::{ChangePasswordRequest, LoginRequest};
use crate::dto::application_dto::StatusResponse;
use crate::error::{Error, Result, ValidationError};
use crate::AppState;

pub async fn change_password(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;
    state.admin_service.change_password(request).await?;
    Ok(Json(StatusResponse::success()))
}

/// Credential check only; no session is issued.
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;
    let email = request
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or(ValidationError::MissingField("email"))?;
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or(ValidationError::MissingField("password"))?;

    let account = state
        .admin_service
        .verify_credentials(email.trim(), &password)
        .await?;
    tracing::info!(admin_id = account.id, "Admin credentials verified");
    Ok(Json(StatusResponse::success()))
}
