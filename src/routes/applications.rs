use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::IntoResponse,
    Json,
};

use crate::dto::application_dto::{ApplyRequest, StatusResponse, SubmissionResponse};
use crate::error::{Error, Result};
use crate::models::application::Decision;
use crate::AppState;

pub async fn apply(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;
    let application = state.application_service.submit(request).await?;
    Ok(Json(SubmissionResponse::success(application.id)))
}

pub async fn list_applications(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let applications = state.application_service.list().await?;
    Ok(Json(applications))
}

pub async fn approve_application(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let id = application_id(id)?;
    state
        .application_service
        .decide(id, Decision::Approve)
        .await?;
    Ok(Json(StatusResponse::success()))
}

pub async fn reject_application(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let id = application_id(id)?;
    state
        .application_service
        .decide(id, Decision::Reject)
        .await?;
    Ok(Json(StatusResponse::success()))
}

/// Ids that are not integers cannot name an application.
fn application_id(path: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    let Path(id) = path
        .map_err(|e| Error::NotFound(format!("Application not found: {}", e.body_text())))?;
    Ok(id)
}
