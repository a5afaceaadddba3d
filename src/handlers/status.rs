use crate::dtos::StatusCheckCreate;
use crate::error::AppError;
use crate::models::StatusCheck;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{extract::State, Json};

pub async fn create_status_check(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, AppError> {
    let check = StatusCheck::new(request.client_name);
    state.db.insert_status_check(&check).await?;

    tracing::info!(status_id = %check.id, client_name = %check.client_name, "Status check recorded");

    Ok(Json(check))
}

pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, AppError> {
    let checks = state.db.list_status_checks().await?;
    Ok(Json(checks))
}
