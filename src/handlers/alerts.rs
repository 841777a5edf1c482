use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Alert;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
    pub customer_id: String,
    pub risk_score: i64,
}

/// GET /api/alerts
pub async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<Alert>>, AppError> {
    let alerts = state.alert_service.list_alerts().await?;
    Ok(Json(alerts))
}

/// POST /api/alerts
pub async fn create_alert(
    State(state): State<AppState>,
    payload: Result<Json<CreateAlertRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Alert>), AppError> {
    let Json(request) = payload?;
    let alert = state
        .alert_service
        .create_alert(&request.customer_id, request.risk_score)
        .await?;
    Ok((StatusCode::CREATED, Json(alert)))
}
