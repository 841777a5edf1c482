use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::AppError;
use crate::models::{Customer, RiskAssessment};
use crate::services::{CustomerQuery, StatusChange};
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Left untyped so a number or object is reported as an invalid status.
    pub status: Option<Value>,
}

/// GET /api/customers
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state.portfolio.list_customers(&query).await?;
    Ok(Json(customers))
}

/// GET /api/customers/:id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    let customer = state.portfolio.get_customer(&customer_id).await?;
    Ok(Json(customer))
}

/// PATCH /api/customers/:id
pub async fn update_customer_status(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<StatusChange>, AppError> {
    let Json(request) = payload?;
    let status = match request.status {
        None | Some(Value::Null) => {
            return Err(AppError::ValidationError("status is required".to_string()));
        }
        Some(Value::String(status)) => status,
        Some(other) => return Err(AppError::InvalidStatus(other.to_string())),
    };

    info!("Status change requested for {}: {}", customer_id, status);
    let change = state.workflow.change_status_raw(&customer_id, &status).await?;
    Ok(Json(change))
}

/// GET /api/customers/:id/risk
pub async fn get_customer_risk(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<RiskAssessment>, AppError> {
    let assessment = state.portfolio.assess_customer(&customer_id).await?;
    Ok(Json(assessment))
}
