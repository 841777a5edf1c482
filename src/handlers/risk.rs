use axum::{
    extract::{Query, State},
    response::Json,
};

use crate::error::AppError;
use crate::models::{PortfolioSummary, ScoredCustomer};
use crate::services::CustomerQuery;
use crate::AppState;

/// GET /api/risk/customers
pub async fn list_scored_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<ScoredCustomer>>, AppError> {
    let customers = state.portfolio.scored_customers(&query).await?;
    Ok(Json(customers))
}

/// GET /api/risk/summary
pub async fn portfolio_summary(
    State(state): State<AppState>,
) -> Result<Json<PortfolioSummary>, AppError> {
    let summary = state.portfolio.summary().await?;
    Ok(Json(summary))
}
