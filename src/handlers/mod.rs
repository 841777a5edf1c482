pub mod health;
pub mod customers;
pub mod alerts;
pub mod risk;

use axum::{
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub use health::health_check;
pub use customers::{get_customer, get_customer_risk, list_customers, update_customer_status, UpdateStatusRequest};
pub use alerts::{create_alert, list_alerts, CreateAlertRequest};
pub use risk::{list_scored_customers, portfolio_summary};

pub fn create_customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/:id", get(get_customer).patch(update_customer_status))
        .route("/customers/:id/risk", get(get_customer_risk))
}

pub fn create_alert_routes() -> Router<AppState> {
    Router::new().route("/alerts", get(list_alerts).post(create_alert))
}

pub fn create_risk_routes() -> Router<AppState> {
    Router::new()
        .route("/risk/customers", get(list_scored_customers))
        .route("/risk/summary", get(portfolio_summary))
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(create_customer_routes())
        .merge(create_alert_routes())
        .merge(create_risk_routes());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
