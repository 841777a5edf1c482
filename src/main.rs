use credit_risk_workflow::{
    config::Settings,
    handlers::create_router,
    utils::init_logging,
    AppState,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;
    init_logging(&settings.logging)?;

    info!("Starting Credit Risk Workflow service");
    info!(
        "Alert threshold {} (auto-create: {})",
        settings.risk.alert_threshold, settings.risk.auto_create_alerts
    );

    let bind_address = settings.bind_address();
    let state = AppState::from_settings(settings)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("API server running on {}", bind_address);
    info!("API endpoints available at:");
    info!("  GET    /health - Service health");
    info!("  GET    /api/customers - List customers");
    info!("  GET    /api/customers/{{id}} - Get customer");
    info!("  PATCH  /api/customers/{{id}} - Change workflow status");
    info!("  GET    /api/customers/{{id}}/risk - Risk assessment");
    info!("  GET    /api/risk/customers - Customers with risk scores");
    info!("  GET    /api/risk/summary - Portfolio summary");
    info!("  GET    /api/alerts - List alerts");
    info!("  POST   /api/alerts - Create alert");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Web server error: {}", e);
        return Err(e.into());
    }

    info!("Shutting down Credit Risk Workflow service");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Received shutdown signal");
}
