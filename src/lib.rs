pub mod config;
pub mod models;
pub mod services;
pub mod handlers;
pub mod database;
pub mod utils;
pub mod error;

pub use error::types::*;

use std::sync::Arc;

use crate::config::Settings;
use crate::database::{establish_store, AlertRepository, CustomerRepository};
use crate::services::{AlertService, PortfolioService, WorkflowService};

/// Shared handles for request handlers. Built once at startup; tests build
/// a fresh one per case.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub customers: Arc<dyn CustomerRepository>,
    pub alerts: Arc<dyn AlertRepository>,
    pub workflow: Arc<WorkflowService>,
    pub alert_service: Arc<AlertService>,
    pub portfolio: Arc<PortfolioService>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        customers: Arc<dyn CustomerRepository>,
        alerts: Arc<dyn AlertRepository>,
    ) -> Self {
        let workflow = WorkflowService::new(customers.clone(), alerts.clone(), &settings.risk);
        let alert_service = AlertService::new(customers.clone(), alerts.clone());
        let portfolio = PortfolioService::new(customers.clone());

        Self {
            settings: Arc::new(settings),
            customers,
            alerts,
            workflow: Arc::new(workflow),
            alert_service: Arc::new(alert_service),
            portfolio: Arc::new(portfolio),
        }
    }

    /// Loads the configured seed data into fresh in-memory repositories.
    pub fn from_settings(settings: Settings) -> Result<Self, AppError> {
        let store = establish_store(&settings.data)?;
        Ok(Self::new(settings, store.customers, store.alerts))
    }
}
