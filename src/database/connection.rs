use std::sync::Arc;
use tracing::info;

use crate::config::DataSettings;
use crate::database::memory::{InMemoryAlertRepository, InMemoryCustomerRepository};
use crate::database::seed::initial_customers;
use crate::error::AppError;

/// Repositories shared by every request handler for the life of the process.
#[derive(Debug, Clone)]
pub struct Store {
    pub customers: Arc<InMemoryCustomerRepository>,
    pub alerts: Arc<InMemoryAlertRepository>,
}

pub fn establish_store(settings: &DataSettings) -> Result<Store, AppError> {
    info!("Initializing in-memory store");

    let customers = InMemoryCustomerRepository::with_customers(initial_customers(settings)?)?;

    info!("In-memory store ready");
    Ok(Store {
        customers: Arc::new(customers),
        alerts: Arc::new(InMemoryAlertRepository::new()),
    })
}
