use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Alert, CreateAlert, Customer, CustomerPatch};

/// Storage contract for customer records. Reads must observe the latest
/// committed write for the same id.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, customer_id: &str) -> Result<Option<Customer>, AppError>;

    async fn list(&self) -> Result<Vec<Customer>, AppError>;

    /// Fails with `CustomerNotFound` when the id is absent.
    async fn update(&self, customer_id: &str, patch: CustomerPatch) -> Result<Customer, AppError>;
}

/// Append-only storage for alerts. The repository assigns ids.
#[async_trait]
pub trait AlertRepository: Send + Sync {
    async fn append(&self, alert: CreateAlert) -> Result<Alert, AppError>;

    async fn list(&self) -> Result<Vec<Alert>, AppError>;
}
