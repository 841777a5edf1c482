use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::database::repository::{AlertRepository, CustomerRepository};
use crate::error::AppError;
use crate::models::{Alert, CreateAlert, Customer, CustomerPatch};

/// Process-local customer store. Keeps load order for listings.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: Vec<Customer>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for customer in &customers {
            if !seen.insert(customer.customer_id.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "duplicate customer id {}",
                    customer.customer_id
                )));
            }
        }

        info!("Loaded {} customers into memory", customers.len());
        Ok(Self {
            customers: RwLock::new(customers),
        })
    }

    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, customer_id: &str) -> Result<Option<Customer>, AppError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.customer_id == customer_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.customers.read().await.clone())
    }

    async fn update(&self, customer_id: &str, patch: CustomerPatch) -> Result<Customer, AppError> {
        let mut customers = self.customers.write().await;
        let customer = customers
            .iter_mut()
            .find(|c| c.customer_id == customer_id)
            .ok_or_else(|| AppError::CustomerNotFound(customer_id.to_string()))?;

        patch.apply(customer);
        debug!("Updated customer {}", customer_id);
        Ok(customer.clone())
    }
}

#[derive(Debug)]
struct AlertLog {
    next_id: u64,
    alerts: Vec<Alert>,
}

/// Append-only alert store. Ids are a strictly increasing sequence.
#[derive(Debug)]
pub struct InMemoryAlertRepository {
    log: RwLock<AlertLog>,
}

impl Default for InMemoryAlertRepository {
    fn default() -> Self {
        Self {
            log: RwLock::new(AlertLog { next_id: 1, alerts: Vec::new() }),
        }
    }
}

impl InMemoryAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.log.read().await.alerts.len()
    }
}

#[async_trait]
impl AlertRepository for InMemoryAlertRepository {
    async fn append(&self, alert: CreateAlert) -> Result<Alert, AppError> {
        let mut log = self.log.write().await;
        let alert = Alert::new(log.next_id.to_string(), alert);
        log.next_id += 1;
        log.alerts.push(alert.clone());

        info!("Created alert {} for customer {} (score {})", alert.id, alert.customer_id, alert.risk_score);
        Ok(alert)
    }

    async fn list(&self) -> Result<Vec<Alert>, AppError> {
        Ok(self.log.read().await.alerts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed::sample_customers;
    use crate::models::ApplicationStatus;

    #[tokio::test]
    async fn update_changes_status_and_is_visible_to_reads() {
        let repo = InMemoryCustomerRepository::with_customers(sample_customers()).unwrap();

        let updated = repo
            .update("CUST1001", CustomerPatch::status(ApplicationStatus::Approved))
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Approved);

        let reread = repo.find_by_id("CUST1001").await.unwrap().unwrap();
        assert_eq!(reread.status, ApplicationStatus::Approved);
    }

    #[tokio::test]
    async fn update_of_missing_customer_changes_nothing() {
        let repo = InMemoryCustomerRepository::with_customers(sample_customers()).unwrap();
        let before = repo.list().await.unwrap();

        let result = repo
            .update("CUST9999", CustomerPatch::status(ApplicationStatus::Rejected))
            .await;

        assert!(matches!(result, Err(AppError::CustomerNotFound(id)) if id == "CUST9999"));
        assert_eq!(repo.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected_at_load() {
        let mut customers = sample_customers();
        customers.push(customers[0].clone());
        assert!(InMemoryCustomerRepository::with_customers(customers).is_err());
    }

    #[tokio::test]
    async fn alert_ids_increase_monotonically() {
        let repo = InMemoryAlertRepository::new();
        let first = repo
            .append(CreateAlert { customer_id: "CUST1002".into(), risk_score: 75 })
            .await
            .unwrap();
        let second = repo
            .append(CreateAlert { customer_id: "CUST1004".into(), risk_score: 81 })
            .await
            .unwrap();

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
        assert_eq!(repo.list().await.unwrap(), vec![first, second]);
    }
}
