use std::sync::Arc;
use tracing::info;

use crate::database::{AlertRepository, CustomerRepository};
use crate::error::AppError;
use crate::models::{Alert, CreateAlert};
use crate::services::risk_calculator::MAX_RISK_SCORE;

/// Operator-confirmed alert creation.
pub struct AlertService {
    customers: Arc<dyn CustomerRepository>,
    alerts: Arc<dyn AlertRepository>,
}

impl AlertService {
    pub fn new(customers: Arc<dyn CustomerRepository>, alerts: Arc<dyn AlertRepository>) -> Self {
        Self { customers, alerts }
    }

    /// `risk_score` arrives as sent by the client and is stored as a frozen snapshot.
    pub async fn create_alert(&self, customer_id: &str, risk_score: i64) -> Result<Alert, AppError> {
        if !(0..=i64::from(MAX_RISK_SCORE)).contains(&risk_score) {
            return Err(AppError::ValidationError(format!(
                "riskScore must be between 0 and {}, got {}",
                MAX_RISK_SCORE, risk_score
            )));
        }

        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(AppError::CustomerNotFound(customer_id.to_string()));
        }

        info!("Operator confirmed alert for customer {}", customer_id);
        self.alerts
            .append(CreateAlert {
                customer_id: customer_id.to_string(),
                risk_score: risk_score as u8,
            })
            .await
    }

    pub async fn list_alerts(&self) -> Result<Vec<Alert>, AppError> {
        self.alerts.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{sample_customers, InMemoryAlertRepository, InMemoryCustomerRepository};
    use crate::models::AlertStatus;

    fn service() -> AlertService {
        AlertService::new(
            Arc::new(InMemoryCustomerRepository::with_customers(sample_customers()).unwrap()),
            Arc::new(InMemoryAlertRepository::new()),
        )
    }

    #[tokio::test]
    async fn creates_alert_for_known_customer() {
        let service = service();
        let alert = service.create_alert("CUST1004", 72).await.unwrap();

        assert_eq!(alert.customer_id, "CUST1004");
        assert_eq!(alert.risk_score, 72);
        assert_eq!(alert.status, AlertStatus::New);
        assert_eq!(service.list_alerts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_out_of_range_scores() {
        let service = service();
        for score in [-1, 101, 1000] {
            let result = service.create_alert("CUST1004", score).await;
            assert!(matches!(result, Err(AppError::ValidationError(_))));
        }
        assert!(service.list_alerts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_customer() {
        let result = service().create_alert("CUST0000", 80).await;
        assert!(matches!(result, Err(AppError::CustomerNotFound(_))));
    }
}
