use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::RiskSettings;
use crate::database::{AlertRepository, CustomerRepository};
use crate::error::AppError;
use crate::models::{Alert, AlertRequest, ApplicationStatus, Customer, CustomerPatch};
use crate::services::{AlertPolicy, RiskCalculator, WorkflowStateMachine};
use crate::utils::KeyedLock;

/// Result of a status change as seen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_request: Option<AlertRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
    #[serde(skip)]
    pub risk_score: Option<u8>,
}

/// Runs a status change as one unit per customer: read, score, transition,
/// write, evaluate the alert policy.
pub struct WorkflowService {
    customers: Arc<dyn CustomerRepository>,
    alerts: Arc<dyn AlertRepository>,
    calculator: RiskCalculator,
    state_machine: WorkflowStateMachine,
    policy: AlertPolicy,
    locks: KeyedLock,
    auto_create_alerts: bool,
}

impl WorkflowService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        alerts: Arc<dyn AlertRepository>,
        settings: &RiskSettings,
    ) -> Self {
        Self {
            customers,
            alerts,
            calculator: RiskCalculator::new(),
            state_machine: WorkflowStateMachine::new(),
            policy: AlertPolicy::new(settings.alert_threshold),
            locks: KeyedLock::new(),
            auto_create_alerts: settings.auto_create_alerts,
        }
    }

    pub fn with_state_machine(mut self, state_machine: WorkflowStateMachine) -> Self {
        self.state_machine = state_machine;
        self
    }

    pub async fn change_status_raw(
        &self,
        customer_id: &str,
        raw_status: &str,
    ) -> Result<StatusChange, AppError> {
        let new_status: ApplicationStatus = raw_status.parse()?;
        self.change_status(customer_id, new_status).await
    }

    pub async fn change_status(
        &self,
        customer_id: &str,
        new_status: ApplicationStatus,
    ) -> Result<StatusChange, AppError> {
        let _guard = self.locks.lock(customer_id).await;

        let current = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::CustomerNotFound(customer_id.to_string()))?;

        // Scored before the write; a status-only change leaves the inputs as they are.
        let risk_score = match self.calculator.score(&current) {
            Ok(score) => Some(score),
            Err(e) if new_status == ApplicationStatus::Approved => {
                warn!("Refusing to approve {}: {}", customer_id, e);
                return Err(e);
            }
            Err(e) => {
                warn!("Customer {} cannot be scored, alert policy skipped: {}", customer_id, e);
                None
            }
        };

        let transitioned = self.state_machine.transition(&current, new_status)?;
        let customer = self
            .customers
            .update(customer_id, CustomerPatch::status(transitioned.status))
            .await?;

        info!("Customer {} status {} -> {}", customer_id, current.status, customer.status);

        let alert_request =
            risk_score.and_then(|score| self.policy.evaluate(&customer, new_status, score));

        // The status is already committed here. A failed append leaves
        // `alertRequest` in the response for an operator to confirm.
        let alert = match (&alert_request, self.auto_create_alerts) {
            (Some(request), true) => match self.alerts.append(request.clone().into()).await {
                Ok(alert) => Some(alert),
                Err(e) => {
                    error!("Failed to auto-create alert for customer {}: {}", customer_id, e);
                    None
                }
            },
            _ => None,
        };

        Ok(StatusChange {
            customer,
            alert_request,
            alert,
            risk_score,
        })
    }
}
