use crate::models::{AlertRequest, ApplicationStatus, Customer};
use tracing::info;

pub const HIGH_RISK_ALERT_THRESHOLD: u8 = 70;

/// Flags approvals of high-risk customers. Only decides whether an alert
/// should be requested; it never persists anything.
#[derive(Debug, Clone, Copy)]
pub struct AlertPolicy {
    threshold: u8,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::new(HIGH_RISK_ALERT_THRESHOLD)
    }
}

impl AlertPolicy {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// `score` is computed from the pre-transition attributes.
    pub fn evaluate(
        &self,
        customer: &Customer,
        new_status: ApplicationStatus,
        score: u8,
    ) -> Option<AlertRequest> {
        if new_status != ApplicationStatus::Approved || score < self.threshold {
            return None;
        }

        info!(
            "High-risk approval for customer {} (score {} >= {})",
            customer.customer_id, score, self.threshold
        );

        Some(AlertRequest {
            customer_id: customer.customer_id.clone(),
            risk_score: score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            customer_id: "CUST1007".to_string(),
            name: "George Martinez".to_string(),
            monthly_income: 4200.0,
            monthly_expenses: 3300.0,
            credit_score: 610,
            outstanding_loans: 22000.0,
            loan_repayment_history: vec![0, 1, 0, 0, 1, 0, 1, 0],
            account_balance: 5100.0,
            status: ApplicationStatus::Review,
        }
    }

    #[test]
    fn approval_at_threshold_requests_alert() {
        let request = AlertPolicy::default()
            .evaluate(&customer(), ApplicationStatus::Approved, 70)
            .unwrap();
        assert_eq!(request.customer_id, "CUST1007");
        assert_eq!(request.risk_score, 70);
    }

    #[test]
    fn approval_below_threshold_is_quiet() {
        assert!(AlertPolicy::default()
            .evaluate(&customer(), ApplicationStatus::Approved, 69)
            .is_none());
    }

    #[test]
    fn other_statuses_never_alert() {
        let policy = AlertPolicy::default();
        for status in [ApplicationStatus::Review, ApplicationStatus::Rejected] {
            for score in [0, 70, 100] {
                assert!(policy.evaluate(&customer(), status, score).is_none());
            }
        }
    }

    #[test]
    fn threshold_is_configurable() {
        let policy = AlertPolicy::new(90);
        assert!(policy.evaluate(&customer(), ApplicationStatus::Approved, 85).is_none());
        assert!(policy.evaluate(&customer(), ApplicationStatus::Approved, 90).is_some());
    }
}
