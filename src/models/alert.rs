use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertStatus {
    New,
}

/// A high-risk approval flagged for human follow-up. The risk score is a
/// snapshot taken when the alert was raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub customer_id: String,
    pub risk_score: u8,
    pub created_at: DateTime<Utc>,
    pub status: AlertStatus,
}

/// Decision produced by the alert policy; persisting it is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRequest {
    pub customer_id: String,
    pub risk_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlert {
    pub customer_id: String,
    pub risk_score: u8,
}

impl From<AlertRequest> for CreateAlert {
    fn from(request: AlertRequest) -> Self {
        Self {
            customer_id: request.customer_id,
            risk_score: request.risk_score,
        }
    }
}

impl Alert {
    pub fn new(id: String, create_alert: CreateAlert) -> Self {
        Self {
            id,
            customer_id: create_alert.customer_id,
            risk_score: create_alert.risk_score,
            created_at: Utc::now(),
            status: AlertStatus::New,
        }
    }
}
