use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Human-decision state of a loan application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Review,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [
        ApplicationStatus::Review,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Review => "Review",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Review" => Ok(ApplicationStatus::Review),
            "Approved" => Ok(ApplicationStatus::Approved),
            "Rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(AppError::InvalidStatus(other.to_string())),
        }
    }
}

/// Canonical customer record. The risk score is deliberately absent: it is
/// always recomputed from these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: String,
    pub name: String,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub credit_score: i32,
    pub outstanding_loans: f64,
    /// Chronological, 1 = paid on time, 0 = missed.
    pub loan_repayment_history: Vec<u8>,
    pub account_balance: f64,
    #[serde(default)]
    pub status: ApplicationStatus,
}

impl Customer {
    pub fn missed_payments(&self) -> usize {
        self.loan_repayment_history.iter().filter(|&&payment| payment == 0).count()
    }

    /// Case-insensitive match against name or customer id.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.customer_id.to_lowercase().contains(&needle)
    }
}

/// Fields a repository update may change. Only the status is mutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerPatch {
    pub status: Option<ApplicationStatus>,
}

impl CustomerPatch {
    pub fn status(status: ApplicationStatus) -> Self {
        Self { status: Some(status) }
    }

    pub fn apply(&self, customer: &mut Customer) {
        if let Some(status) = self.status {
            customer.status = status;
        }
    }
}
