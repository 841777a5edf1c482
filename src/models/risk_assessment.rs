use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;
use crate::models::Customer;

/// Upper bounds (exclusive) of the low and medium risk bands.
pub const LOW_RISK_CEILING: u8 = 30;
pub const MEDIUM_RISK_CEILING: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score < LOW_RISK_CEILING {
            RiskLevel::Low
        } else if score < MEDIUM_RISK_CEILING {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl FromStr for RiskLevel {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(AppError::ValidationError(format!("unknown risk level: {}", other))),
        }
    }
}

/// Weighted contributions before rounding and clamping. The credit score
/// contribution may fall outside [0, 40] for out-of-range credit scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskComponents {
    pub credit_score: f64,
    pub repayment_history: f64,
    pub debt_to_income: f64,
}

impl RiskComponents {
    pub fn total(&self) -> f64 {
        self.credit_score + self.repayment_history + self.debt_to_income
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub customer_id: String,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub components: RiskComponents,
    pub missed_payments: usize,
    pub total_payments: usize,
    pub debt_to_income_ratio: f64,
}

/// Customer record with its score computed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCustomer {
    #[serde(flatten)]
    pub customer: Customer,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_customers: usize,
    pub pending_review: usize,
    pub approved: usize,
    pub rejected: usize,
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
    pub average_risk_score: u8,
    pub total_monthly_income: f64,
    pub total_monthly_expenses: f64,
    pub unscorable: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_band_edges() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn risk_level_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("severe".parse::<RiskLevel>().is_err());
    }
}
