use crate::error::AppError;
use crate::models::{Customer, RiskAssessment, RiskComponents, RiskLevel};
use tracing::debug;

/// Reference interval for credit score normalization.
pub const CREDIT_SCORE_MIN: f64 = 300.0;
pub const CREDIT_SCORE_MAX: f64 = 850.0;

pub const CREDIT_SCORE_WEIGHT: f64 = 40.0;
pub const REPAYMENT_WEIGHT: f64 = 30.0;
/// Steeper than the cap so every ratio above 0.6 saturates.
pub const DEBT_TO_INCOME_MULTIPLIER: f64 = 50.0;
pub const DEBT_TO_INCOME_CAP: f64 = 30.0;
/// Share of outstanding loans assumed to be repaid each month.
pub const MONTHLY_LOAN_PAYMENT_RATE: f64 = 0.05;

pub const MIN_RISK_SCORE: u8 = 0;
pub const MAX_RISK_SCORE: u8 = 100;

/// Deterministic 0-100 credit risk score. Higher means riskier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskCalculator;

impl RiskCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, customer: &Customer) -> Result<u8, AppError> {
        let components = self.calculate_components(customer)?;
        Ok(Self::finalize(components.total()))
    }

    pub fn assess(&self, customer: &Customer) -> Result<RiskAssessment, AppError> {
        let components = self.calculate_components(customer)?;
        let risk_score = Self::finalize(components.total());

        debug!(
            "Assessed customer {}: credit={:.2} repayment={:.2} dti={:.2} score={}",
            customer.customer_id,
            components.credit_score,
            components.repayment_history,
            components.debt_to_income,
            risk_score
        );

        Ok(RiskAssessment {
            customer_id: customer.customer_id.clone(),
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            components,
            missed_payments: customer.missed_payments(),
            total_payments: customer.loan_repayment_history.len(),
            debt_to_income_ratio: Self::debt_to_income_ratio(customer),
        })
    }

    pub fn calculate_components(&self, customer: &Customer) -> Result<RiskComponents, AppError> {
        Self::validate_inputs(customer)?;

        Ok(RiskComponents {
            credit_score: Self::credit_score_component(customer.credit_score),
            repayment_history: Self::repayment_component(&customer.loan_repayment_history),
            debt_to_income: Self::debt_to_income_component(customer),
        })
    }

    fn validate_inputs(customer: &Customer) -> Result<(), AppError> {
        if customer.loan_repayment_history.is_empty() {
            return Err(AppError::InvalidScoringInput(format!(
                "customer {} has an empty repayment history",
                customer.customer_id
            )));
        }
        if let Some(entry) = customer.loan_repayment_history.iter().find(|&&p| p > 1) {
            return Err(AppError::InvalidScoringInput(format!(
                "customer {} has repayment entry {}; expected 0 or 1",
                customer.customer_id, entry
            )));
        }
        if !customer.monthly_income.is_finite() || customer.monthly_income <= 0.0 {
            return Err(AppError::InvalidScoringInput(format!(
                "customer {} has non-positive monthly income {}",
                customer.customer_id, customer.monthly_income
            )));
        }
        for (field, value) in [
            ("monthlyExpenses", customer.monthly_expenses),
            ("outstandingLoans", customer.outstanding_loans),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::InvalidScoringInput(format!(
                    "customer {} has invalid {} {}",
                    customer.customer_id, field, value
                )));
            }
        }
        Ok(())
    }

    // Not clamped: credit scores outside 300..=850 leave the [0, 40] band.
    fn credit_score_component(credit_score: i32) -> f64 {
        let normalized = 1.0
            - (f64::from(credit_score) - CREDIT_SCORE_MIN) / (CREDIT_SCORE_MAX - CREDIT_SCORE_MIN);
        normalized * CREDIT_SCORE_WEIGHT
    }

    fn repayment_component(history: &[u8]) -> f64 {
        let missed = history.iter().filter(|&&payment| payment == 0).count();
        let missed_ratio = missed as f64 / history.len() as f64;
        missed_ratio * REPAYMENT_WEIGHT
    }

    fn debt_to_income_component(customer: &Customer) -> f64 {
        (Self::debt_to_income_ratio(customer) * DEBT_TO_INCOME_MULTIPLIER).min(DEBT_TO_INCOME_CAP)
    }

    fn debt_to_income_ratio(customer: &Customer) -> f64 {
        let monthly_loan_payment = customer.outstanding_loans * MONTHLY_LOAN_PAYMENT_RATE;
        (monthly_loan_payment + customer.monthly_expenses) / customer.monthly_income
    }

    fn finalize(raw: f64) -> u8 {
        raw.round()
            .clamp(f64::from(MIN_RISK_SCORE), f64::from(MAX_RISK_SCORE)) as u8
    }
}
