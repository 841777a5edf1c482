use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::database::CustomerRepository;
use crate::error::AppError;
use crate::models::{
    ApplicationStatus, Customer, PortfolioSummary, RiskAssessment, RiskLevel, ScoredCustomer,
};
use crate::services::RiskCalculator;

/// Optional filters for customer listings. All present filters must match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub risk_level: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
struct ParsedFilters {
    status: Option<ApplicationStatus>,
    risk_level: Option<RiskLevel>,
}

impl CustomerQuery {
    fn parse(&self) -> Result<ParsedFilters, AppError> {
        Ok(ParsedFilters {
            status: self.status.as_deref().map(str::parse::<ApplicationStatus>).transpose()?,
            risk_level: self.risk_level.as_deref().map(str::parse::<RiskLevel>).transpose()?,
        })
    }

    fn matches_customer(&self, filters: &ParsedFilters, customer: &Customer) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => customer.matches_search(needle),
            _ => true,
        };
        let status_ok = filters.status.map_or(true, |status| customer.status == status);
        search_ok && status_ok
    }
}

/// Read-side views computed from the current customer records.
pub struct PortfolioService {
    customers: Arc<dyn CustomerRepository>,
    calculator: RiskCalculator,
}

impl PortfolioService {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self {
            customers,
            calculator: RiskCalculator::new(),
        }
    }

    pub async fn list_customers(&self, query: &CustomerQuery) -> Result<Vec<Customer>, AppError> {
        let filters = query.parse()?;
        Ok(self
            .customers
            .list()
            .await?
            .into_iter()
            .filter(|c| query.matches_customer(&filters, c))
            .collect())
    }

    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer, AppError> {
        self.customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::CustomerNotFound(customer_id.to_string()))
    }

    pub async fn assess_customer(&self, customer_id: &str) -> Result<RiskAssessment, AppError> {
        let customer = self.get_customer(customer_id).await?;
        self.calculator.assess(&customer)
    }

    /// Customers that cannot be scored are left out and logged.
    pub async fn scored_customers(&self, query: &CustomerQuery) -> Result<Vec<ScoredCustomer>, AppError> {
        let filters = query.parse()?;
        let mut scored = Vec::new();

        for customer in self.customers.list().await? {
            if !query.matches_customer(&filters, &customer) {
                continue;
            }
            let risk_score = match self.calculator.score(&customer) {
                Ok(score) => score,
                Err(e) => {
                    warn!("Skipping customer {}: {}", customer.customer_id, e);
                    continue;
                }
            };
            let risk_level = RiskLevel::from_score(risk_score);
            if filters.risk_level.map_or(false, |wanted| wanted != risk_level) {
                continue;
            }
            scored.push(ScoredCustomer { customer, risk_score, risk_level });
        }

        Ok(scored)
    }

    pub async fn summary(&self) -> Result<PortfolioSummary, AppError> {
        let customers = self.customers.list().await?;
        let mut summary = PortfolioSummary {
            total_customers: customers.len(),
            ..PortfolioSummary::default()
        };
        let mut score_total: u64 = 0;
        let mut scored: u64 = 0;

        for customer in &customers {
            match customer.status {
                ApplicationStatus::Review => summary.pending_review += 1,
                ApplicationStatus::Approved => summary.approved += 1,
                ApplicationStatus::Rejected => summary.rejected += 1,
            }
            summary.total_monthly_income += customer.monthly_income;
            summary.total_monthly_expenses += customer.monthly_expenses;

            match self.calculator.score(customer) {
                Ok(score) => {
                    score_total += u64::from(score);
                    scored += 1;
                    match RiskLevel::from_score(score) {
                        RiskLevel::Low => summary.low_risk += 1,
                        RiskLevel::Medium => summary.medium_risk += 1,
                        RiskLevel::High => summary.high_risk += 1,
                    }
                }
                Err(_) => summary.unscorable += 1,
            }
        }

        if scored > 0 {
            summary.average_risk_score = (score_total as f64 / scored as f64).round() as u8;
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{sample_customers, InMemoryCustomerRepository};

    fn service_with(customers: Vec<Customer>) -> PortfolioService {
        PortfolioService::new(Arc::new(InMemoryCustomerRepository::with_customers(customers).unwrap()))
    }

    #[tokio::test]
    async fn summary_of_sample_roster() {
        let summary = service_with(sample_customers()).summary().await.unwrap();

        assert_eq!(summary.total_customers, 8);
        assert_eq!(summary.pending_review, 4);
        assert_eq!(summary.approved, 3);
        assert_eq!(summary.rejected, 1);
        // 48, 60, 35, 68, 50, 32, 66, 42
        assert_eq!(summary.low_risk, 0);
        assert_eq!(summary.medium_risk, 8);
        assert_eq!(summary.high_risk, 0);
        assert_eq!(summary.average_risk_score, 50);
        assert_eq!(summary.total_monthly_income, 48000.0);
        assert_eq!(summary.total_monthly_expenses, 29100.0);
        assert_eq!(summary.unscorable, 0);
    }

    #[tokio::test]
    async fn summary_counts_unscorable_customers() {
        let mut customers = sample_customers();
        customers[0].monthly_income = 0.0;
        let summary = service_with(customers).summary().await.unwrap();
        assert_eq!(summary.unscorable, 1);
        assert_eq!(summary.medium_risk, 7);
    }

    #[tokio::test]
    async fn empty_portfolio_averages_zero() {
        let summary = service_with(Vec::new()).summary().await.unwrap();
        assert_eq!(summary, PortfolioSummary::default());
    }

    #[tokio::test]
    async fn filters_combine() {
        let service = service_with(sample_customers());
        let query = CustomerQuery {
            search: Some("an".to_string()),
            status: Some("Review".to_string()),
            risk_level: None,
        };

        let ids: Vec<_> = service
            .list_customers(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.customer_id)
            .collect();
        // Diana Wilson matches the search but is Rejected
        assert_eq!(ids, vec!["CUST1008"]);
    }

    #[tokio::test]
    async fn scored_customers_filter_by_level() {
        let service = service_with(sample_customers());
        let query = CustomerQuery { risk_level: Some("medium".to_string()), ..Default::default() };
        assert_eq!(service.scored_customers(&query).await.unwrap().len(), 8);

        let query = CustomerQuery { risk_level: Some("high".to_string()), ..Default::default() };
        assert!(service.scored_customers(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bad_filter_values_are_rejected() {
        let service = service_with(sample_customers());
        let query = CustomerQuery { status: Some("Pending".to_string()), ..Default::default() };
        assert!(matches!(service.list_customers(&query).await, Err(AppError::InvalidStatus(_))));
    }
}
