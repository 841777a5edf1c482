use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::DataSettings;
use crate::error::AppError;
use crate::models::{ApplicationStatus, Customer};

#[allow(clippy::too_many_arguments)]
fn record(
    customer_id: &str,
    name: &str,
    monthly_income: f64,
    monthly_expenses: f64,
    credit_score: i32,
    outstanding_loans: f64,
    loan_repayment_history: [u8; 8],
    account_balance: f64,
    status: ApplicationStatus,
) -> Customer {
    Customer {
        customer_id: customer_id.to_string(),
        name: name.to_string(),
        monthly_income,
        monthly_expenses,
        credit_score,
        outstanding_loans,
        loan_repayment_history: loan_repayment_history.to_vec(),
        account_balance,
        status,
    }
}

/// The demo roster served when no seed file is configured.
pub fn sample_customers() -> Vec<Customer> {
    use ApplicationStatus::*;

    vec![
        record("CUST1001", "Alice Johnson", 6200.0, 3500.0, 710, 15000.0, [1, 0, 1, 1, 1, 1, 0, 1], 12500.0, Review),
        record("CUST1002", "Bob Smith", 4800.0, 2800.0, 640, 20000.0, [1, 1, 1, 0, 0, 1, 0, 0], 7300.0, Approved),
        record("CUST1003", "Charlie Davis", 7500.0, 4200.0, 780, 25000.0, [1, 1, 1, 1, 1, 1, 1, 1], 18900.0, Approved),
        record("CUST1004", "Diana Wilson", 3800.0, 2500.0, 590, 12000.0, [0, 0, 1, 0, 1, 0, 1, 0], 3200.0, Rejected),
        record("CUST1005", "Edward Brown", 5500.0, 3100.0, 680, 18000.0, [1, 1, 0, 1, 1, 0, 1, 1], 9800.0, Review),
        record("CUST1006", "Fiona Taylor", 9200.0, 5800.0, 820, 30000.0, [1, 1, 1, 1, 1, 1, 1, 1], 27500.0, Approved),
        record("CUST1007", "George Martinez", 4200.0, 3300.0, 610, 22000.0, [0, 1, 0, 0, 1, 0, 1, 0], 5100.0, Review),
        record("CUST1008", "Hannah Anderson", 6800.0, 3900.0, 740, 17000.0, [1, 1, 1, 0, 1, 1, 1, 1], 15300.0, Review),
    ]
}

/// Reads a JSON array of customer records.
pub fn load_customers_from_file(path: impl AsRef<Path>) -> Result<Vec<Customer>, AppError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let customers: Vec<Customer> = serde_json::from_str(&raw).map_err(|e| {
        AppError::ValidationError(format!("invalid seed file {}: {}", path.display(), e))
    })?;

    info!("Read {} customers from {}", customers.len(), path.display());
    Ok(customers)
}

/// Seed file wins over the sample roster; with neither the store starts empty.
pub fn initial_customers(settings: &DataSettings) -> Result<Vec<Customer>, AppError> {
    match &settings.seed_file {
        Some(path) => load_customers_from_file(path),
        None if settings.load_sample_roster => Ok(sample_customers()),
        None => Ok(Vec::new()),
    }
}
