use crate::error::AppError;
use crate::models::{ApplicationStatus, Customer};
use tracing::debug;

use ApplicationStatus::{Approved, Rejected, Review};

/// Every allowed `(from, to)` edge. Restricting the workflow means removing
/// an edge here; nothing else in the crate decides legality.
pub const DEFAULT_TRANSITIONS: &[(ApplicationStatus, ApplicationStatus)] = &[
    (Review, Review),
    (Review, Approved),
    (Review, Rejected),
    (Approved, Review),
    (Approved, Approved),
    (Approved, Rejected),
    (Rejected, Review),
    (Rejected, Approved),
    (Rejected, Rejected),
];

#[derive(Debug, Clone, Copy)]
pub struct TransitionTable {
    edges: &'static [(ApplicationStatus, ApplicationStatus)],
}

impl TransitionTable {
    pub const fn new(edges: &'static [(ApplicationStatus, ApplicationStatus)]) -> Self {
        Self { edges }
    }

    pub fn allows(&self, from: ApplicationStatus, to: ApplicationStatus) -> bool {
        self.edges.iter().any(|&(f, t)| f == from && t == to)
    }

    pub fn targets(&self, from: ApplicationStatus) -> Vec<ApplicationStatus> {
        self.edges
            .iter()
            .filter(|(f, _)| *f == from)
            .map(|&(_, t)| t)
            .collect()
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITIONS)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowStateMachine {
    table: TransitionTable,
}

impl WorkflowStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: TransitionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Returns the customer as it looks after the transition. The input is
    /// left untouched; persisting the result is the caller's job.
    pub fn transition(
        &self,
        customer: &Customer,
        new_status: ApplicationStatus,
    ) -> Result<Customer, AppError> {
        let from = customer.status;
        if !self.table.allows(from, new_status) {
            return Err(AppError::InvalidTransition {
                from: from.to_string(),
                to: new_status.to_string(),
            });
        }

        debug!("Transition {} {} -> {}", customer.customer_id, from, new_status);

        let mut updated = customer.clone();
        updated.status = new_status;
        Ok(updated)
    }

    /// Parses a raw status value first, so unknown values never reach the table.
    pub fn transition_raw(&self, customer: &Customer, raw_status: &str) -> Result<Customer, AppError> {
        let new_status: ApplicationStatus = raw_status.parse()?;
        self.transition(customer, new_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_in(status: ApplicationStatus) -> Customer {
        Customer {
            customer_id: "CUST1005".to_string(),
            name: "Edward Brown".to_string(),
            monthly_income: 5500.0,
            monthly_expenses: 3100.0,
            credit_score: 680,
            outstanding_loans: 18000.0,
            loan_repayment_history: vec![1, 1, 0, 1, 1, 0, 1, 1],
            account_balance: 9800.0,
            status,
        }
    }

    #[test]
    fn every_status_reaches_every_status() {
        let machine = WorkflowStateMachine::new();
        for from in ApplicationStatus::ALL {
            for to in ApplicationStatus::ALL {
                let updated = machine.transition(&customer_in(from), to).unwrap();
                assert_eq!(updated.status, to);
            }
        }
    }

    #[test]
    fn transition_changes_only_status() {
        let machine = WorkflowStateMachine::new();
        let before = customer_in(ApplicationStatus::Review);
        let after = machine.transition(&before, ApplicationStatus::Approved).unwrap();

        assert_eq!(before.status, ApplicationStatus::Review);
        assert_eq!(Customer { status: ApplicationStatus::Review, ..after }, before);
    }

    #[test]
    fn unknown_raw_status_is_rejected() {
        let machine = WorkflowStateMachine::new();
        let result = machine.transition_raw(&customer_in(ApplicationStatus::Review), "Escalated");
        assert!(matches!(result, Err(AppError::InvalidStatus(s)) if s == "Escalated"));
    }

    #[test]
    fn missing_edge_is_an_invalid_transition() {
        const NO_REOPEN: &[(ApplicationStatus, ApplicationStatus)] = &[
            (Review, Approved),
            (Review, Rejected),
            (Rejected, Review),
        ];
        let machine = WorkflowStateMachine::with_table(TransitionTable::new(NO_REOPEN));

        let result = machine.transition(&customer_in(Rejected), Approved);
        assert!(matches!(result, Err(AppError::InvalidTransition { .. })));
        assert_eq!(machine.table().targets(Rejected), vec![Review]);
    }
}
