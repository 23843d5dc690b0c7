//! Working state for a single simulation run

use crate::debt::Debt;

/// Live balance of a debt that still owes money
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDebt {
    /// Position of the debt in the caller's input list
    pub index: usize,

    /// Current balance, interest included
    pub balance: f64,

    /// Monthly rate as a decimal
    pub monthly_rate: f64,

    pub min_payment: f64,
}

/// Simulation state, created fresh per run and discarded with the result
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Debts with a positive balance, in payment priority order
    pub remaining: Vec<ActiveDebt>,

    /// Months simulated so far
    pub months_elapsed: u32,

    /// Interest charged across all debts and months
    pub total_interest_accrued: f64,
}

impl SimulationState {
    /// Build the working copy from the input debts and a priority order.
    /// Debts that start at zero are never active.
    pub fn new(debts: &[Debt], order: &[usize]) -> Self {
        let remaining = order
            .iter()
            .map(|&index| (index, &debts[index]))
            .filter(|(_, debt)| !debt.is_paid_off())
            .map(|(index, debt)| ActiveDebt {
                index,
                balance: debt.balance,
                monthly_rate: debt.monthly_rate(),
                min_payment: debt.min_payment,
            })
            .collect();

        Self {
            remaining,
            months_elapsed: 0,
            total_interest_accrued: 0.0,
        }
    }

    /// All debts cleared
    pub fn is_settled(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Sum of live balances
    pub fn remaining_balance(&self) -> f64 {
        self.remaining.iter().map(|d| d.balance).sum()
    }

    /// Minimum payments of debts still active
    pub fn active_min_payment(&self) -> f64 {
        self.remaining.iter().map(|d| d.min_payment).sum()
    }
}
