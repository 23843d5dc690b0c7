//! Month-by-month payoff engine

use crate::debt::{validate_debts, validate_extra_payment, Debt};
use crate::error::InvalidDebtError;
use crate::strategy::Strategy;
use super::schedule::{DebtMonth, MonthRow, PayoffResult};
use super::state::SimulationState;

/// Safety cap: 30 years of monthly payments
pub const DEFAULT_MAX_MONTHS: u16 = 360;

/// How the pooled monthly payment is sized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BudgetMode {
    /// Minimums of every debt plus the extra amount, fixed for the whole run.
    /// Minimums freed by paid-off debts stay in the pool.
    #[default]
    Rollover,
    /// Minimums of debts still active plus the extra amount, recomputed each month
    ActiveMinimums,
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Payment priority order
    pub strategy: Strategy,

    /// Monthly amount on top of the minimum payments
    pub extra_payment: f64,

    /// Months simulated before giving up on a balance that does not shrink
    pub max_months: u16,

    pub budget_mode: BudgetMode,

    /// Whether to keep a row per simulated month
    pub record_schedule: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Avalanche,
            extra_payment: 0.0,
            max_months: DEFAULT_MAX_MONTHS,
            budget_mode: BudgetMode::Rollover,
            record_schedule: false,
        }
    }
}

impl SimulationConfig {
    pub fn new(strategy: Strategy, extra_payment: f64) -> Self {
        Self {
            strategy,
            extra_payment,
            ..Default::default()
        }
    }
}

/// Payoff simulation engine. Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct PayoffEngine {
    config: SimulationConfig,
}

impl PayoffEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the simulation until every debt is paid or the cap is reached.
    ///
    /// Inputs are validated first; an invalid debt or extra payment returns
    /// an error without simulating anything.
    pub fn simulate(&self, debts: &[Debt]) -> Result<PayoffResult, InvalidDebtError> {
        validate_debts(debts)?;
        validate_extra_payment(self.config.extra_payment)?;

        let max_months = u32::from(self.config.max_months);
        let order = self.config.strategy.order(debts);
        let mut state = SimulationState::new(debts, &order);
        let mut result = PayoffResult::new(self.config.strategy, debts, max_months);

        // Minimums of every debt, including ones that start at zero
        let total_min_payment: f64 = debts.iter().map(|d| d.min_payment).sum();

        log::debug!(
            "Simulating {} debts ({} active), strategy={}, extra={:.2}, mode={:?}",
            debts.len(),
            state.remaining.len(),
            self.config.strategy,
            self.config.extra_payment,
            self.config.budget_mode,
        );

        while !state.is_settled() && state.months_elapsed < max_months {
            let budget = match self.config.budget_mode {
                BudgetMode::Rollover => total_min_payment,
                BudgetMode::ActiveMinimums => state.active_min_payment(),
            } + self.config.extra_payment;

            let row = self.simulate_month(&mut state, &mut result, budget);

            log::trace!(
                "Month {}: paid {:.2}, interest {:.2}, {} debts remaining",
                row.month,
                row.paid(),
                row.interest(),
                state.remaining.len(),
            );

            if self.config.record_schedule {
                result.add_row(row);
            }
        }

        result.months_elapsed = state.months_elapsed;
        result.total_interest = state.total_interest_accrued;
        result.remaining_balance = state.remaining_balance();

        if state.is_settled() {
            log::debug!(
                "Paid off in {} months, total interest {:.2}",
                result.months_elapsed,
                result.total_interest
            );
        } else {
            log::warn!(
                "Stopped at the {}-month cap with {:.2} still owed",
                max_months,
                result.remaining_balance
            );
        }

        Ok(result)
    }

    /// Apply one month of interest and the payment waterfall.
    ///
    /// Each active debt in priority order accrues interest, then takes as much
    /// of the remaining budget as its balance absorbs. Whatever a cleared debt
    /// leaves unspent flows to the next debt in the same month.
    fn simulate_month(
        &self,
        state: &mut SimulationState,
        result: &mut PayoffResult,
        budget: f64,
    ) -> MonthRow {
        state.months_elapsed += 1;
        let month = state.months_elapsed;

        let mut row = MonthRow::new(month, budget);
        let mut available = budget;

        for debt in state.remaining.iter_mut() {
            let opening_balance = debt.balance;

            let interest = debt.balance * debt.monthly_rate;
            state.total_interest_accrued += interest;
            debt.balance += interest;

            let payment = available.min(debt.balance);
            available -= payment;
            debt.balance -= payment;

            let outcome = &mut result.outcomes[debt.index];
            outcome.interest_paid += interest;
            outcome.total_paid += payment;
            if debt.balance <= 0.0 {
                debt.balance = 0.0;
                outcome.payoff_month = Some(month);
            }

            row.debts.push(DebtMonth {
                debt_index: debt.index,
                opening_balance,
                interest,
                payment,
                closing_balance: debt.balance,
            });
        }

        row.unallocated = available;
        state.remaining.retain(|d| d.balance > 0.0);

        row
    }
}
