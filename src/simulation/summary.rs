//! Headline figures derived from a finished simulation

use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use crate::error::InvalidDebtError;
use crate::strategy::Strategy;
use super::engine::{PayoffEngine, SimulationConfig};
use super::schedule::PayoffResult;

/// Payoff time, date and interest for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffSummary {
    /// Months simulated. Equal to the cap when `resolved` is false.
    pub payoff_months: u32,

    /// Start date advanced by `payoff_months` calendar months
    pub payoff_date: NaiveDate,

    /// Interest accrued over the run
    pub total_interest: f64,

    /// Whether every debt reached zero within the cap
    pub resolved: bool,
}

impl PayoffSummary {
    /// Summarize a result, counting months from `start`
    pub fn from_result(result: &PayoffResult, start: NaiveDate) -> Self {
        Self {
            payoff_months: result.months_elapsed,
            payoff_date: add_months(start, result.months_elapsed),
            total_interest: result.total_interest.max(0.0),
            resolved: result.is_resolved(),
        }
    }

    /// Interest rounded to cents for display
    pub fn total_interest_rounded(&self) -> f64 {
        round_cents(self.total_interest)
    }
}

/// Calendar month arithmetic; the day clamps to the end of shorter months
pub fn add_months(start: NaiveDate, months: u32) -> NaiveDate {
    // Caps are u16 months, far inside chrono's date range
    start
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Round a currency amount to 2 decimal places
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Simulate with the default cap and budget, counting from today
pub fn simulate_payoff(
    debts: &[Debt],
    strategy: Strategy,
    extra_payment: f64,
) -> Result<PayoffSummary, InvalidDebtError> {
    simulate_payoff_on(debts, strategy, extra_payment, Local::now().date_naive())
}

/// Simulate with the default cap and budget, counting from `start`
pub fn simulate_payoff_on(
    debts: &[Debt],
    strategy: Strategy,
    extra_payment: f64,
    start: NaiveDate,
) -> Result<PayoffSummary, InvalidDebtError> {
    let engine = PayoffEngine::new(SimulationConfig::new(strategy, extra_payment));
    let result = engine.simulate(debts)?;
    Ok(PayoffSummary::from_result(&result, start))
}
