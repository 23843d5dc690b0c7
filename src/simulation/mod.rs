//! Debt payoff simulation: amortization waterfall and result summary

mod state;
mod engine;
mod schedule;
mod summary;

pub use state::{ActiveDebt, SimulationState};
pub use engine::{BudgetMode, PayoffEngine, SimulationConfig, DEFAULT_MAX_MONTHS};
pub use schedule::{DebtMonth, DebtOutcome, MonthRow, PayoffResult, ScheduleRecord};
pub use summary::{add_months, round_cents, simulate_payoff, simulate_payoff_on, PayoffSummary};
