//! Debt Payoff - month-by-month payoff simulation for a set of debts
//!
//! This library provides:
//! - Debt records, portfolio statistics and CSV/JSON loading
//! - Avalanche (highest APR first) and snowball (smallest balance first) ordering
//! - A pooled-payment waterfall simulation with a 360-month safety cap
//! - Payoff summaries (months, date, total interest) and strategy comparisons

pub mod error;
pub mod debt;
pub mod strategy;
pub mod simulation;
pub mod scenario;

// Re-export commonly used types
pub use error::{InvalidDebtError, LoadError};
pub use debt::{Debt, DebtPortfolio, PayoffPlan};
pub use strategy::Strategy;
pub use simulation::{
    simulate_payoff, simulate_payoff_on, BudgetMode, PayoffEngine, PayoffResult, PayoffSummary,
    SimulationConfig,
};
pub use scenario::ScenarioRunner;
