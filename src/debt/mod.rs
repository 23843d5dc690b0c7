//! Debt records and loading

mod data;
pub mod loader;

pub use data::{validate_debts, validate_extra_payment, Debt, DebtPortfolio, PayoffPlan};
pub use loader::{load_debts, load_debts_from_reader, load_plan, load_plan_from_reader};
