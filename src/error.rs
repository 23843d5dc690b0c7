//! Error types for validation and input loading

use std::fmt;
use thiserror::Error;

/// Debt field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtField {
    Balance,
    Apr,
    MinPayment,
}

impl fmt::Display for DebtField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DebtField::Balance => "balance",
            DebtField::Apr => "apr",
            DebtField::MinPayment => "min_payment",
        };
        f.write_str(s)
    }
}

/// Rejected simulation input. Raised before any simulation state exists.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidDebtError {
    #[error("debt #{index} ({name}): {field} must be a finite non-negative number, got {value}")]
    InvalidField {
        index: usize,
        name: String,
        field: DebtField,
        value: f64,
    },

    #[error("extra payment must be a finite non-negative number, got {0}")]
    InvalidExtraPayment(f64),
}

/// Failure reading debts or a payoff plan from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: debt name must not be empty")]
    EmptyName { row: usize },

    #[error(transparent)]
    Invalid(#[from] InvalidDebtError),
}

/// Unknown strategy name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown strategy '{0}' (expected 'avalanche' or 'snowball')")]
pub struct ParseStrategyError(pub String);
