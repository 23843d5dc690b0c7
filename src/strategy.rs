//! Payoff prioritization strategies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::debt::Debt;
use crate::error::ParseStrategyError;

/// Order in which the pooled payment is applied to debts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest APR first
    #[default]
    Avalanche,
    /// Smallest balance first
    Snowball,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Avalanche, Strategy::Snowball];

    /// Indices into `debts` in payment priority order.
    ///
    /// The sort is stable, so debts that compare equal keep their input order.
    pub fn order(&self, debts: &[Debt]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..debts.len()).collect();

        match self {
            Strategy::Avalanche => {
                order.sort_by(|&a, &b| debts[b].apr.total_cmp(&debts[a].apr));
            }
            Strategy::Snowball => {
                order.sort_by(|&a, &b| debts[a].balance.total_cmp(&debts[b].balance));
            }
        }

        order
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
