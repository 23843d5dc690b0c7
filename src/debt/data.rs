//! Debt records and the portfolio held for a simulation run

use serde::{Deserialize, Serialize};

use crate::error::{DebtField, InvalidDebtError};
use crate::strategy::Strategy;

/// A single user-entered liability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Display label
    pub name: String,

    /// Outstanding principal
    pub balance: f64,

    /// Annual percentage rate in percent (18.99 = 18.99%/year)
    pub apr: f64,

    /// Minimum required monthly payment
    #[serde(alias = "minPayment")]
    pub min_payment: f64,
}

impl Debt {
    pub fn new(name: impl Into<String>, balance: f64, apr: f64, min_payment: f64) -> Self {
        Self {
            name: name.into(),
            balance,
            apr,
            min_payment,
        }
    }

    /// Monthly interest rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.apr / 100.0 / 12.0
    }

    /// A zero balance debt never accrues interest or takes payment
    pub fn is_paid_off(&self) -> bool {
        self.balance <= 0.0
    }

    /// Check balance, APR and minimum payment. `index` is the position in the input list.
    pub fn validate(&self, index: usize) -> Result<(), InvalidDebtError> {
        let fields = [
            (DebtField::Balance, self.balance),
            (DebtField::Apr, self.apr),
            (DebtField::MinPayment, self.min_payment),
        ];

        for (field, value) in fields {
            if !is_non_negative(value) {
                return Err(InvalidDebtError::InvalidField {
                    index,
                    name: self.name.clone(),
                    field,
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Finite and >= 0 (NaN fails)
pub(crate) fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Validate every debt in input order, stopping at the first failure
pub fn validate_debts(debts: &[Debt]) -> Result<(), InvalidDebtError> {
    debts
        .iter()
        .enumerate()
        .try_for_each(|(index, debt)| debt.validate(index))
}

/// Validate the extra monthly payment
pub fn validate_extra_payment(extra_payment: f64) -> Result<(), InvalidDebtError> {
    if is_non_negative(extra_payment) {
        Ok(())
    } else {
        Err(InvalidDebtError::InvalidExtraPayment(extra_payment))
    }
}

/// Immutable set of debts entered for a simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtPortfolio {
    debts: Vec<Debt>,
}

impl DebtPortfolio {
    pub fn new(debts: Vec<Debt>) -> Self {
        Self { debts }
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    pub fn validate(&self) -> Result<(), InvalidDebtError> {
        validate_debts(&self.debts)
    }

    /// Sum of outstanding balances
    pub fn total_balance(&self) -> f64 {
        self.debts.iter().map(|d| d.balance).sum()
    }

    /// Sum of minimum payments across every debt, paid off or not
    pub fn total_min_payment(&self) -> f64 {
        self.debts.iter().map(|d| d.min_payment).sum()
    }

    /// Balance-weighted APR in percent. Zero when nothing is owed.
    pub fn weighted_apr(&self) -> f64 {
        let total = self.total_balance();
        if total <= 0.0 {
            return 0.0;
        }
        self.debts.iter().map(|d| d.apr * d.balance).sum::<f64>() / total
    }

    /// Pooled monthly payment: all minimums plus the extra amount
    pub fn monthly_budget(&self, extra_payment: f64) -> f64 {
        self.total_min_payment() + extra_payment
    }
}

impl From<Vec<Debt>> for DebtPortfolio {
    fn from(debts: Vec<Debt>) -> Self {
        Self::new(debts)
    }
}

/// Debts plus the payoff choices, as stored in a JSON plan file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffPlan {
    pub debts: Vec<Debt>,

    #[serde(default)]
    pub strategy: Strategy,

    #[serde(default)]
    pub extra_payment: f64,
}

impl PayoffPlan {
    pub fn portfolio(&self) -> DebtPortfolio {
        DebtPortfolio::new(self.debts.clone())
    }

    pub fn validate(&self) -> Result<(), InvalidDebtError> {
        validate_debts(&self.debts)?;
        validate_extra_payment(self.extra_payment)
    }
}
