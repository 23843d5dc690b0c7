//! Simulation output: per-month schedule rows and the run result

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::debt::Debt;
use crate::strategy::Strategy;

/// One debt's movement within a simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtMonth {
    pub debt_index: usize,
    pub opening_balance: f64,
    pub interest: f64,
    pub payment: f64,
    pub closing_balance: f64,
}

/// A single simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    /// Month number (1-indexed)
    pub month: u32,

    /// Pooled payment available at the start of the month
    pub budget: f64,

    /// Budget left over after the waterfall
    pub unallocated: f64,

    /// Entries for debts active this month, in priority order
    pub debts: Vec<DebtMonth>,
}

impl MonthRow {
    pub fn new(month: u32, budget: f64) -> Self {
        Self {
            month,
            budget,
            unallocated: budget,
            debts: Vec::new(),
        }
    }

    pub fn interest(&self) -> f64 {
        self.debts.iter().map(|d| d.interest).sum()
    }

    pub fn paid(&self) -> f64 {
        self.debts.iter().map(|d| d.payment).sum()
    }

    pub fn closing_balance(&self) -> f64 {
        self.debts.iter().map(|d| d.closing_balance).sum()
    }
}

/// Lifetime figures for one debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtOutcome {
    pub name: String,

    /// Month in which the balance reached zero. `Some(0)` for debts that started paid off,
    /// `None` when the run ended with the debt still open.
    pub payoff_month: Option<u32>,

    pub interest_paid: f64,
    pub total_paid: f64,
}

impl DebtOutcome {
    pub fn new(debt: &Debt) -> Self {
        Self {
            name: debt.name.clone(),
            payoff_month: debt.is_paid_off().then_some(0),
            interest_paid: 0.0,
            total_paid: 0.0,
        }
    }
}

/// Flat schedule line, one per (month, debt)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRecord<'a> {
    pub month: u32,
    pub debt: &'a str,
    pub opening_balance: f64,
    pub interest: f64,
    pub payment: f64,
    pub closing_balance: f64,
}

/// Complete simulation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffResult {
    pub strategy: Strategy,

    /// Months simulated before termination
    pub months_elapsed: u32,

    /// Interest charged over the run
    pub total_interest: f64,

    /// Balance still owed when the run stopped (zero when resolved)
    pub remaining_balance: f64,

    /// Safety cap in force for the run
    pub max_months: u32,

    /// Per-debt figures, in input order
    pub outcomes: Vec<DebtOutcome>,

    /// Monthly rows, empty unless schedule recording was enabled
    pub schedule: Vec<MonthRow>,
}

impl PayoffResult {
    pub fn new(strategy: Strategy, debts: &[Debt], max_months: u32) -> Self {
        Self {
            strategy,
            months_elapsed: 0,
            total_interest: 0.0,
            remaining_balance: 0.0,
            max_months,
            outcomes: debts.iter().map(DebtOutcome::new).collect(),
            schedule: Vec::new(),
        }
    }

    /// Add a schedule row
    pub fn add_row(&mut self, row: MonthRow) {
        self.schedule.push(row);
    }

    /// Every debt reached zero
    pub fn is_resolved(&self) -> bool {
        self.outcomes.iter().all(|o| o.payoff_month.is_some())
    }

    /// The run was stopped by the safety cap with balance still owed
    pub fn hit_cap(&self) -> bool {
        !self.is_resolved() && self.months_elapsed >= self.max_months
    }

    /// Total paid across all debts
    pub fn total_paid(&self) -> f64 {
        self.outcomes.iter().map(|o| o.total_paid).sum()
    }

    /// Flatten the schedule to one record per debt per month
    pub fn schedule_records(&self) -> Vec<ScheduleRecord<'_>> {
        self.schedule
            .iter()
            .flat_map(|row| {
                row.debts.iter().map(move |d| ScheduleRecord {
                    month: row.month,
                    debt: &self.outcomes[d.debt_index].name,
                    opening_balance: d.opening_balance,
                    interest: d.interest,
                    payment: d.payment,
                    closing_balance: d.closing_balance,
                })
            })
            .collect()
    }

    /// Write the flattened schedule as CSV with a header row
    pub fn write_schedule_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in self.schedule_records() {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> PayoffResult {
        let debts = vec![Debt::new("Card", 100.0, 12.0, 60.0), Debt::new("Loan", 0.0, 5.0, 0.0)];
        let mut result = PayoffResult::new(Strategy::Avalanche, &debts, 360);

        let mut row = MonthRow::new(1, 60.0);
        row.debts.push(DebtMonth {
            debt_index: 0,
            opening_balance: 100.0,
            interest: 1.0,
            payment: 60.0,
            closing_balance: 41.0,
        });
        row.unallocated = 0.0;
        result.add_row(row);
        result.months_elapsed = 1;
        result
    }

    #[test]
    fn test_outcomes_start_from_debts() {
        let result = sample_result();

        assert_eq!(result.outcomes[0].payoff_month, None);
        assert_eq!(result.outcomes[1].payoff_month, Some(0));
        assert!(!result.is_resolved());
        assert!(!result.hit_cap());
    }

    #[test]
    fn test_month_row_totals() {
        let result = sample_result();
        let row = &result.schedule[0];

        assert_eq!(row.interest(), 1.0);
        assert_eq!(row.paid(), 60.0);
        assert_eq!(row.closing_balance(), 41.0);
    }

    #[test]
    fn test_schedule_csv() {
        let result = sample_result();
        let mut out = Vec::new();
        result.write_schedule_csv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("month,debt,opening_balance,interest,payment,closing_balance")
        );
        assert_eq!(lines.next(), Some("1,Card,100.0,1.0,60.0,41.0"));
        assert_eq!(lines.next(), None);
    }
}
