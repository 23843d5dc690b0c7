//! Load debts from CSV and payoff plans from JSON

use super::{Debt, DebtPortfolio, PayoffPlan};
use crate::error::LoadError;
use csv::{Reader, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row: `name,balance,apr,min_payment`
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    balance: f64,
    apr: f64,
    #[serde(alias = "minPayment")]
    min_payment: f64,
}

impl CsvRow {
    fn to_debt(self, row: usize) -> Result<Debt, LoadError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(LoadError::EmptyName { row });
        }

        Ok(Debt::new(name, self.balance, self.apr, self.min_payment))
    }
}

/// Load debts from a CSV file
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<DebtPortfolio, LoadError> {
    let file = File::open(path)?;
    load_debts_from_reader(file)
}

/// Load debts from any reader (e.g., string buffer, stdin)
pub fn load_debts_from_reader<R: Read>(reader: R) -> Result<DebtPortfolio, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let debts = read_rows(&mut csv_reader)?;

    let portfolio = DebtPortfolio::new(debts);
    portfolio.validate()?;
    log::debug!("Loaded {} debts", portfolio.len());

    Ok(portfolio)
}

fn read_rows<R: Read>(reader: &mut Reader<R>) -> Result<Vec<Debt>, LoadError> {
    let mut debts = Vec::new();

    // Row numbers are 1-based data rows (header excluded)
    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        debts.push(row.to_debt(i + 1)?);
    }

    Ok(debts)
}

/// Load a payoff plan from a JSON file
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PayoffPlan, LoadError> {
    let file = File::open(path)?;
    load_plan_from_reader(BufReader::new(file))
}

/// Load a payoff plan from any JSON reader
pub fn load_plan_from_reader<R: Read>(reader: R) -> Result<PayoffPlan, LoadError> {
    let plan: PayoffPlan = serde_json::from_reader(reader)?;

    if let Some(i) = plan.debts.iter().position(|d| d.name.trim().is_empty()) {
        return Err(LoadError::EmptyName { row: i + 1 });
    }
    plan.validate()?;

    Ok(plan)
}
