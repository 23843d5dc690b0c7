//! Scenario runner for comparing payoff plans
//!
//! Holds one portfolio and runs it under different strategies and extra
//! payments without re-validating or reloading the debts each time.

use rayon::prelude::*;
use serde::Serialize;

use crate::debt::DebtPortfolio;
use crate::error::InvalidDebtError;
use crate::simulation::{PayoffEngine, PayoffResult, SimulationConfig};
use crate::strategy::Strategy;

/// Upper end of the extra payment range offered for exploration
pub const DEFAULT_SWEEP_MAX: f64 = 1000.0;

/// Step between swept extra payments
pub const DEFAULT_SWEEP_STEP: f64 = 50.0;

/// Extra payments 0, 50, ..., 1000
pub fn default_extra_steps() -> Vec<f64> {
    let steps = (DEFAULT_SWEEP_MAX / DEFAULT_SWEEP_STEP) as u32;
    (0..=steps).map(|i| i as f64 * DEFAULT_SWEEP_STEP).collect()
}

/// Avalanche and snowball run side by side on the same inputs
#[derive(Debug, Clone, Serialize)]
pub struct StrategyComparison {
    pub avalanche: PayoffResult,
    pub snowball: PayoffResult,
}

impl StrategyComparison {
    /// Snowball interest minus avalanche interest
    pub fn interest_difference(&self) -> f64 {
        self.snowball.total_interest - self.avalanche.total_interest
    }

    /// Snowball months minus avalanche months
    pub fn months_difference(&self) -> i64 {
        i64::from(self.snowball.months_elapsed) - i64::from(self.avalanche.months_elapsed)
    }

    /// Strategy with the lower total interest; avalanche on a tie
    pub fn cheaper(&self) -> Strategy {
        if self.snowball.total_interest < self.avalanche.total_interest {
            Strategy::Snowball
        } else {
            Strategy::Avalanche
        }
    }
}

/// One point of an extra payment sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub extra_payment: f64,
    pub result: PayoffResult,
}

/// Effect of paying extra compared with minimums only
#[derive(Debug, Clone, Serialize)]
pub struct ExtraPaymentImpact {
    pub baseline: PayoffResult,
    pub accelerated: PayoffResult,
    pub months_saved: i64,
    pub interest_saved: f64,
}

/// Pre-validated portfolio runner
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    portfolio: DebtPortfolio,

    /// Cap, budget mode and schedule settings shared by every run
    base_config: SimulationConfig,
}

impl ScenarioRunner {
    /// Create runner with the default simulation settings
    pub fn new(portfolio: DebtPortfolio) -> Result<Self, InvalidDebtError> {
        Self::with_config(portfolio, SimulationConfig::default())
    }

    /// Create runner with custom cap, budget mode or schedule recording
    pub fn with_config(
        portfolio: DebtPortfolio,
        base_config: SimulationConfig,
    ) -> Result<Self, InvalidDebtError> {
        portfolio.validate()?;
        Ok(Self {
            portfolio,
            base_config,
        })
    }

    pub fn portfolio(&self) -> &DebtPortfolio {
        &self.portfolio
    }

    pub fn base_config(&self) -> &SimulationConfig {
        &self.base_config
    }

    /// Run a single simulation with a full config
    pub fn run(&self, config: SimulationConfig) -> Result<PayoffResult, InvalidDebtError> {
        PayoffEngine::new(config).simulate(self.portfolio.debts())
    }

    /// Run with the base config, overriding strategy and extra payment
    pub fn run_with(
        &self,
        strategy: Strategy,
        extra_payment: f64,
    ) -> Result<PayoffResult, InvalidDebtError> {
        self.run(SimulationConfig {
            strategy,
            extra_payment,
            ..self.base_config.clone()
        })
    }

    /// Run both strategies with the same extra payment
    pub fn compare_strategies(
        &self,
        extra_payment: f64,
    ) -> Result<StrategyComparison, InvalidDebtError> {
        let (avalanche, snowball) = rayon::join(
            || self.run_with(Strategy::Avalanche, extra_payment),
            || self.run_with(Strategy::Snowball, extra_payment),
        );

        Ok(StrategyComparison {
            avalanche: avalanche?,
            snowball: snowball?,
        })
    }

    /// Run one strategy at each extra payment in parallel. Results keep input order.
    pub fn sweep_extra_payments(
        &self,
        strategy: Strategy,
        extra_payments: &[f64],
    ) -> Result<Vec<SweepPoint>, InvalidDebtError> {
        extra_payments
            .par_iter()
            .map(|&extra_payment| {
                self.run_with(strategy, extra_payment)
                    .map(|result| SweepPoint {
                        extra_payment,
                        result,
                    })
            })
            .collect()
    }

    /// Compare paying `extra_payment` on top of minimums against minimums alone
    pub fn extra_payment_impact(
        &self,
        strategy: Strategy,
        extra_payment: f64,
    ) -> Result<ExtraPaymentImpact, InvalidDebtError> {
        let baseline = self.run_with(strategy, 0.0)?;
        let accelerated = self.run_with(strategy, extra_payment)?;

        Ok(ExtraPaymentImpact {
            months_saved: i64::from(baseline.months_elapsed) - i64::from(accelerated.months_elapsed),
            interest_saved: baseline.total_interest - accelerated.total_interest,
            baseline,
            accelerated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debt::Debt;
    use approx::assert_relative_eq;

    /// Default debts shown by the planner
    fn sample_portfolio() -> DebtPortfolio {
        DebtPortfolio::new(vec![
            Debt::new("Example Credit Card", 3500.0, 18.99, 105.0),
            Debt::new("Example Student Loan", 15000.0, 5.5, 200.0),
        ])
    }

    #[test]
    fn test_runner_rejects_invalid_portfolio() {
        let portfolio = DebtPortfolio::new(vec![Debt::new("Bad", 100.0, -2.0, 10.0)]);
        assert!(ScenarioRunner::new(portfolio).is_err());
    }

    #[test]
    fn test_compare_strategies() {
        let portfolio = DebtPortfolio::new(vec![
            Debt::new("Card", 3000.0, 20.0, 50.0),
            Debt::new("Loan", 1000.0, 5.0, 50.0),
        ]);
        let runner = ScenarioRunner::new(portfolio).unwrap();
        let comparison = runner.compare_strategies(200.0).unwrap();

        assert_eq!(comparison.avalanche.strategy, Strategy::Avalanche);
        assert_eq!(comparison.snowball.strategy, Strategy::Snowball);
        assert_eq!(comparison.months_difference(), 1);
        assert_relative_eq!(comparison.interest_difference(), 160.494_637_332_779, epsilon = 1e-6);
        assert_eq!(comparison.cheaper(), Strategy::Avalanche);
    }

    #[test]
    fn test_tie_prefers_avalanche() {
        let runner = ScenarioRunner::new(sample_portfolio()).unwrap();
        let comparison = runner.compare_strategies(200.0).unwrap();

        // Smaller balance is also the higher APR, so both orders match
        assert_eq!(comparison.interest_difference(), 0.0);
        assert_eq!(comparison.cheaper(), Strategy::Avalanche);
    }

    #[test]
    fn test_sweep_keeps_order_and_improves() {
        let runner = ScenarioRunner::new(sample_portfolio()).unwrap();
        let steps = default_extra_steps();
        assert_eq!(steps.len(), 21);
        assert_eq!(steps[20], 1000.0);

        let points = runner.sweep_extra_payments(Strategy::Avalanche, &steps).unwrap();
        assert_eq!(points.len(), steps.len());

        for (point, &extra) in points.iter().zip(&steps) {
            assert_eq!(point.extra_payment, extra);
        }
        for pair in points.windows(2) {
            assert!(pair[1].result.months_elapsed <= pair[0].result.months_elapsed);
            assert!(pair[1].result.total_interest <= pair[0].result.total_interest);
        }
    }

    #[test]
    fn test_sweep_rejects_negative_extra() {
        let runner = ScenarioRunner::new(sample_portfolio()).unwrap();
        assert!(runner
            .sweep_extra_payments(Strategy::Snowball, &[0.0, -10.0])
            .is_err());
    }

    #[test]
    fn test_extra_payment_impact() {
        let runner = ScenarioRunner::new(sample_portfolio()).unwrap();
        let impact = runner.extra_payment_impact(Strategy::Avalanche, 200.0).unwrap();

        assert_eq!(impact.baseline.months_elapsed, 73);
        assert_eq!(impact.accelerated.months_elapsed, 41);
        assert_eq!(impact.months_saved, 32);
        assert_relative_eq!(impact.interest_saved, 1607.032_510_765_556_8, epsilon = 1e-6);
    }

    #[test]
    fn test_base_config_carries_over() {
        let config = SimulationConfig {
            max_months: 24,
            ..Default::default()
        };
        let runner = ScenarioRunner::with_config(sample_portfolio(), config).unwrap();
        let result = runner.run_with(Strategy::Snowball, 0.0).unwrap();

        assert_eq!(result.months_elapsed, 24);
        assert!(result.hit_cap());
    }
}
