//! Debt Payoff CLI
//!
//! Loads debts from CSV (or a JSON plan) and reports payoff time and interest

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use debt_payoff::debt::{load_debts, load_plan};
use debt_payoff::scenario::{ScenarioRunner, DEFAULT_SWEEP_MAX, DEFAULT_SWEEP_STEP};
use debt_payoff::simulation::{round_cents, DEFAULT_MAX_MONTHS};
use debt_payoff::{BudgetMode, DebtPortfolio, PayoffResult, PayoffSummary, SimulationConfig, Strategy};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "debt-payoff", version, about = "Simulate avalanche and snowball debt payoff")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate one strategy and print the payoff summary
    Simulate {
        #[command(flatten)]
        run: RunArgs,

        /// Write the month-by-month schedule to this CSV file
        #[arg(long)]
        schedule: Option<PathBuf>,
    },
    /// Run avalanche and snowball side by side
    Compare {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Run one strategy across a range of extra payments
    Sweep {
        #[command(flatten)]
        run: RunArgs,

        #[arg(long, default_value_t = DEFAULT_SWEEP_STEP)]
        step: f64,

        #[arg(long, default_value_t = DEFAULT_SWEEP_MAX)]
        max: f64,
    },
    /// Compare the extra payment against paying minimums only
    Impact {
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// CSV file with columns name,balance,apr,min_payment
    #[arg(long, conflicts_with = "plan", required_unless_present = "plan")]
    debts: Option<PathBuf>,

    /// JSON plan with debts, strategy and extraPayment
    #[arg(long)]
    plan: Option<PathBuf>,

    /// avalanche or snowball (overrides the plan)
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Extra monthly payment (overrides the plan)
    #[arg(long)]
    extra: Option<f64>,

    /// Safety cap in months
    #[arg(long, default_value_t = DEFAULT_MAX_MONTHS)]
    max_months: u16,

    #[arg(long, value_enum, default_value_t = BudgetModeArg::Rollover)]
    budget_mode: BudgetModeArg,

    /// First month of the plan (YYYY-MM-DD), defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Print JSON instead of a text report
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BudgetModeArg {
    Rollover,
    ActiveMinimums,
}

impl From<BudgetModeArg> for BudgetMode {
    fn from(arg: BudgetModeArg) -> Self {
        match arg {
            BudgetModeArg::Rollover => BudgetMode::Rollover,
            BudgetModeArg::ActiveMinimums => BudgetMode::ActiveMinimums,
        }
    }
}

/// Inputs resolved from files and flags
struct Resolved {
    portfolio: DebtPortfolio,
    config: SimulationConfig,
    start: NaiveDate,
}

impl RunArgs {
    fn resolve(&self, record_schedule: bool) -> Result<Resolved> {
        let (portfolio, plan_strategy, plan_extra) = match (&self.plan, &self.debts) {
            (Some(path), _) => {
                let plan = load_plan(path)
                    .with_context(|| format!("Failed to load plan {}", path.display()))?;
                (plan.portfolio(), plan.strategy, plan.extra_payment)
            }
            (None, Some(path)) => {
                let portfolio = load_debts(path)
                    .with_context(|| format!("Failed to load debts {}", path.display()))?;
                (portfolio, Strategy::default(), 0.0)
            }
            (None, None) => anyhow::bail!("either --debts or --plan is required"),
        };

        let config = SimulationConfig {
            strategy: self.strategy.unwrap_or(plan_strategy),
            extra_payment: self.extra.unwrap_or(plan_extra),
            max_months: self.max_months,
            budget_mode: self.budget_mode.into(),
            record_schedule,
        };

        Ok(Resolved {
            portfolio,
            config,
            start: self.start_date.unwrap_or_else(|| Local::now().date_naive()),
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Simulate { run, schedule } => simulate(&run, schedule),
        Command::Compare { run } => compare(&run),
        Command::Sweep { run, step, max } => sweep(&run, step, max),
        Command::Impact { run } => impact(&run),
    }
}

fn simulate(args: &RunArgs, schedule: Option<PathBuf>) -> Result<()> {
    let resolved = args.resolve(schedule.is_some())?;
    let runner = ScenarioRunner::with_config(resolved.portfolio, resolved.config.clone())?;
    let result = runner.run(resolved.config)?;
    let summary = PayoffSummary::from_result(&result, resolved.start);

    if let Some(path) = schedule {
        let file = File::create(&path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        result
            .write_schedule_csv(BufWriter::new(file))
            .context("Failed to write schedule")?;
        log::info!("Schedule written to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_portfolio(runner.portfolio(), runner.base_config().extra_payment);
    print_result(&result, &summary);
    Ok(())
}

fn compare(args: &RunArgs) -> Result<()> {
    let resolved = args.resolve(false)?;
    let extra = resolved.config.extra_payment;
    let runner = ScenarioRunner::with_config(resolved.portfolio, resolved.config)?;
    let comparison = runner.compare_strategies(extra)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    print_portfolio(runner.portfolio(), extra);
    for result in [&comparison.avalanche, &comparison.snowball] {
        println!("{}:", result.strategy);
        print_result(result, &PayoffSummary::from_result(result, resolved.start));
    }
    println!(
        "Cheaper strategy: {} (saves ${:.2}, {} months difference)",
        comparison.cheaper(),
        comparison.interest_difference().abs(),
        comparison.months_difference().abs()
    );
    Ok(())
}

fn sweep(args: &RunArgs, step: f64, max: f64) -> Result<()> {
    anyhow::ensure!(step > 0.0, "--step must be positive");

    let resolved = args.resolve(false)?;
    let strategy = resolved.config.strategy;
    let runner = ScenarioRunner::with_config(resolved.portfolio, resolved.config)?;

    let steps = (max / step).floor() as u32;
    let extras: Vec<f64> = (0..=steps).map(|i| i as f64 * step).collect();
    let points = runner.sweep_extra_payments(strategy, &extras)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!("{:>10} {:>7} {:>14} {:>10}", "Extra", "Months", "Interest", "Resolved");
    println!("{}", "-".repeat(44));
    for point in &points {
        println!(
            "{:>10.2} {:>7} {:>14.2} {:>10}",
            point.extra_payment,
            point.result.months_elapsed,
            point.result.total_interest,
            point.result.is_resolved()
        );
    }
    Ok(())
}

fn impact(args: &RunArgs) -> Result<()> {
    let resolved = args.resolve(false)?;
    let strategy = resolved.config.strategy;
    let extra = resolved.config.extra_payment;
    let runner = ScenarioRunner::with_config(resolved.portfolio, resolved.config)?;
    let impact = runner.extra_payment_impact(strategy, extra)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&impact)?);
        return Ok(());
    }

    println!(
        "Paying an extra ${:.2}/month with {} saves ${:.2} in interest and {} months",
        extra,
        strategy,
        round_cents(impact.interest_saved),
        impact.months_saved
    );
    Ok(())
}

fn print_portfolio(portfolio: &DebtPortfolio, extra: f64) {
    println!("Debts: {}", portfolio.len());
    println!("  Total Debt: ${:.2}", portfolio.total_balance());
    println!("  Avg. APR: {:.2}%", portfolio.weighted_apr());
    println!("  Total Monthly Payment: ${:.2}", portfolio.monthly_budget(extra));
    println!();
}

fn print_result(result: &PayoffResult, summary: &PayoffSummary) {
    if summary.resolved {
        println!(
            "  Debt-free in {} months ({})",
            summary.payoff_months,
            summary.payoff_date.format("%b %Y")
        );
    } else {
        println!(
            "  Not paid off within {} months, ${:.2} still owed",
            summary.payoff_months, result.remaining_balance
        );
    }
    println!("  Total Interest: ${:.2}", summary.total_interest_rounded());

    for outcome in &result.outcomes {
        let month = outcome
            .payoff_month
            .map_or_else(|| "-".to_string(), |m| m.to_string());
        println!(
            "    {:<24} paid off month {:>4}  interest ${:>10.2}",
            outcome.name, month, outcome.interest_paid
        );
    }
    println!();
}
