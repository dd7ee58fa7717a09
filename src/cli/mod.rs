//! `finance_report`: prints the summary views for a saved store snapshot.

pub mod output;
pub mod render;
pub mod table;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::config::{Config, ConfigManager};
use crate::core::services::{InvestmentService, ReportContext, SummaryService};
use crate::core::{watch_movements, BudgetWatch};
use crate::domain::MonthKey;
use crate::errors::{FinanceError, Result};
use crate::store::{load_snapshot, AllRecords, FinanceStore};
use crate::utils::paths;

use output::OutputPreferences;

#[derive(Parser, Debug)]
#[command(name = "finance_report")]
#[command(about = "Summaries of income, expenses, budgets and investments")]
pub struct Cli {
    /// Snapshot JSON to read (defaults to `<app dir>/snapshot.json`).
    #[arg(long, env = "FINANCE_CORE_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Directory holding `config.json` (defaults to the app dir).
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Print the view model as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// All-time totals and the per-day series.
    Dashboard,
    /// Totals, categories and top expenses for one month.
    Report {
        #[arg(long)]
        month: Option<MonthKey>,
    },
    /// Monthly and category budget usage.
    Budget {
        #[arg(long)]
        month: Option<MonthKey>,
    },
    Expenses,
    Incomes,
    Investments,
}

/// Parses the process arguments and runs the chosen report.
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    output::set_preferences(OutputPreferences {
        plain: cli.plain || cli.json,
        quiet: false,
    });

    let manager = match &cli.config_dir {
        Some(dir) => ConfigManager::with_base_dir(dir.clone())?,
        None => ConfigManager::new()?,
    };
    let config = manager.load()?;
    let ctx = ReportContext::from_config(&config)?;

    let snapshot_path = cli.snapshot.clone().unwrap_or_else(paths::snapshot_file);
    let store = FinanceStore::from_snapshot(load_snapshot(&snapshot_path)?)?;
    info!(command = ?cli.command, snapshot = %snapshot_path.display(), "running report");

    let symbol = config.currency_symbol.as_str();
    let date_format = config.date_format.as_str();
    match cli.command {
        Command::Dashboard => {
            let view = current_view(&store, ctx.clone(), SummaryService::dashboard)?;
            emit(cli.json, "Dashboard", &view, || render::dashboard(&view, symbol))
        }
        Command::Report { month } => {
            let month = month.unwrap_or_else(|| ctx.current_month());
            let view = current_view(&store, ctx.clone(), move |movements, ctx| {
                SummaryService::monthly_report(movements, month, ctx)
            })?;
            emit(cli.json, "Monthly report", &view, || {
                render::monthly_report(&view, symbol, date_format)
            })
        }
        Command::Budget { month } => {
            let month = month.unwrap_or_else(|| ctx.current_month());
            let mut watch = BudgetWatch::new(&store, month, ctx)?;
            let view = watch
                .refresh()
                .ok_or_else(|| FinanceError::View("budget view produced no snapshot".into()))?;
            if !cli.json && config.notifications {
                warn_on_overruns(&view);
            }
            emit(cli.json, "Budget", &view, || render::budget_overview(&view, symbol))
        }
        Command::Expenses => {
            let view = current_view(&store, ctx.clone(), SummaryService::expense_overview)?;
            emit(cli.json, "Expenses", &view, || {
                render::expense_overview(&view, symbol, date_format)
            })
        }
        Command::Incomes => {
            let view = current_view(&store, ctx.clone(), SummaryService::income_overview)?;
            emit(cli.json, "Incomes", &view, || {
                render::income_overview(&view, symbol, date_format)
            })
        }
        Command::Investments => investments(&store, &config, cli.json),
    }
}

/// Subscribes to the movement collection and takes the first computed view.
fn current_view<V, F>(store: &FinanceStore, ctx: ReportContext, project: F) -> Result<V>
where
    V: Clone + 'static,
    F: Fn(&[crate::domain::Movement], &ReportContext) -> V + Send + 'static,
{
    let mut view = watch_movements(store, AllRecords, move |movements| project(movements, &ctx))?;
    view.refresh()
        .cloned()
        .ok_or_else(|| FinanceError::View("movement view produced no snapshot".into()))
}

fn investments(store: &FinanceStore, config: &Config, json: bool) -> Result<()> {
    let holdings = InvestmentService::list(store)?;
    let by_kind = InvestmentService::totals_by_kind(&holdings);
    let total = InvestmentService::total(&holdings);
    if json {
        let payload = serde_json::json!({
            "investments": holdings,
            "by_kind": by_kind,
            "total": total,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }
    output::section("Investments");
    output::info(render::investments(
        &holdings,
        &by_kind,
        total,
        &config.currency_symbol,
    ));
    Ok(())
}

fn warn_on_overruns(view: &crate::core::services::BudgetOverview) {
    for line in &view.categories {
        if line.usage.overrun > 0.0 {
            output::warning(format!(
                "{} is over budget by {:.2}",
                line.category, line.usage.overrun
            ));
        }
    }
}

fn emit<V: Serialize>(
    json: bool,
    title: &str,
    view: &V,
    text: impl FnOnce() -> String,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        output::section(title);
        output::info(text());
    }
    Ok(())
}
