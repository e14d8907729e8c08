//! The dashboard views: `budget summary` and `budget chart`.

use crate::commands::{open_dashboard, Out};
use crate::model::{Amount, YearMonth};
use crate::summary::{self, CategoryTotal, MonthTotals, Summary};
use crate::{Config, Result};
use chrono::{Local, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Width, in characters, of the longest bar in `budget chart`.
const BAR_WIDTH: usize = 30;

/// Shows this month's income, expense and balance followed by the all-time totals.
pub async fn summary(config: Config) -> Result<Out<Summary>> {
    summary_for(config, Local::now().date_naive()).await
}

async fn summary_for(config: Config, today: NaiveDate) -> Result<Out<Summary>> {
    let (user, budget) = open_dashboard(&config).await?;
    let s = summary::summarize(budget.transactions(), today);
    let c = config.currency();
    let message = format!(
        "Hello {}\n\n\
        Summary for {}\n  \
          Income:  {}\n  \
          Expense: {}\n  \
          Balance: {}\n\n\
        All time\n  \
          Income:  {}\n  \
          Expense: {}\n  \
          Balance: {}",
        user.name(),
        s.month.long_name(),
        s.month_income.display_with(c),
        s.month_expense.display_with(c),
        s.month_balance.display_with(c),
        s.total_income.display_with(c),
        s.total_expense.display_with(c),
        s.balance.display_with(c),
    );
    Ok(Out::new(message, s))
}

/// The data behind `budget chart`.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub month: YearMonth,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub last_six_months: Vec<MonthTotals>,
}

/// Shows this month's expenses by category and the income and expense of the last six months as
/// text bar charts.
pub async fn chart(config: Config) -> Result<Out<Chart>> {
    chart_for(config, Local::now().date_naive()).await
}

async fn chart_for(config: Config, today: NaiveDate) -> Result<Out<Chart>> {
    let (_user, budget) = open_dashboard(&config).await?;
    let transactions = budget.transactions();
    let month = YearMonth::from_date(today);
    let expenses_by_category = summary::month_data_for(transactions, today)
        .map(|m| summary::expenses_by_category(&m))
        .unwrap_or_default();
    let last_six_months = summary::last_six_months(transactions, today);
    let chart = Chart {
        month,
        expenses_by_category,
        last_six_months,
    };
    let message = render_chart(&chart, config.currency());
    Ok(Out::new(message, chart))
}

fn render_chart(chart: &Chart, currency: &str) -> String {
    let mut lines = vec![format!("Expenses by category, {}", chart.month.long_name())];
    if chart.expenses_by_category.is_empty() {
        lines.push("  No data yet".to_string());
    } else {
        let max = chart
            .expenses_by_category
            .iter()
            .map(|c| c.amount)
            .max()
            .unwrap_or_default();
        let total: Amount = chart.expenses_by_category.iter().map(|c| c.amount).sum();
        // The category goes last: padding counts chars, and Thai combining marks take no column.
        for c in &chart.expenses_by_category {
            lines.push(format!(
                "  {:<width$} {:>18} {:>8}  {}",
                bar(c.amount, max),
                c.amount.display_with(currency),
                format!("({}%)", percent(c.amount, total)),
                c.category,
                width = BAR_WIDTH
            ));
        }
    }

    lines.push(String::new());
    lines.push("Last six months (income / expense)".to_string());
    let max = chart
        .last_six_months
        .iter()
        .flat_map(|m| [m.income, m.expense])
        .max()
        .unwrap_or_default();
    for m in &chart.last_six_months {
        lines.push(format!(
            "  {} {:<4} + {:<width$} {}",
            m.month,
            m.month.short_name(),
            bar(m.income, max),
            m.income.display_with(currency),
            width = BAR_WIDTH
        ));
        lines.push(format!(
            "  {:<12} - {:<width$} {}",
            "",
            bar(m.expense, max),
            m.expense.display_with(currency),
            width = BAR_WIDTH
        ));
    }
    lines.join("\n")
}

/// A bar of `#` proportional to `value / max`. Zero and negative values get no bar.
fn bar(value: Amount, max: Amount) -> String {
    if !value.is_positive() || !max.is_positive() {
        return String::new();
    }
    let ratio = value
        .value()
        .checked_div(max.value())
        .and_then(|r| r.to_f64())
        .unwrap_or_default();
    let len = ((ratio * BAR_WIDTH as f64).round() as usize).clamp(1, BAR_WIDTH);
    "#".repeat(len)
}

fn percent(value: Amount, total: Amount) -> String {
    if !total.is_positive() {
        return "0".to_string();
    }
    let pct = value
        .value()
        .saturating_mul(Decimal::ONE_HUNDRED)
        .checked_div(total.value())
        .unwrap_or_default()
        .round_dp(1);
    pct.normalize().to_string()
}
