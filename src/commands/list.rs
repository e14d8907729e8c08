//! The `budget list` command.

use crate::commands::{open_dashboard, Out};
use crate::summary::{self, MonthlyData};
use crate::{Config, Result};

/// Lists every transaction grouped by month, newest month first. Within a month transactions are
/// ordered by date, newest first.
pub async fn list(config: Config) -> Result<Out<Vec<MonthlyData>>> {
    let (_user, budget) = open_dashboard(&config).await?;
    let months = summary::monthly_data(budget.transactions());
    if months.is_empty() {
        return Ok(Out::new(
            "No transactions yet. Add your first one with `budget add`.",
            months,
        ));
    }
    let message = render(&months, config.currency());
    Ok(Out::new(message, months))
}

fn render(months: &[MonthlyData], currency: &str) -> String {
    let mut lines = Vec::new();
    for month in months {
        lines.push(format!(
            "{}    +{}  -{}",
            month.month.long_name(),
            month.income.display_with(currency),
            month.expense.display_with(currency)
        ));
        for t in month.newest_first() {
            let sign = if t.is_income() { '+' } else { '-' };
            lines.push(format!(
                "  {}  {:<15}  {sign}{:<14}  {} | {}",
                t.date().format("%d %b"),
                t.id(),
                t.amount().display_with(currency),
                t.category(),
                t.description()
            ));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_string()
}
