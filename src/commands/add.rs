//! The `budget add` command.

use crate::args::AddArgs;
use crate::commands::{open_dashboard, Out};
use crate::model::{
    is_known_category, Amount, NewTransaction, Transaction, AMOUNT_LIMIT, MAX_DECIMAL_PLACES,
};
use crate::{Config, Result};
use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use tracing::warn;

/// Records a new transaction.
///
/// The amount, category and description are required. The amount may carry the configured
/// currency sign. The date defaults to today. The category does not have to be one of the
/// suggested categories, but a warning is logged if it is not.
///
/// # Errors
///
/// - Returns an error, and stores nothing, if a required field is blank or the amount or date
///   cannot be parsed.
/// - Returns an error, and stores nothing, if the amount is too large or too precise to be stored
///   exactly.
/// - Returns an error if nobody is logged in.
pub async fn add_transaction(config: Config, args: AddArgs) -> Result<Out<Transaction>> {
    let (_user, mut budget) = open_dashboard(&config).await?;

    let amount = args.amount().trim();
    let category = args.category().trim();
    let description = args.description().trim();
    if amount.is_empty() || category.is_empty() || description.is_empty() {
        bail!("Incomplete data: please fill in the amount, category and description")
    }

    let currency = config.currency();
    let raw = amount;
    let amount = Amount::parse_with(raw, currency)
        .with_context(|| format!("Invalid amount '{raw}'"))?;
    if !amount.is_storable() {
        bail!(
            "Invalid amount '{raw}': amounts must be below {} with at most {MAX_DECIMAL_PLACES} \
            decimal places",
            Amount::from(AMOUNT_LIMIT).display_with(currency)
        )
    }
    let date = match args.date().map(str::trim) {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{date}', expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };
    if !is_known_category(args.r#type(), category) {
        warn!(
            "'{category}' is not one of the suggested {} categories",
            args.r#type()
        );
    }

    let transaction = budget
        .add(NewTransaction::new(
            args.r#type(),
            amount,
            category,
            description,
            date,
        ))
        .await?;

    let message = format!(
        "Added {} of {} with ID: {}",
        transaction.r#type(),
        transaction.amount().display_with(currency),
        transaction.id()
    );
    Ok(Out::new(message, transaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;
    use crate::summary;
    use crate::test::TestEnv;
    use std::str::FromStr;

    fn args(r#type: TransactionType, amount: &str, category: &str, date: &str) -> AddArgs {
        AddArgs::new(r#type, amount, category, "desc", Some(date.to_string()))
    }

    #[tokio::test]
    async fn test_add_then_summarize() {
        let env = TestEnv::logged_in().await;
        add_transaction(
            env.config(),
            args(TransactionType::Income, "1000", "เงินเดือน", "2024-03-01"),
        )
        .await
        .unwrap();
        let out = add_transaction(
            env.config(),
            args(TransactionType::Expense, "300", "อาหาร", "2024-03-02"),
        )
        .await
        .unwrap();
        assert!(out.message().starts_with("Added expense of ฿300.00 with ID: "));

        let budget = env.budget().await;
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let s = summary::summarize(budget.transactions(), today);
        assert_eq!(s.month_income, Amount::from(1000));
        assert_eq!(s.month_expense, Amount::from(300));
        assert_eq!(s.month_balance, Amount::from(700));
    }

    #[tokio::test]
    async fn test_add_missing_fields_changes_nothing() {
        let env = TestEnv::logged_in().await;
        for bad in [
            AddArgs::new(TransactionType::Expense, "", "อาหาร", "d", None),
            AddArgs::new(TransactionType::Expense, "5", " ", "d", None),
            AddArgs::new(TransactionType::Expense, "5", "อาหาร", "", None),
        ] {
            let err = add_transaction(env.config(), bad).await.unwrap_err();
            assert!(err.to_string().contains("Incomplete data"));
        }
        assert!(env.budget().await.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_add_bad_amount_or_date() {
        let env = TestEnv::logged_in().await;
        let err = add_transaction(
            env.config(),
            args(TransactionType::Expense, "lots", "อาหาร", "2024-03-01"),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Invalid amount"));

        let err = add_transaction(
            env.config(),
            args(TransactionType::Expense, "5", "อาหาร", "03/01/2024"),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
        assert!(env.budget().await.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_add_defaults_date_to_today() {
        let env = TestEnv::logged_in().await;
        let out = add_transaction(
            env.config(),
            AddArgs::new(TransactionType::Expense, "฿1,200.50", "อาหาร", "d", None),
        )
        .await
        .unwrap();
        let added = out.structure().unwrap();
        assert_eq!(added.date(), Local::now().date_naive());
        assert_eq!(added.amount(), Amount::from_str("1200.50").unwrap());
    }

    #[tokio::test]
    async fn test_add_rejects_amounts_that_cannot_be_stored() {
        let env = TestEnv::logged_in().await;
        for bad in ["79228162514264337593543950335", "12345678901234567.89", "0.125"] {
            let err = add_transaction(
                env.config(),
                args(TransactionType::Income, bad, "เงินเดือน", "2024-03-01"),
            )
            .await
            .unwrap_err();
            assert!(err.to_string().contains("Invalid amount"), "{err}");
        }
        assert!(env.budget().await.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_add_largest_amounts_survive_reload() {
        let env = TestEnv::logged_in().await;
        for _ in 0..2 {
            add_transaction(
                env.config(),
                args(
                    TransactionType::Income,
                    "9,999,999,999,999.99",
                    "เงินเดือน",
                    "2024-03-01",
                ),
            )
            .await
            .unwrap();
        }

        let budget = env.budget().await;
        let largest = Amount::from_str("9999999999999.99").unwrap();
        assert!(budget.transactions().iter().all(|t| t.amount() == largest));
        assert_eq!(summary::total_income(budget.transactions()), largest + largest);
    }

    #[tokio::test]
    async fn test_add_with_configured_currency() {
        let env = TestEnv::with_currency("$").await;
        let out = add_transaction(
            env.config(),
            args(TransactionType::Expense, "$1,005.50", "อาหาร", "2024-03-01"),
        )
        .await
        .unwrap();
        assert_eq!(
            out.structure().unwrap().amount(),
            Amount::from_str("1005.50").unwrap()
        );
        assert!(out.message().starts_with("Added expense of $1,005.50 with ID: "));
    }

    #[tokio::test]
    async fn test_add_unknown_category_is_allowed() {
        let env = TestEnv::logged_in().await;
        add_transaction(
            env.config(),
            args(TransactionType::Expense, "5", "gadgets", "2024-03-01"),
        )
        .await
        .unwrap();
        assert_eq!(env.budget().await.transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_add_requires_login() {
        let env = TestEnv::new().await;
        let err = add_transaction(
            env.config(),
            args(TransactionType::Expense, "5", "อาหาร", "2024-03-01"),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Not logged in"));
    }
}
