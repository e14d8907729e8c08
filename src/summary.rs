//! Aggregations over a snapshot of transactions.
//!
//! Everything here is a pure function of its arguments and is recomputed on every call. The
//! functions that depend on "now" take an explicit `today` date; the `current_*` wrappers pass
//! the local calendar date.

use crate::model::{Amount, Transaction, YearMonth};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// The transactions of one calendar month with their income and expense sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyData {
    pub month: YearMonth,
    pub income: Amount,
    pub expense: Amount,
    pub transactions: Vec<Transaction>,
}

impl MonthlyData {
    fn empty(month: YearMonth) -> Self {
        Self {
            month,
            income: Amount::ZERO,
            expense: Amount::ZERO,
            transactions: Vec::new(),
        }
    }

    fn push(&mut self, transaction: &Transaction) {
        if transaction.is_income() {
            self.income += transaction.amount();
        } else {
            self.expense += transaction.amount();
        }
        self.transactions.push(transaction.clone());
    }

    pub fn balance(&self) -> Amount {
        self.income - self.expense
    }

    /// The month's transactions ordered by date, newest first. Transactions on the same date
    /// keep their insertion order.
    pub fn newest_first(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.date().cmp(&a.date()));
        sorted
    }
}

/// Groups transactions by the month of their date. Months are returned newest first; within a
/// month transactions keep their original order.
pub fn monthly_data(transactions: &[Transaction]) -> Vec<MonthlyData> {
    let mut grouped: BTreeMap<YearMonth, MonthlyData> = BTreeMap::new();
    for transaction in transactions {
        let month = transaction.month();
        grouped
            .entry(month)
            .or_insert_with(|| MonthlyData::empty(month))
            .push(transaction);
    }
    grouped.into_values().rev().collect()
}

/// The group for the month containing `today`, if any transaction falls in it.
pub fn month_data_for(transactions: &[Transaction], today: NaiveDate) -> Option<MonthlyData> {
    let wanted = YearMonth::from_date(today);
    monthly_data(transactions)
        .into_iter()
        .find(|m| m.month == wanted)
}

/// The group for the current local calendar month, if any transaction falls in it.
pub fn current_month_data(transactions: &[Transaction]) -> Option<MonthlyData> {
    month_data_for(transactions, Local::now().date_naive())
}

pub fn total_income(transactions: &[Transaction]) -> Amount {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount())
        .sum()
}

pub fn total_expense(transactions: &[Transaction]) -> Amount {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount())
        .sum()
}

/// All-time income minus all-time expense.
pub fn balance(transactions: &[Transaction]) -> Amount {
    total_income(transactions) - total_expense(transactions)
}

/// Expense total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Amount,
}

/// Sums the expenses of `month` per category, largest first. Equal amounts are ordered by
/// category name.
pub fn expenses_by_category(month: &MonthlyData) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Amount> = BTreeMap::new();
    for transaction in month.transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(transaction.category()).or_default() += transaction.amount();
    }
    let mut totals: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect();
    // Stable sort keeps the name order from the BTreeMap for ties.
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

/// Income and expense totals of one month, without the transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub month: YearMonth,
    pub income: Amount,
    pub expense: Amount,
}

/// Totals for the month containing `today` and the five months before it, oldest first. Months
/// without transactions have zero totals.
pub fn last_six_months(transactions: &[Transaction], today: NaiveDate) -> Vec<MonthTotals> {
    let mut months = Vec::with_capacity(6);
    let mut month = YearMonth::from_date(today);
    for _ in 0..6 {
        months.push(month);
        month = month.previous();
    }
    months.reverse();

    months
        .into_iter()
        .map(|month| {
            let in_month = || transactions.iter().filter(move |t| t.month() == month);
            MonthTotals {
                month,
                income: in_month()
                    .filter(|t| t.is_income())
                    .map(|t| t.amount())
                    .sum(),
                expense: in_month()
                    .filter(|t| t.is_expense())
                    .map(|t| t.amount())
                    .sum(),
            }
        })
        .collect()
}

/// The dashboard figures: this month's totals and the all-time totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub month: YearMonth,
    pub month_income: Amount,
    pub month_expense: Amount,
    pub month_balance: Amount,
    pub total_income: Amount,
    pub total_expense: Amount,
    pub balance: Amount,
}

/// Builds the `Summary` for the month containing `today`. A month with no transactions has
/// zero totals.
pub fn summarize(transactions: &[Transaction], today: NaiveDate) -> Summary {
    let month = YearMonth::from_date(today);
    let (month_income, month_expense) = month_data_for(transactions, today)
        .map(|m| (m.income, m.expense))
        .unwrap_or((Amount::ZERO, Amount::ZERO));
    Summary {
        month,
        month_income,
        month_expense,
        month_balance: month_income - month_expense,
        total_income: total_income(transactions),
        total_expense: total_expense(transactions),
        balance: balance(transactions),
    }
}
