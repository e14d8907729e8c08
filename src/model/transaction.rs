use crate::model::{Amount, YearMonth};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether a transaction brings money in or takes it out.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single income or expense record.
///
/// Transactions are created by `BudgetStore::add`, which assigns the `id` and `created_at`
/// fields, and are never modified afterwards. The JSON form uses camelCase keys, e.g.
///
/// ```json
/// {
///   "id": "1710000000000",
///   "type": "expense",
///   "amount": 300,
///   "category": "อาหาร",
///   "description": "lunch",
///   "date": "2024-03-02",
///   "createdAt": "2024-03-02T05:20:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: String,
    r#type: TransactionType,
    amount: Amount,
    category: String,
    description: String,
    #[serde(with = "calendar_date")]
    date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(id: impl Into<String>, data: NewTransaction, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            r#type: data.r#type,
            amount: data.amount,
            category: data.category,
            description: data.description,
            date: data.date,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn r#type(&self) -> TransactionType {
        self.r#type
    }

    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The calendar month this transaction is grouped under.
    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}

/// The caller-supplied fields of a transaction; everything except `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub r#type: TransactionType,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        r#type: TransactionType,
        amount: impl Into<Amount>,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            r#type,
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
            date,
        }
    }
}

/// Dates are written as `YYYY-MM-DD`. When reading, a full timestamp such as
/// `2024-03-01T00:00:00.000Z` is also accepted and only its date part is kept.
mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub(super) fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let date_part = s.get(..10).unwrap_or(&s);
        NaiveDate::parse_from_str(date_part, FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{s}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Transaction {
        let created_at = DateTime::parse_from_rfc3339("2024-03-02T05:20:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Transaction::new(
            "1710000000000",
            NewTransaction::new(
                TransactionType::Expense,
                300,
                "อาหาร",
                "lunch",
                date("2024-03-02"),
            ),
            created_at,
        )
    }

    #[test]
    fn test_transaction_type_strings() {
        assert_eq!(TransactionType::Income.to_string(), "income");
        assert_eq!(
            TransactionType::from_str("expense").unwrap(),
            TransactionType::Expense
        );
        assert!(TransactionType::from_str("transfer").is_err());
    }

    #[test]
    fn test_serialize_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "1710000000000");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["category"], "อาหาร");
        assert_eq!(json["date"], "2024-03-02");
        assert_eq!(json["createdAt"], "2024-03-02T05:20:00Z");
        assert!(json["amount"].is_number());
    }

    #[test]
    fn test_deserialize_timestamp_date() {
        let json = r#"{
            "id": "1",
            "type": "income",
            "amount": 45000,
            "category": "เงินเดือน",
            "description": "salary",
            "date": "2024-03-01T00:00:00.000Z",
            "createdAt": "2024-03-01T00:00:00.000Z"
        }"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.date(), date("2024-03-01"));
        assert_eq!(t.month().to_string(), "2024-03");
        assert!(t.is_income());
        assert_eq!(t.amount(), Amount::from(45000));
    }

    #[test]
    fn test_deserialize_bad_date() {
        let json = r#"{
            "id": "1",
            "type": "income",
            "amount": 1,
            "category": "c",
            "description": "d",
            "date": "March 1st",
            "createdAt": "2024-03-01T00:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_round_trip_keeps_value() {
        let t = sample();
        let json = serde_json::to_string(&t).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
