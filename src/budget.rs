//! The transaction store.

use crate::model::{NewTransaction, Transaction, TransactionType};
use crate::storage::{Storage, BUDGET_TRANSACTIONS};
use crate::Result;
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use tracing::{debug, info};

/// Owns the list of transactions and mirrors it to `Storage` under `budget_transactions`.
///
/// Every mutation overwrites the whole stored list. There is no validation here: whatever the
/// caller passes to `add` is stored as-is, including zero or negative amounts.
#[derive(Debug, Clone)]
pub struct BudgetStore {
    storage: Storage,
    transactions: Vec<Transaction>,
}

impl BudgetStore {
    /// Loads the stored transactions.
    ///
    /// If nothing has ever been stored and `seed_sample_data` is true, a set of demo
    /// transactions dated in the current month is stored and returned instead.
    pub async fn load(storage: Storage, seed_sample_data: bool) -> Result<Self> {
        let transactions = match storage.get_json(BUDGET_TRANSACTIONS).await? {
            Some(transactions) => transactions,
            None if seed_sample_data => {
                let sample = sample_transactions(Local::now().date_naive());
                info!("Seeding {} sample transactions", sample.len());
                storage.set_json(BUDGET_TRANSACTIONS, &sample).await?;
                sample
            }
            None => Vec::new(),
        };
        debug!("Loaded {} transactions", transactions.len());
        Ok(Self {
            storage,
            transactions,
        })
    }

    /// A snapshot of every transaction in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    /// Assigns an id and creation time to `data`, appends it and persists the list.
    pub async fn add(&mut self, data: NewTransaction) -> Result<Transaction> {
        let created_at = Utc::now();
        let id = self.next_id(created_at);
        let transaction = Transaction::new(id, data, created_at);
        self.transactions.push(transaction.clone());
        self.save().await?;
        debug!("Added transaction {}", transaction.id());
        Ok(transaction)
    }

    /// Removes the transaction with `id` and persists the list. Deleting an id that does not
    /// exist is a no-op that returns `None`.
    pub async fn delete(&mut self, id: &str) -> Result<Option<Transaction>> {
        let removed = self
            .transactions
            .iter()
            .position(|t| t.id() == id)
            .map(|ix| self.transactions.remove(ix));
        self.save().await?;
        match &removed {
            Some(_) => debug!("Deleted transaction {id}"),
            None => debug!("No transaction with id {id}, nothing deleted"),
        }
        Ok(removed)
    }

    async fn save(&self) -> Result<()> {
        self.storage
            .set_json(BUDGET_TRANSACTIONS, &self.transactions)
            .await
    }

    /// Ids are the creation time in milliseconds since the epoch. If that collides with an
    /// existing id (two adds within the same millisecond) the next free number is used.
    fn next_id(&self, created_at: DateTime<Utc>) -> String {
        let mut candidate = created_at.timestamp_millis();
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}

/// Demo transactions for the month containing `today`.
fn sample_transactions(today: NaiveDate) -> Vec<Transaction> {
    use TransactionType::{Expense, Income};

    let rows = [
        (Income, 45000, "เงินเดือน", "เงินเดือนประจำเดือน", 1),
        (Expense, 12000, "ที่พัก", "ค่าเช่าห้อง", 5),
        (Expense, 3500, "อาหาร", "ค่าอาหารสัปดาห์แรก", 7),
        (Expense, 1500, "เดินทาง", "ค่าน้ำมันรถ", 10),
        (Income, 5000, "งานเสริม", "รายได้งานฟรีแลนซ์", 15),
        (Expense, 2500, "สาธารณูปโภค", "ค่าน้ำค่าไฟ", 18),
        (Expense, 800, "บันเทิง", "ดูหนัง Netflix", 20),
    ];

    rows.into_iter()
        .enumerate()
        .filter_map(|(ix, (r#type, amount, category, description, day))| {
            let date = today.with_day(day)?;
            let created_at = date.and_hms_opt(0, 0, 0)?.and_utc();
            Some(Transaction::new(
                (ix + 1).to_string(),
                NewTransaction::new(r#type, amount, category, description, date),
                created_at,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn storage(dir: &TempDir) -> Storage {
        Storage::new(dir.path().join("storage.json"))
    }

    fn lunch() -> NewTransaction {
        NewTransaction::new(
            TransactionType::Expense,
            120,
            "อาหาร",
            "lunch",
            date("2024-03-02"),
        )
    }

    #[tokio::test]
    async fn test_load_empty_without_seed() {
        let dir = TempDir::new().unwrap();
        let store = BudgetStore::load(storage(&dir), false).await.unwrap();
        assert!(store.transactions().is_empty());
        assert_eq!(
            storage(&dir).get_item(BUDGET_TRANSACTIONS).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_load_seeds_sample_data_once() {
        let dir = TempDir::new().unwrap();
        let mut store = BudgetStore::load(storage(&dir), true).await.unwrap();
        assert_eq!(store.transactions().len(), 7);
        let current = crate::model::YearMonth::current();
        assert!(store.transactions().iter().all(|t| t.month() == current));

        // Once something is stored, even an empty list, it is not seeded again.
        for id in ["1", "2", "3", "4", "5", "6", "7"] {
            store.delete(id).await.unwrap();
        }
        let reloaded = BudgetStore::load(storage(&dir), true).await.unwrap();
        assert!(reloaded.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = BudgetStore::load(storage(&dir), false).await.unwrap();
        let added = store.add(lunch()).await.unwrap();
        assert!(!added.id().is_empty());
        assert!(added.id().parse::<i64>().is_ok());
        assert_eq!(added.amount(), Amount::from(120));
        assert_eq!(store.get(added.id()), Some(&added));

        let reloaded = BudgetStore::load(storage(&dir), false).await.unwrap();
        assert_eq!(reloaded.transactions(), &[added]);
    }

    #[tokio::test]
    async fn test_add_accepts_non_positive_amounts() {
        let dir = TempDir::new().unwrap();
        let mut store = BudgetStore::load(storage(&dir), false).await.unwrap();
        let mut data = lunch();
        data.amount = Amount::from(-5);
        store.add(data).await.unwrap();
        let mut data = lunch();
        data.amount = Amount::ZERO;
        store.add(data).await.unwrap();
        assert_eq!(store.transactions().len(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_unique_for_quick_adds() {
        let dir = TempDir::new().unwrap();
        let mut store = BudgetStore::load(storage(&dir), false).await.unwrap();
        let mut ids = Vec::new();
        for _ in 0..20 {
            ids.push(store.add(lunch()).await.unwrap().id().to_string());
        }
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[tokio::test]
    async fn test_add_then_delete_restores_state() {
        let dir = TempDir::new().unwrap();
        let mut store = BudgetStore::load(storage(&dir), true).await.unwrap();
        let before = store.transactions().to_vec();

        let added = store.add(lunch()).await.unwrap();
        let removed = store.delete(added.id()).await.unwrap();
        assert_eq!(removed, Some(added));
        assert_eq!(store.transactions(), before.as_slice());

        let reloaded = BudgetStore::load(storage(&dir), true).await.unwrap();
        assert_eq!(reloaded.transactions(), before.as_slice());
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = BudgetStore::load(storage(&dir), true).await.unwrap();
        let before = store.transactions().to_vec();
        assert_eq!(store.delete("does-not-exist").await.unwrap(), None);
        assert_eq!(store.transactions(), before.as_slice());
    }

    #[test]
    fn test_sample_transactions() {
        let sample = sample_transactions(date("2024-02-29"));
        assert_eq!(sample.len(), 7);
        assert_eq!(sample[0].id(), "1");
        assert_eq!(sample[0].date(), date("2024-02-01"));
        assert_eq!(sample[6].date(), date("2024-02-20"));
        let income: Amount = sample
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount())
            .sum();
        assert_eq!(income, Amount::from(50000));
    }
}
