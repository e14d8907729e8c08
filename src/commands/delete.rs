//! The `budget delete` command.

use crate::commands::{open_dashboard, Out};
use crate::model::Transaction;
use crate::{Config, Result};

/// Deletes the transaction with `id`. An unknown id is not an error; nothing is deleted and the
/// returned structure is `None`.
pub async fn delete_transaction(config: Config, id: &str) -> Result<Out<Option<Transaction>>> {
    let (_user, mut budget) = open_dashboard(&config).await?;
    let removed = budget.delete(id.trim()).await?;
    let message = match &removed {
        Some(t) => format!("Deleted transaction {} ({})", t.id(), t.description()),
        None => format!("No transaction with ID {id}, nothing was deleted"),
    };
    Ok(Out::new(message, removed))
}
