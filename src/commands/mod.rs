//! Command handlers for the budget CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod auth;
mod categories;
mod delete;
mod init;
mod list;
mod report;

use crate::model::User;
use crate::{AuthStore, BudgetStore, Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

pub use add::add_transaction;
pub use auth::{login, logout, whoami};
pub use categories::{categories, CategoryMenu};
pub use delete::delete_transaction;
pub use init::init;
pub use list::list;
pub use report::{chart, summary, Chart};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    ///
    /// The message is the command's output, so it is printed directly and not through `tracing`,
    /// which writes to stderr.
    pub fn print(&self) {
        println!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Loads the stores behind the dashboard commands. Fails if nobody is logged in.
async fn open_dashboard(config: &Config) -> Result<(User, BudgetStore)> {
    let auth = AuthStore::load(config.storage()).await?;
    let user = auth.require_user()?.clone();
    let budget = BudgetStore::load(config.storage(), config.seed_sample_data()).await?;
    Ok((user, budget))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_out_accessors() {
        let out = Out::new("done", vec![1, 2]);
        assert_eq!(out.message(), "done");
        assert_eq!(out.structure(), Some(&vec![1, 2]));

        let out: Out<()> = "just a message".into();
        assert_eq!(out.message(), "just a message");
        assert!(out.structure().is_none());
    }

    #[tokio::test]
    async fn test_dashboard_requires_login() {
        let env = TestEnv::new().await;
        let err = open_dashboard(&env.config()).await.unwrap_err();
        assert!(err.to_string().contains("Not logged in"));
    }

    #[tokio::test]
    async fn test_dashboard_after_login() {
        let env = TestEnv::logged_in().await;
        let (user, budget) = open_dashboard(&env.config()).await.unwrap();
        assert_eq!(user.email(), "tester@example.com");
        assert!(budget.transactions().is_empty());
    }
}
