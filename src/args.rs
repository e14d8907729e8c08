//! These structs provide the CLI interface for the budget CLI.

use crate::model::{TransactionType, DEFAULT_CURRENCY};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// budget: A command-line personal budget tracker.
///
/// Record your income and expenses, then see where the money went: this month's totals, a
/// breakdown of spending by category, the last six months side by side, and every transaction
/// grouped by month.
///
/// Data is kept in a single directory (see --budget-home). Run `budget init` once, then
/// `budget login` with any email and password to get started.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and the configuration file.
    ///
    /// This is the first command you should run. By default the data directory is
    /// $HOME/budget; pass --budget-home to put it somewhere else.
    Init(InitArgs),
    /// Log in. Any non-empty email and password are accepted.
    Login(LoginArgs),
    /// Log out and forget the stored session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Record an income or expense transaction.
    Add(AddArgs),
    /// Delete a transaction by its ID.
    Delete(DeleteArgs),
    /// List all transactions grouped by month, newest month first.
    List,
    /// Show this month's income, expense and balance, plus all-time totals.
    Summary,
    /// Show this month's expenses by category and the last six months side by side.
    Chart,
    /// List the suggested categories.
    Categories(CategoriesArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where budget data and configuration is held. Defaults to ~/budget
    #[arg(long, env = "BUDGET_HOME", default_value_t = default_budget_home())]
    budget_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, budget_home: PathBuf) -> Self {
        Self {
            log_level,
            budget_home: budget_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn budget_home(&self) -> &DisplayPath {
        &self.budget_home
    }
}

/// (Not shown): Args for the `budget init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Start with an empty transaction list instead of a month of demo transactions.
    #[arg(long)]
    no_sample_data: bool,

    /// The currency sign printed in front of amounts.
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    currency: String,
}

impl InitArgs {
    pub fn new(no_sample_data: bool, currency: impl Into<String>) -> Self {
        Self {
            no_sample_data,
            currency: currency.into(),
        }
    }

    pub fn seed_sample_data(&self) -> bool {
        !self.no_sample_data
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// (Not shown): Args for the `budget login` command.
#[derive(Debug, Parser, Clone)]
pub struct LoginArgs {
    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, env = "BUDGET_PASSWORD", hide_env_values = true, default_value = "")]
    password: String,
}

impl LoginArgs {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// (Not shown): Args for the `budget add` command.
///
/// The amount, category and description are taken as plain strings so that a blank value can be
/// reported as missing rather than as a parse error.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// Whether this is income or an expense.
    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    r#type: TransactionType,

    /// The amount, e.g. 1500 or 1,500.50
    #[arg(long, default_value = "")]
    amount: String,

    /// The category. See `budget categories` for suggestions.
    #[arg(long, default_value = "")]
    category: String,

    /// A short description.
    #[arg(long, default_value = "")]
    description: String,

    /// The date as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<String>,
}

impl AddArgs {
    pub fn new(
        r#type: TransactionType,
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        date: Option<String>,
    ) -> Self {
        Self {
            r#type,
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    pub fn r#type(&self) -> TransactionType {
        self.r#type
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// (Not shown): Args for the `budget delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the transaction, as shown by `budget list`.
    id: String,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// (Not shown): Args for the `budget categories` command.
#[derive(Debug, Parser, Clone)]
pub struct CategoriesArgs {
    /// Only show categories for this type.
    #[arg(long = "type", value_enum)]
    r#type: Option<TransactionType>,
}

impl CategoriesArgs {
    pub fn new(r#type: Option<TransactionType>) -> Self {
        Self { r#type }
    }

    pub fn r#type(&self) -> Option<TransactionType> {
        self.r#type
    }
}

fn default_budget_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("budget"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --budget-home or BUDGET_HOME instead of relying on the default \
                budget home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("budget")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
