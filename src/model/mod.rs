//! Types that represent the core data model, such as `Transaction` and `User`.
mod amount;
mod category;
mod month;
mod transaction;
mod user;

pub use amount::{Amount, AmountError, AMOUNT_LIMIT, DEFAULT_CURRENCY, MAX_DECIMAL_PLACES};
pub use category::{categories, is_known_category, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use month::YearMonth;
pub use transaction::{NewTransaction, Transaction, TransactionType};
pub use user::User;
