pub mod args;
mod auth;
mod budget;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod storage;
pub mod summary;
mod utils;

pub use auth::AuthStore;
pub use budget::BudgetStore;
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use storage::Storage;
