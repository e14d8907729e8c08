use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Creates the data directory and an initial `config.json` file.
///
/// # Arguments
/// - `budget_home` - The directory that will be the root of data directory, e.g. `$HOME/budget`
/// - `seed_sample_data` - Whether the first load of an empty transaction list fills it with a
///   month of demo transactions.
/// - `currency` - The sign printed in front of amounts.
///
/// # Errors
/// - Returns an error if any file operations fail or the directory was already initialized.
pub async fn init(
    budget_home: &Path,
    seed_sample_data: bool,
    currency: &str,
) -> Result<Out<PathBuf>> {
    let config = Config::create(budget_home, seed_sample_data, currency)
        .await
        .context("Unable to create the data directory and config")?;
    let root = config.root().to_path_buf();
    Ok(Out::new(
        format!("Created the budget directory at {}", root.display()),
        root,
    ))
}
