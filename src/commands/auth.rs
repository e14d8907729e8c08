//! Demo login and logout.

use crate::commands::Out;
use crate::model::User;
use crate::{AuthStore, Config, Result};
use anyhow::bail;

/// Handles `budget login`. Any non-empty email and password are accepted.
///
/// # Errors
/// Returns an error if either field is empty, or if the session cannot be stored.
pub async fn login(config: &Config, email: &str, password: &str) -> Result<Out<User>> {
    let mut auth = AuthStore::load(config.storage()).await?;
    if !auth.login(email.trim(), password).await? {
        bail!("Login failed: both an email and a password are required")
    }
    let user = auth.require_user()?.clone();
    Ok(Out::new(format!("Welcome, {}!", user.name()), user))
}

/// Handles `budget logout`. Logging out when nobody is logged in is not an error.
pub async fn logout(config: &Config) -> Result<Out<()>> {
    let mut auth = AuthStore::load(config.storage()).await?;
    let was_logged_in = auth.is_authenticated();
    auth.logout().await?;
    Ok(if was_logged_in {
        "Logged out".into()
    } else {
        "Nobody was logged in".into()
    })
}

/// Handles `budget whoami`.
pub async fn whoami(config: &Config) -> Result<Out<User>> {
    let auth = AuthStore::load(config.storage()).await?;
    let user = auth.require_user()?.clone();
    Ok(Out::new(
        format!("Logged in as {} <{}>", user.name(), user.email()),
        user,
    ))
}
