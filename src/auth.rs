//! Demo authentication.
//!
//! There is no account database and no credential check: any non-empty email and password log
//! in. The session is an opaque token plus the fabricated `User`, both kept in `Storage`. The
//! session never expires.

use crate::model::User;
use crate::storage::{Storage, AUTH_TOKEN, USER};
use crate::Result;
use anyhow::anyhow;
use chrono::Utc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct AuthStore {
    storage: Storage,
    user: Option<User>,
}

impl AuthStore {
    /// Restores the session from storage. The user counts as logged in only if both the token
    /// and the user record are present.
    pub async fn load(storage: Storage) -> Result<Self> {
        let token = storage.get_item(AUTH_TOKEN).await?;
        let user = match token {
            Some(_) => storage.get_json::<User>(USER).await?,
            None => None,
        };
        debug!("Session restored: authenticated = {}", user.is_some());
        Ok(Self { storage, user })
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Returns the logged-in user or an error telling the caller to log in.
    pub fn require_user(&self) -> Result<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| anyhow!("Not logged in. Run `budget login` first."))
    }

    /// Logs in with any non-empty `email` and `password`. Returns `false`, leaving everything
    /// untouched, if either is empty.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        if email.is_empty() || password.is_empty() {
            debug!("Login rejected: email and password are required");
            return Ok(false);
        }
        let user = User::demo(email);
        let token = format!("demo_token_{}", Utc::now().timestamp_millis());
        self.storage.set_item(AUTH_TOKEN, token).await?;
        self.storage.set_json(USER, &user).await?;
        info!("Logged in as {}", user.email());
        self.user = Some(user);
        Ok(true)
    }

    /// Clears the stored session.
    pub async fn logout(&mut self) -> Result<()> {
        self.storage.remove_item(AUTH_TOKEN).await?;
        self.storage.remove_item(USER).await?;
        self.user = None;
        Ok(())
    }
}
