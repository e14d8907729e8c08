use serde::{Deserialize, Serialize};

/// The logged-in user. There is no account database, so a `User` is fabricated from the email
/// address typed at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    email: String,
    name: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
        }
    }

    /// Builds the demo user for `email`. The display name is the part before the first `@`.
    pub fn demo(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email);
        Self::new("1", email, name)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[test]
fn test_demo_user_name() {
    let user = User::demo("somchai@example.com");
    assert_eq!(user.id(), "1");
    assert_eq!(user.email(), "somchai@example.com");
    assert_eq!(user.name(), "somchai");

    let no_at = User::demo("plain");
    assert_eq!(no_at.name(), "plain");
}
