//! Email/password lookup over a fixed set of credentials.

use thiserror::Error;
use zerosight_types::{Actor, Credential, Role};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
}

#[derive(Clone, Debug)]
pub struct ActorDirectory {
    credentials: Vec<Credential>,
}

impl ActorDirectory {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    /// Email match ignores case; the password must match exactly.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Actor, AuthError> {
        let email = email.to_lowercase();
        self.credentials
            .iter()
            .find(|c| c.email.to_lowercase() == email && c.password == password)
            .map(|c| c.actor.clone())
            .ok_or(AuthError::InvalidCredentials)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Actor> {
        let email = email.to_lowercase();
        self.credentials
            .iter()
            .find(|c| c.email.to_lowercase() == email)
            .map(|c| &c.actor)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.credentials.iter().map(|c| &c.actor)
    }
}

impl Default for ActorDirectory {
    fn default() -> Self {
        Self::new(default_credentials())
    }
}

/// The four demo accounts.
pub fn default_credentials() -> Vec<Credential> {
    [
        ("1", "admin@zerosight.com", "admin123", "System Administrator", Role::Admin),
        ("2", "analyst@zerosight.com", "analyst123", "Sarah Chen", Role::SocAnalyst),
        ("3", "pentester@zerosight.com", "pentester123", "Alex Rodriguez", Role::Pentester),
        ("4", "client@techcorp.com", "client123", "John Smith", Role::Client),
    ]
    .into_iter()
    .map(|(id, email, password, name, role)| Credential {
        email: email.to_string(),
        password: password.to_string(),
        actor: Actor {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
        },
    })
    .collect()
}
