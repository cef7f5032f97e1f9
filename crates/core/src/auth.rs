use serde::{Deserialize, Serialize};

/// Authenticated principal reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    uid: String,
    email: String,
}

impl Principal {
    /// Creates a principal from provider data.
    #[must_use]
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }

    /// Returns the stable provider uid, also the profile record key.
    #[must_use]
    pub fn uid(&self) -> &str {
        self.uid.as_str()
    }

    /// Returns the sign-in email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}
