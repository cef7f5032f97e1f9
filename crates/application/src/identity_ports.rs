//! Ports for the external identity and profile provider.

use async_trait::async_trait;
use supplink_core::{AppResult, Principal};
use supplink_domain::UserProfile;
use tokio::sync::watch;

/// Identity provider port (authentication only).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticates with email and password.
    ///
    /// Implementations also publish the principal to subscribers.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Principal>;

    /// Creates an account and signs it in.
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Principal>;

    /// Signs out the current principal and publishes `None`.
    async fn sign_out(&self) -> AppResult<()>;

    /// Subscribes to principal changes. The receiver starts at the current value.
    fn subscribe(&self) -> watch::Receiver<Option<Principal>>;
}

/// Partial profile update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
}

impl ProfileUpdate {
    /// Returns whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}

/// Profile store port, keyed by provider uid.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches a profile by uid.
    async fn fetch_profile(&self, uid: &str) -> AppResult<Option<UserProfile>>;

    /// Creates a profile. Fails with `Conflict` when the uid already has one.
    async fn create_profile(&self, profile: UserProfile) -> AppResult<()>;

    /// Applies a partial update and returns the stored result.
    async fn update_profile(&self, uid: &str, update: ProfileUpdate) -> AppResult<UserProfile>;
}
