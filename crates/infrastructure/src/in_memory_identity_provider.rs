//! Process-local identity provider.
//!
//! Credentials are held as Argon2id digests keyed by normalized email.
//! Every sign-in, sign-up, and sign-out publishes the resulting principal
//! on a watch channel, mirroring a hosted provider's auth-state stream.

use std::collections::HashMap;

use async_trait::async_trait;
use supplink_application::IdentityProvider;
use supplink_core::{AppError, AppResult, Principal};
use tokio::sync::{RwLock, watch};
use tracing::{debug, info};
use uuid::Uuid;

use crate::Argon2CredentialHasher;

const INVALID_CREDENTIALS: &str = "invalid email or password";

#[derive(Debug, Clone)]
struct StoredAccount {
    uid: String,
    digest: String,
}

/// In-memory identity provider.
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, StoredAccount>>,
    hasher: Argon2CredentialHasher,
    principal: watch::Sender<Option<Principal>>,
}

impl InMemoryIdentityProvider {
    /// Creates a provider with no accounts and nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        let (principal, _receiver) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            hasher: Argon2CredentialHasher::new(),
            principal,
        }
    }

    /// Registers an account with a fixed uid without signing it in.
    pub async fn seed_account(&self, uid: &str, email: &str, password: &str) -> AppResult<()> {
        let key = normalize(email);
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "account '{key}' already exists"
            )));
        }

        let digest = self.hasher.digest(password)?;
        accounts.insert(
            key,
            StoredAccount {
                uid: uid.to_owned(),
                digest,
            },
        );
        Ok(())
    }

    /// Returns the number of registered accounts.
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    fn publish(&self, principal: Option<Principal>) {
        self.principal.send_replace(principal);
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Principal> {
        let key = normalize(email);
        let account = self.accounts.read().await.get(&key).cloned();

        let Some(account) = account else {
            debug!(email = %key, "sign-in for unknown account");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        };
        if !self.hasher.matches(password, &account.digest)? {
            debug!(email = %key, "sign-in with wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        }

        let principal = Principal::new(account.uid, key);
        self.publish(Some(principal.clone()));
        Ok(principal)
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Principal> {
        let key = normalize(email);
        let uid = Uuid::new_v4().to_string();
        let digest = self.hasher.digest(password)?;

        {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&key) {
                return Err(AppError::Conflict(
                    "an account with this email already exists".to_owned(),
                ));
            }
            accounts.insert(
                key.clone(),
                StoredAccount {
                    uid: uid.clone(),
                    digest,
                },
            );
        }

        info!(uid = %uid, "identity account registered");
        let principal = Principal::new(uid, key);
        self.publish(Some(principal.clone()));
        Ok(principal)
    }

    async fn sign_out(&self) -> AppResult<()> {
        self.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.principal.subscribe()
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests;
