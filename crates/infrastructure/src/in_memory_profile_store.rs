use std::collections::HashMap;

use async_trait::async_trait;
use supplink_application::{ProfileStore, ProfileUpdate};
use supplink_core::{AppError, AppResult};
use supplink_domain::UserProfile;
use tokio::sync::RwLock;

/// In-memory user profile store keyed by uid.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a profile.
    pub async fn put_profile(&self, profile: UserProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.uid.clone(), profile);
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn fetch_profile(&self, uid: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(uid).cloned())
    }

    async fn create_profile(&self, profile: UserProfile) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.uid) {
            return Err(AppError::Conflict(format!(
                "profile '{}' already exists",
                profile.uid
            )));
        }

        profiles.insert(profile.uid.clone(), profile);
        Ok(())
    }

    async fn update_profile(&self, uid: &str, update: ProfileUpdate) -> AppResult<UserProfile> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(uid)
            .ok_or_else(|| AppError::NotFound(format!("profile '{uid}' does not exist")))?;

        if let Some(first_name) = update.first_name {
            profile.first_name = first_name.trim().to_owned();
        }
        if let Some(last_name) = update.last_name {
            profile.last_name = last_name.trim().to_owned();
        }

        Ok(profile.clone())
    }
}
