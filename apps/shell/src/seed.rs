//! JSON fixture loaded into the in-memory adapters at startup.

use std::path::Path;

use serde::Deserialize;
use supplink_core::{AppError, AppResult};
use supplink_domain::{PurchaseRequest, Quotation, Role, Supplier, UserProfile};
use supplink_infrastructure::{InMemoryDocumentStore, InMemoryIdentityProvider, InMemoryProfileStore};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDocument {
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
    #[serde(default)]
    pub requests: Vec<PurchaseRequest>,
    #[serde(default)]
    pub quotations: Vec<Quotation>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedAccount {
    pub uid: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    /// Absent means the account predates the approval flag.
    #[serde(default)]
    pub approved: Option<bool>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub accounts: usize,
    pub requests: usize,
    pub quotations: usize,
    pub suppliers: usize,
}

impl SeedDocument {
    pub async fn read(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|error| {
            AppError::Validation(format!(
                "failed to read seed file '{}': {error}",
                path.display()
            ))
        })?;
        Self::parse(raw.as_str())
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw)
            .map_err(|error| AppError::Validation(format!("invalid seed document: {error}")))
    }

    /// Loads every record. Requests go in before the quotations that reference them.
    pub async fn apply(
        self,
        identity: &InMemoryIdentityProvider,
        profiles: &InMemoryProfileStore,
        documents: &InMemoryDocumentStore,
    ) -> AppResult<SeedCounts> {
        let counts = SeedCounts {
            accounts: self.accounts.len(),
            requests: self.requests.len(),
            quotations: self.quotations.len(),
            suppliers: self.suppliers.len(),
        };

        for account in self.accounts {
            identity
                .seed_account(&account.uid, &account.email, &account.password)
                .await?;
            profiles
                .put_profile(UserProfile {
                    uid: account.uid,
                    email: account.email.trim().to_ascii_lowercase(),
                    first_name: account.first_name,
                    last_name: account.last_name,
                    role: account.role,
                    approved: account.approved,
                })
                .await;
        }
        for request in self.requests {
            documents.insert_request(request).await?;
        }
        for quotation in self.quotations {
            documents.insert_quotation(quotation).await?;
        }
        for supplier in self.suppliers {
            documents.insert_supplier(supplier).await?;
        }

        Ok(counts)
    }
}
