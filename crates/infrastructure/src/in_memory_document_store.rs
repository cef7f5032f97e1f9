//! In-memory request, quotation, and supplier collections.

use std::collections::HashMap;

use async_trait::async_trait;
use supplink_application::{DocumentStore, QuotationQuery, RequestQuery};
use supplink_core::{AppError, AppResult};
use supplink_domain::{PurchaseRequest, QualificationStatus, Quotation, Supplier};
use tokio::sync::RwLock;

/// In-memory document store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    requests: RwLock<HashMap<String, PurchaseRequest>>,
    quotations: RwLock<HashMap<String, Quotation>>,
    suppliers: RwLock<HashMap<String, Supplier>>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a purchase request.
    pub async fn insert_request(&self, request: PurchaseRequest) -> AppResult<()> {
        insert_unique(&self.requests, "request", request.id.clone(), request).await
    }

    /// Adds a quotation. The quoted request must already exist.
    pub async fn insert_quotation(&self, quotation: Quotation) -> AppResult<()> {
        if !self
            .requests
            .read()
            .await
            .contains_key(&quotation.request_id)
        {
            return Err(AppError::Validation(format!(
                "quotation '{}' references unknown request '{}'",
                quotation.id, quotation.request_id
            )));
        }

        insert_unique(&self.quotations, "quotation", quotation.id.clone(), quotation).await
    }

    /// Adds a supplier.
    pub async fn insert_supplier(&self, supplier: Supplier) -> AppResult<()> {
        insert_unique(&self.suppliers, "supplier", supplier.id.clone(), supplier).await
    }
}

async fn insert_unique<T>(
    collection: &RwLock<HashMap<String, T>>,
    kind: &str,
    id: String,
    value: T,
) -> AppResult<()> {
    if id.trim().is_empty() {
        return Err(AppError::Validation(format!("{kind} id must not be empty")));
    }

    let mut collection = collection.write().await;
    if collection.contains_key(&id) {
        return Err(AppError::Conflict(format!("{kind} '{id}' already exists")));
    }

    collection.insert(id, value);
    Ok(())
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_request(&self, request_id: &str) -> AppResult<Option<PurchaseRequest>> {
        Ok(self.requests.read().await.get(request_id).cloned())
    }

    async fn list_requests(&self, query: &RequestQuery) -> AppResult<Vec<PurchaseRequest>> {
        let requests = self.requests.read().await;

        let mut values: Vec<PurchaseRequest> = requests
            .values()
            .filter(|request| {
                query
                    .requester_uid
                    .as_deref()
                    .is_none_or(|uid| request.requester_uid == uid)
                    && query.filter.matches(request)
            })
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });

        Ok(values)
    }

    async fn find_quotation(&self, quotation_id: &str) -> AppResult<Option<Quotation>> {
        Ok(self.quotations.read().await.get(quotation_id).cloned())
    }

    async fn list_quotations(&self, query: &QuotationQuery) -> AppResult<Vec<Quotation>> {
        let quotations = self.quotations.read().await;

        let mut values: Vec<Quotation> = quotations
            .values()
            .filter(|quotation| {
                query
                    .request_id
                    .as_deref()
                    .is_none_or(|id| quotation.request_id == id)
                    && query
                        .supplier_id
                        .as_deref()
                        .is_none_or(|id| quotation.supplier_id == id)
            })
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            left.amount_cents
                .cmp(&right.amount_cents)
                .then_with(|| left.id.cmp(&right.id))
        });

        Ok(values)
    }

    async fn find_supplier(&self, supplier_id: &str) -> AppResult<Option<Supplier>> {
        Ok(self.suppliers.read().await.get(supplier_id).cloned())
    }

    async fn find_supplier_by_owner(&self, owner_uid: &str) -> AppResult<Option<Supplier>> {
        Ok(self
            .suppliers
            .read()
            .await
            .values()
            .find(|supplier| supplier.owner_uid.as_deref() == Some(owner_uid))
            .cloned())
    }

    async fn list_suppliers(
        &self,
        qualification: Option<QualificationStatus>,
    ) -> AppResult<Vec<Supplier>> {
        let suppliers = self.suppliers.read().await;

        let mut values: Vec<Supplier> = suppliers
            .values()
            .filter(|supplier| qualification.is_none_or(|status| supplier.qualification == status))
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            left.company_name
                .to_lowercase()
                .cmp(&right.company_name.to_lowercase())
        });

        Ok(values)
    }
}
