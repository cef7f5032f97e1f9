//! Document store port for request, quotation, and supplier records.

use async_trait::async_trait;
use supplink_core::AppResult;
use supplink_domain::{PurchaseRequest, QualificationStatus, Quotation, RequestFilter, Supplier};

/// Query over purchase requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQuery {
    /// Restricts to one requester's requests.
    pub requester_uid: Option<String>,
    /// Status filter.
    pub filter: RequestFilter,
}

/// Query over quotations. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotationQuery {
    /// Restricts to one request.
    pub request_id: Option<String>,
    /// Restricts to one supplier.
    pub supplier_id: Option<String>,
}

/// Managed document database port.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Finds a request by id.
    async fn find_request(&self, request_id: &str) -> AppResult<Option<PurchaseRequest>>;

    /// Lists requests matching `query`, newest first.
    async fn list_requests(&self, query: &RequestQuery) -> AppResult<Vec<PurchaseRequest>>;

    /// Finds a quotation by id.
    async fn find_quotation(&self, quotation_id: &str) -> AppResult<Option<Quotation>>;

    /// Lists quotations matching `query`, cheapest first.
    async fn list_quotations(&self, query: &QuotationQuery) -> AppResult<Vec<Quotation>>;

    /// Finds a supplier by id.
    async fn find_supplier(&self, supplier_id: &str) -> AppResult<Option<Supplier>>;

    /// Finds the supplier record owned by a supplier account.
    async fn find_supplier_by_owner(&self, owner_uid: &str) -> AppResult<Option<Supplier>>;

    /// Lists suppliers, optionally by qualification status, by company name.
    async fn list_suppliers(
        &self,
        qualification: Option<QualificationStatus>,
    ) -> AppResult<Vec<Supplier>>;
}
