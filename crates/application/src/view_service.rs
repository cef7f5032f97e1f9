//! Per-screen data loading.
//!
//! Views receive only ids through the carried context and fetch their own
//! records. Absent or unknown ids render `ViewModel::NotFound`; fetches
//! that outlive their view resolve to `ViewOutcome::Stale` and are dropped.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use supplink_core::{AppError, AppResult};
use supplink_domain::{
    PurchaseRequest, QualificationStatus, Quotation, RenderTarget, RequestFilter, RequestSummary,
    Role, Screen, Session, Supplier,
};
use tracing::debug;

use crate::{DocumentStore, QuotationQuery, RequestQuery, ViewToken};

/// Number of requests listed on dashboards.
pub const DASHBOARD_RECENT_LIMIT: usize = 5;

/// Data a screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewModel {
    /// Screen with no fetched data.
    Static {
        /// Rendered screen.
        screen: Screen,
    },
    /// Required context or record is absent.
    NotFound {
        /// Rendered screen.
        screen: Screen,
        /// User-facing explanation.
        message: String,
    },
    /// Fetch failed.
    Failed {
        /// Rendered screen.
        screen: Screen,
        /// User-facing explanation.
        message: String,
    },
    /// Filtered requests list.
    Requests {
        /// Filter applied.
        filter: RequestFilter,
        /// Matching requests.
        requests: Vec<PurchaseRequest>,
    },
    /// One request with its quotations.
    Request {
        /// Rendered screen.
        screen: Screen,
        /// The request.
        request: PurchaseRequest,
        /// Quotations received, cheapest first.
        quotations: Vec<Quotation>,
    },
    /// Dashboard counters.
    Dashboard {
        /// Rendered screen.
        screen: Screen,
        /// Counts per bucket.
        summary: RequestSummary,
        /// Most recent requests.
        recent: Vec<PurchaseRequest>,
    },
    /// One supplier with its quotations.
    Supplier {
        /// Rendered screen.
        screen: Screen,
        /// The supplier.
        supplier: Supplier,
        /// Quotations the supplier submitted.
        quotations: Vec<Quotation>,
    },
    /// Supplier list.
    Suppliers {
        /// Suppliers by company name.
        suppliers: Vec<Supplier>,
    },
    /// Supplier invitation.
    Invite {
        /// Request being quoted, when one was carried.
        request: Option<PurchaseRequest>,
        /// Qualified suppliers that can be invited.
        suppliers: Vec<Supplier>,
    },
}

/// Result of a load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Data for the still-visible view.
    Ready(ViewModel),
    /// The view was torn down before the fetch completed.
    Stale,
}

/// Loads view models from the document store.
#[derive(Clone)]
pub struct ViewService {
    documents: Arc<dyn DocumentStore>,
    fetch_timeout: Duration,
}

impl ViewService {
    /// Creates a view service with a per-load timeout.
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>, fetch_timeout: Duration) -> Self {
        Self {
            documents,
            fetch_timeout,
        }
    }

    /// Loads data for `target`, abandoning the fetch if `token` is cancelled.
    pub async fn load(
        &self,
        target: &RenderTarget,
        viewer: Option<&Session>,
        token: &ViewToken,
    ) -> AppResult<ViewOutcome> {
        if token.is_stale() {
            return Ok(ViewOutcome::Stale);
        }

        let fetch = tokio::time::timeout(self.fetch_timeout, self.fetch(target, viewer));

        tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!(
                    screen = %target.screen,
                    generation = token.generation(),
                    "view torn down before fetch completed"
                );
                Ok(ViewOutcome::Stale)
            }
            result = fetch => {
                let model = result.map_err(|_| {
                    AppError::Internal(format!("loading {} timed out", target.screen))
                })??;
                if token.is_stale() {
                    return Ok(ViewOutcome::Stale);
                }
                Ok(ViewOutcome::Ready(model))
            }
        }
    }

    async fn fetch(&self, target: &RenderTarget, viewer: Option<&Session>) -> AppResult<ViewModel> {
        let screen = target.screen;
        if let Some(param) = target.missing.first() {
            return Ok(ViewModel::NotFound {
                screen,
                message: format!("nothing selected ({})", param.as_str()),
            });
        }

        match screen {
            Screen::SignIn
            | Screen::SignUp
            | Screen::ForgotPassword
            | Screen::Terms
            | Screen::PendingApproval
            | Screen::Profile
            | Screen::NewRequest
            | Screen::EpiConfiguration => Ok(ViewModel::Static { screen }),
            Screen::RequestsList => {
                let filter = target.params.request_filter.unwrap_or_default();
                let query = RequestQuery {
                    requester_uid: own_requests_only(viewer),
                    filter,
                };
                let requests = self.documents.list_requests(&query).await?;
                Ok(ViewModel::Requests { filter, requests })
            }
            Screen::RequestDetail | Screen::PaymentTracking | Screen::QuotationForm => {
                self.request_view(screen, target.params.selected_request_id.as_deref())
                    .await
            }
            Screen::RequestReview => {
                self.request_view(screen, target.params.review_request_id.as_deref())
                    .await
            }
            Screen::Dashboard | Screen::ManagerDashboard => {
                let requests = self
                    .documents
                    .list_requests(&RequestQuery::default())
                    .await?;
                let summary = RequestSummary::tally(&requests);
                let recent = requests
                    .into_iter()
                    .take(DASHBOARD_RECENT_LIMIT)
                    .collect();
                Ok(ViewModel::Dashboard {
                    screen,
                    summary,
                    recent,
                })
            }
            Screen::SupplierWelcome
            | Screen::SupplierQuestionnaire
            | Screen::SupplierProgress
            | Screen::SupplierQuotations => self.own_supplier_view(screen, viewer).await,
            Screen::SupplierList => {
                let suppliers = self.documents.list_suppliers(None).await?;
                Ok(ViewModel::Suppliers { suppliers })
            }
            Screen::SupplierDetail => {
                let supplier_id = target
                    .params
                    .selected_supplier_id
                    .as_deref()
                    .unwrap_or_default();
                match self.documents.find_supplier(supplier_id).await? {
                    Some(supplier) => self.supplier_view(screen, supplier).await,
                    None => Ok(not_found(screen, "supplier", supplier_id)),
                }
            }
            Screen::SupplierInvite => {
                let request = match target.params.selected_request_id.as_deref() {
                    Some(request_id) if !request_id.trim().is_empty() => {
                        self.documents.find_request(request_id).await?
                    }
                    _ => None,
                };
                let suppliers = self
                    .documents
                    .list_suppliers(Some(QualificationStatus::Qualified))
                    .await?;
                Ok(ViewModel::Invite { request, suppliers })
            }
        }
    }

    async fn request_view(&self, screen: Screen, request_id: Option<&str>) -> AppResult<ViewModel> {
        let request_id = request_id.unwrap_or_default();
        let Some(request) = self.documents.find_request(request_id).await? else {
            return Ok(not_found(screen, "request", request_id));
        };

        let quotations = self
            .documents
            .list_quotations(&QuotationQuery {
                request_id: Some(request.id.clone()),
                supplier_id: None,
            })
            .await?;

        Ok(ViewModel::Request {
            screen,
            request,
            quotations,
        })
    }

    async fn own_supplier_view(
        &self,
        screen: Screen,
        viewer: Option<&Session>,
    ) -> AppResult<ViewModel> {
        let Some(viewer) = viewer else {
            return Ok(ViewModel::NotFound {
                screen,
                message: "sign in as a supplier to continue".to_owned(),
            });
        };

        let owner_uid = viewer.principal().uid();
        match self.documents.find_supplier_by_owner(owner_uid).await? {
            Some(supplier) => self.supplier_view(screen, supplier).await,
            None => Ok(ViewModel::NotFound {
                screen,
                message: "no supplier record is linked to this account".to_owned(),
            }),
        }
    }

    async fn supplier_view(&self, screen: Screen, supplier: Supplier) -> AppResult<ViewModel> {
        let quotations = self
            .documents
            .list_quotations(&QuotationQuery {
                request_id: None,
                supplier_id: Some(supplier.id.clone()),
            })
            .await?;

        Ok(ViewModel::Supplier {
            screen,
            supplier,
            quotations,
        })
    }
}

fn own_requests_only(viewer: Option<&Session>) -> Option<String> {
    viewer
        .filter(|session| session.role() == Role::Requester)
        .map(|session| session.principal().uid().to_owned())
}

fn not_found(screen: Screen, kind: &str, id: &str) -> ViewModel {
    ViewModel::NotFound {
        screen,
        message: format!("{kind} '{id}' was not found"),
    }
}
