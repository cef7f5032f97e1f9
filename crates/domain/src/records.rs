//! Business records read by the views.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use supplink_core::AppError;

/// Lifecycle of a purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted, awaiting review.
    Pending,
    /// Approved by a manager or approver.
    Approved,
    /// Rejected during review.
    Rejected,
    /// Approved and open for supplier quotations.
    Quoting,
}

/// Payment progress of an approved request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing paid yet.
    #[default]
    Unpaid,
    /// Payment scheduled.
    Scheduled,
    /// Paid in full.
    Paid,
}

/// Purchase request filed by a requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Record id.
    pub id: String,
    /// Short description of what is being purchased.
    pub title: String,
    /// Uid of the filing requester.
    pub requester_uid: String,
    /// Review status.
    pub status: RequestStatus,
    /// Payment status.
    #[serde(default)]
    pub payment: PaymentStatus,
    /// Filing time.
    pub created_at: DateTime<Utc>,
}

/// Filter applied to the requests list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestFilter {
    /// Every request.
    #[default]
    All,
    /// Awaiting review.
    Pending,
    /// Approved, including those open for quotes.
    Approved,
    /// Rejected.
    Rejected,
    /// Approved but not yet paid.
    AwaitingPayment,
}

impl RequestFilter {
    /// Returns a stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::AwaitingPayment => "awaiting_payment",
        }
    }

    /// Returns whether `request` passes the filter.
    #[must_use]
    pub fn matches(&self, request: &PurchaseRequest) -> bool {
        let approved = matches!(
            request.status,
            RequestStatus::Approved | RequestStatus::Quoting
        );

        match self {
            Self::All => true,
            Self::Pending => request.status == RequestStatus::Pending,
            Self::Approved => approved,
            Self::Rejected => request.status == RequestStatus::Rejected,
            Self::AwaitingPayment => approved && request.payment != PaymentStatus::Paid,
        }
    }
}

impl FromStr for RequestFilter {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "awaiting_payment" => Ok(Self::AwaitingPayment),
            _ => Err(AppError::Validation(format!(
                "unknown request filter '{value}'"
            ))),
        }
    }
}

/// Supplier quotation for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    /// Record id.
    pub id: String,
    /// Quoted request.
    pub request_id: String,
    /// Quoting supplier.
    pub supplier_id: String,
    /// Quoted total in minor currency units.
    pub amount_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
}

/// Qualification progress of a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationStatus {
    /// Invited, questionnaire not started.
    Invited,
    /// Questionnaire in progress.
    InProgress,
    /// Qualified to quote.
    Qualified,
    /// Rejected.
    Rejected,
}

/// Supplier company record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Record id.
    pub id: String,
    /// Company name.
    pub company_name: String,
    /// Contact email.
    pub contact_email: String,
    /// Uid of the supplier account, once the invite is accepted.
    #[serde(default)]
    pub owner_uid: Option<String>,
    /// Qualification progress.
    pub qualification: QualificationStatus,
}

/// Request counts shown on the dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestSummary {
    /// Total requests considered.
    pub total: usize,
    /// Awaiting review.
    pub pending: usize,
    /// Approved or quoting.
    pub approved: usize,
    /// Rejected.
    pub rejected: usize,
    /// Approved and unpaid.
    pub awaiting_payment: usize,
}

impl RequestSummary {
    /// Tallies `requests`.
    #[must_use]
    pub fn tally<'a>(requests: impl IntoIterator<Item = &'a PurchaseRequest>) -> Self {
        requests
            .into_iter()
            .fold(Self::default(), |mut summary, request| {
                summary.total += 1;
                if RequestFilter::Pending.matches(request) {
                    summary.pending += 1;
                }
                if RequestFilter::Approved.matches(request) {
                    summary.approved += 1;
                }
                if RequestFilter::Rejected.matches(request) {
                    summary.rejected += 1;
                }
                if RequestFilter::AwaitingPayment.matches(request) {
                    summary.awaiting_payment += 1;
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{PaymentStatus, PurchaseRequest, RequestFilter, RequestStatus, RequestSummary};

    fn request(id: &str, status: RequestStatus, payment: PaymentStatus) -> PurchaseRequest {
        PurchaseRequest {
            id: id.to_owned(),
            title: "Safety gloves".to_owned(),
            requester_uid: "u-req".to_owned(),
            status,
            payment,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn quoting_counts_as_approved() {
        let quoting = request("req-1", RequestStatus::Quoting, PaymentStatus::Unpaid);
        assert!(RequestFilter::Approved.matches(&quoting));
        assert!(RequestFilter::AwaitingPayment.matches(&quoting));
        assert!(!RequestFilter::Pending.matches(&quoting));
    }

    #[test]
    fn paid_requests_are_not_awaiting_payment() {
        let paid = request("req-2", RequestStatus::Approved, PaymentStatus::Paid);
        assert!(!RequestFilter::AwaitingPayment.matches(&paid));
    }

    #[test]
    fn summary_tallies_each_bucket() {
        let requests = [
            request("req-1", RequestStatus::Pending, PaymentStatus::Unpaid),
            request("req-2", RequestStatus::Approved, PaymentStatus::Paid),
            request("req-3", RequestStatus::Quoting, PaymentStatus::Scheduled),
            request("req-4", RequestStatus::Rejected, PaymentStatus::Unpaid),
        ];

        let summary = RequestSummary::tally(&requests);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.approved, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.awaiting_payment, 1);
    }
}
