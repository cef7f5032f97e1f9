use std::str::FromStr;

use serde::{Deserialize, Serialize};
use supplink_core::AppError;

/// Full-page views in the navigation catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Screen {
    /// Email/password sign-in. Initial and fallback screen.
    SignIn,
    /// Account creation.
    SignUp,
    /// Password reset request.
    ForgotPassword,
    /// Terms of use.
    Terms,
    /// Shown after sign-up while the account awaits approval.
    PendingApproval,
    /// Profile editing for the signed-in user.
    Profile,
    /// Purchase requests, optionally filtered.
    RequestsList,
    /// New purchase request form.
    NewRequest,
    /// One purchase request with its quotations.
    RequestDetail,
    /// Manager/approver review of one request.
    RequestReview,
    /// Payment status for one request.
    PaymentTracking,
    /// Approver/admin dashboard.
    Dashboard,
    /// Manager dashboard.
    ManagerDashboard,
    /// Supplier landing screen.
    SupplierWelcome,
    /// Supplier onboarding questionnaire.
    SupplierQuestionnaire,
    /// Supplier onboarding progress.
    SupplierProgress,
    /// Quotations submitted by the signed-in supplier.
    SupplierQuotations,
    /// Quotation submission for one request.
    QuotationForm,
    /// Qualified and invited suppliers.
    SupplierList,
    /// One supplier with its quotations.
    SupplierDetail,
    /// Invite suppliers to quote.
    SupplierInvite,
    /// Personal protective equipment catalog configuration.
    EpiConfiguration,
}

impl Screen {
    /// Returns the stable identifier used by renderers and drivers.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignIn => "SignIn",
            Self::SignUp => "SignUp",
            Self::ForgotPassword => "ForgotPassword",
            Self::Terms => "Terms",
            Self::PendingApproval => "PendingApproval",
            Self::Profile => "Profile",
            Self::RequestsList => "RequestsList",
            Self::NewRequest => "NewRequest",
            Self::RequestDetail => "RequestDetail",
            Self::RequestReview => "RequestReview",
            Self::PaymentTracking => "PaymentTracking",
            Self::Dashboard => "Dashboard",
            Self::ManagerDashboard => "ManagerDashboard",
            Self::SupplierWelcome => "SupplierWelcome",
            Self::SupplierQuestionnaire => "SupplierQuestionnaire",
            Self::SupplierProgress => "SupplierProgress",
            Self::SupplierQuotations => "SupplierQuotations",
            Self::QuotationForm => "QuotationForm",
            Self::SupplierList => "SupplierList",
            Self::SupplierDetail => "SupplierDetail",
            Self::SupplierInvite => "SupplierInvite",
            Self::EpiConfiguration => "EpiConfiguration",
        }
    }

    /// Returns every screen in catalog order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Screen] = &[
            Screen::SignIn,
            Screen::SignUp,
            Screen::ForgotPassword,
            Screen::Terms,
            Screen::PendingApproval,
            Screen::Profile,
            Screen::RequestsList,
            Screen::NewRequest,
            Screen::RequestDetail,
            Screen::RequestReview,
            Screen::PaymentTracking,
            Screen::Dashboard,
            Screen::ManagerDashboard,
            Screen::SupplierWelcome,
            Screen::SupplierQuestionnaire,
            Screen::SupplierProgress,
            Screen::SupplierQuotations,
            Screen::QuotationForm,
            Screen::SupplierList,
            Screen::SupplierDetail,
            Screen::SupplierInvite,
            Screen::EpiConfiguration,
        ];

        ALL
    }

    /// Returns whether the screen is reachable without a session.
    #[must_use]
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Self::SignIn | Self::SignUp | Self::ForgotPassword | Self::Terms | Self::PendingApproval
        )
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|screen| screen.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown screen identifier '{value}'")))
    }
}
