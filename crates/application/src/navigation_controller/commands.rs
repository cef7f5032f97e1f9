use serde::{Deserialize, Serialize};
use supplink_domain::RequestFilter;

use super::{NavigationController, Transition};

/// Navigation transitions expressed as data, for drivers and scripted tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum NavigationCommand {
    /// `open_requests_list`.
    RequestsList {
        /// Optional filter to apply.
        #[serde(default)]
        filter: Option<RequestFilter>,
    },
    /// `open_new_request`.
    NewRequest,
    /// `open_request_detail`.
    RequestDetail {
        /// Request to show.
        request_id: String,
    },
    /// `open_payment_tracking`.
    PaymentTracking {
        /// Request to show.
        request_id: String,
    },
    /// `open_quotation_form`.
    QuotationForm {
        /// Request to quote.
        request_id: String,
    },
    /// `navigate_to_request_review`.
    RequestReview {
        /// Request to review.
        request_id: String,
    },
    /// `open_supplier_list`.
    SupplierList,
    /// `navigate_to_supplier_detail`.
    SupplierDetail {
        /// Supplier to show.
        supplier_id: String,
    },
    /// `navigate_to_supplier_invite`.
    SupplierInvite {
        /// Request suppliers are invited to quote on.
        #[serde(default)]
        request_id: Option<String>,
    },
    /// `navigate_to_epi_configuration`.
    EpiConfiguration,
    /// `open_supplier_questionnaire`.
    SupplierQuestionnaire,
    /// `open_supplier_progress`.
    SupplierProgress,
    /// `open_supplier_quotations`.
    SupplierQuotations,
    /// `open_dashboard`.
    Dashboard,
    /// `open_profile`.
    Profile,
    /// `open_sign_up`.
    SignUp,
    /// `open_forgot_password`.
    ForgotPassword,
    /// `open_terms`.
    Terms,
    /// `back`.
    Back,
    /// `clear_selected_request`, `clear_selected_supplier`,
    /// `clear_request_filter`, and `clear_review_request` together.
    ClearContext,
}

impl NavigationController {
    /// Applies a command through the matching named transition.
    ///
    /// `ClearContext` never moves and reports a re-entry of the current screen.
    pub fn dispatch(&mut self, command: &NavigationCommand) -> Transition {
        match command {
            NavigationCommand::RequestsList { filter } => self.open_requests_list(*filter),
            NavigationCommand::NewRequest => self.open_new_request(),
            NavigationCommand::RequestDetail { request_id } => self.open_request_detail(request_id),
            NavigationCommand::PaymentTracking { request_id } => {
                self.open_payment_tracking(request_id)
            }
            NavigationCommand::QuotationForm { request_id } => self.open_quotation_form(request_id),
            NavigationCommand::RequestReview { request_id } => {
                self.navigate_to_request_review(request_id)
            }
            NavigationCommand::SupplierList => self.open_supplier_list(),
            NavigationCommand::SupplierDetail { supplier_id } => {
                self.navigate_to_supplier_detail(supplier_id)
            }
            NavigationCommand::SupplierInvite { request_id } => {
                self.navigate_to_supplier_invite(request_id.as_deref())
            }
            NavigationCommand::EpiConfiguration => self.navigate_to_epi_configuration(),
            NavigationCommand::SupplierQuestionnaire => self.open_supplier_questionnaire(),
            NavigationCommand::SupplierProgress => self.open_supplier_progress(),
            NavigationCommand::SupplierQuotations => self.open_supplier_quotations(),
            NavigationCommand::Dashboard => self.open_dashboard(),
            NavigationCommand::Profile => self.open_profile(),
            NavigationCommand::SignUp => self.open_sign_up(),
            NavigationCommand::ForgotPassword => self.open_forgot_password(),
            NavigationCommand::Terms => self.open_terms(),
            NavigationCommand::Back => self.back(),
            NavigationCommand::ClearContext => {
                self.clear_selected_request();
                self.clear_selected_supplier();
                self.clear_request_filter();
                self.clear_review_request();
                let current = self.current();
                Transition::Moved {
                    from: current,
                    to: current,
                }
            }
        }
    }
}
