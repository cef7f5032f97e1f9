//! Navigation controller: the single owner of navigation state.
//!
//! Views never write navigation fields directly; every change goes
//! through a named transition below. Transitions are synchronous and
//! total: an unpermitted target degrades to a no-op or to the role's
//! home screen, never to an unrenderable state.

mod commands;

use serde::Serialize;
use supplink_domain::{
    BackRule, CapabilityTable, NavigationState, RenderTarget, RequestFilter, Role, Screen,
    ScreenRegistry,
};
use tracing::{debug, warn};

use crate::{ViewScope, ViewToken};

pub use commands::NavigationCommand;

/// Why a transition left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The session role may not enter the target.
    Forbidden,
    /// Nobody is signed in and the target is not a public screen.
    SignedOut,
    /// A restore was requested while not on the flow's screen.
    OutsideFlow,
}

/// Result of a transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Transition {
    /// The current screen changed (or was re-entered).
    Moved {
        /// Screen left.
        from: Screen,
        /// Screen entered.
        to: Screen,
    },
    /// Nothing changed.
    Ignored {
        /// Requested target.
        target: Screen,
        /// Why the request was dropped.
        reason: IgnoreReason,
    },
}

impl Transition {
    /// Returns whether the state moved.
    #[must_use]
    pub fn moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// In-memory navigation state machine.
#[derive(Debug)]
pub struct NavigationController {
    registry: ScreenRegistry,
    capabilities: CapabilityTable,
    state: NavigationState,
    role: Option<Role>,
    scope: ViewScope,
}

impl NavigationController {
    /// Creates a signed-out controller on the sign-in screen.
    #[must_use]
    pub fn new(capabilities: CapabilityTable) -> Self {
        Self {
            registry: ScreenRegistry,
            capabilities,
            state: NavigationState::new(),
            role: None,
            scope: ViewScope::new(),
        }
    }

    /// Returns the navigation state.
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Returns the current screen.
    #[must_use]
    pub fn current(&self) -> Screen {
        self.state.current()
    }

    /// Returns the role of the signed-in session, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns the capability table in force.
    #[must_use]
    pub fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }

    /// Returns the screen registry.
    #[must_use]
    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    /// Resolves what the renderer should draw now.
    #[must_use]
    pub fn render_target(&self) -> RenderTarget {
        self.registry.resolve(&self.state)
    }

    /// Mints a cancellation token bound to the current view.
    #[must_use]
    pub fn view_token(&self) -> ViewToken {
        self.scope.token()
    }

    /// Replaces the state with the role's home screen.
    pub fn login(&mut self, role: Role) -> Transition {
        let from = self.state.current();
        let to = role.home_screen();
        self.role = Some(role);
        self.state = NavigationState::starting_at(to);
        self.scope.advance();
        debug!(role = %role, from = %from, to = %to, "navigation reset for session");
        Transition::Moved { from, to }
    }

    /// Replaces the state with the initial signed-out state.
    pub fn logout(&mut self) -> Transition {
        let from = self.state.current();
        self.role = None;
        self.state = NavigationState::new();
        self.scope.advance();
        debug!(from = %from, "navigation reset to sign-in");
        Transition::Moved {
            from,
            to: Screen::SignIn,
        }
    }

    /// Opens the requests list, applying `filter` when given.
    pub fn open_requests_list(&mut self, filter: Option<RequestFilter>) -> Transition {
        if let Some(filter) = filter {
            self.state.context_mut().request_filter = Some(filter);
        }
        self.go(Screen::RequestsList)
    }

    /// Opens the new-request form.
    pub fn open_new_request(&mut self) -> Transition {
        self.go(Screen::NewRequest)
    }

    /// Selects `request_id` and opens its detail.
    pub fn open_request_detail(&mut self, request_id: &str) -> Transition {
        self.select_request(request_id);
        self.go(Screen::RequestDetail)
    }

    /// Selects `request_id` and opens its payment tracking.
    pub fn open_payment_tracking(&mut self, request_id: &str) -> Transition {
        self.select_request(request_id);
        self.go(Screen::PaymentTracking)
    }

    /// Selects `request_id` and opens the quotation form.
    pub fn open_quotation_form(&mut self, request_id: &str) -> Transition {
        self.select_request(request_id);
        self.go(Screen::QuotationForm)
    }

    /// Opens a request for review, remembering the current screen.
    pub fn navigate_to_request_review(&mut self, request_id: &str) -> Transition {
        self.state.context_mut().review_request_id = Some(request_id.to_owned());
        self.go_remembering(Screen::RequestReview)
    }

    /// Leaves the review for the remembered screen.
    ///
    /// Ignored unless the review is the current screen; the same holds for
    /// the other `return_from_*` transitions.
    pub fn return_from_request_review(&mut self) -> Transition {
        self.restore(Screen::RequestReview)
    }

    /// Opens the supplier list. No-op unless the role is permitted.
    pub fn open_supplier_list(&mut self) -> Transition {
        self.go(Screen::SupplierList)
    }

    /// Opens a supplier's detail, remembering the current screen.
    pub fn navigate_to_supplier_detail(&mut self, supplier_id: &str) -> Transition {
        self.state.context_mut().selected_supplier_id = Some(supplier_id.to_owned());
        self.go_remembering(Screen::SupplierDetail)
    }

    /// Leaves the supplier detail for the remembered screen.
    pub fn return_from_supplier_detail(&mut self) -> Transition {
        self.restore(Screen::SupplierDetail)
    }

    /// Opens the supplier invite, optionally for a request.
    pub fn navigate_to_supplier_invite(&mut self, request_id: Option<&str>) -> Transition {
        if let Some(request_id) = request_id {
            self.select_request(request_id);
        }
        self.go_remembering(Screen::SupplierInvite)
    }

    /// Leaves the supplier invite for the remembered screen.
    pub fn return_from_supplier_invite(&mut self) -> Transition {
        self.restore(Screen::SupplierInvite)
    }

    /// Opens the PPE configuration, remembering the current screen.
    pub fn navigate_to_epi_configuration(&mut self) -> Transition {
        self.go_remembering(Screen::EpiConfiguration)
    }

    /// Leaves the PPE configuration for the remembered screen.
    pub fn return_from_epi_configuration(&mut self) -> Transition {
        self.restore(Screen::EpiConfiguration)
    }

    /// Opens the supplier questionnaire.
    pub fn open_supplier_questionnaire(&mut self) -> Transition {
        self.go(Screen::SupplierQuestionnaire)
    }

    /// Opens the supplier qualification progress.
    pub fn open_supplier_progress(&mut self) -> Transition {
        self.go(Screen::SupplierProgress)
    }

    /// Opens the signed-in supplier's quotations.
    pub fn open_supplier_quotations(&mut self) -> Transition {
        self.go(Screen::SupplierQuotations)
    }

    /// Opens the dashboard matching the session role.
    pub fn open_dashboard(&mut self) -> Transition {
        let dashboard = match self.role {
            Some(Role::Manager) => Screen::ManagerDashboard,
            _ => Screen::Dashboard,
        };
        self.go(dashboard)
    }

    /// Opens the profile editor.
    pub fn open_profile(&mut self) -> Transition {
        self.go(Screen::Profile)
    }

    /// Opens account creation.
    pub fn open_sign_up(&mut self) -> Transition {
        self.go(Screen::SignUp)
    }

    /// Opens password reset.
    pub fn open_forgot_password(&mut self) -> Transition {
        self.go(Screen::ForgotPassword)
    }

    /// Opens the terms of use.
    pub fn open_terms(&mut self) -> Transition {
        self.go(Screen::Terms)
    }

    /// Shows the awaiting-approval notice.
    pub fn show_pending_approval(&mut self) -> Transition {
        self.go(Screen::PendingApproval)
    }

    /// Generic back navigation driven by the registry's back rule.
    pub fn back(&mut self) -> Transition {
        let current = self.state.current();
        match self.registry.descriptor(current).back {
            BackRule::Parent(parent) => self.go_or_home(parent),
            BackRule::Restore { .. } => self.restore(current),
            BackRule::Home => {
                let home = self.home();
                self.go(home)
            }
        }
    }

    /// Drops the selected request id.
    pub fn clear_selected_request(&mut self) {
        self.state.context_mut().selected_request_id = None;
    }

    /// Drops the selected supplier id.
    pub fn clear_selected_supplier(&mut self) {
        self.state.context_mut().selected_supplier_id = None;
    }

    /// Drops the requests list filter.
    pub fn clear_request_filter(&mut self) {
        self.state.context_mut().request_filter = None;
    }

    /// Drops the review request id.
    pub fn clear_review_request(&mut self) {
        self.state.context_mut().review_request_id = None;
    }

    fn select_request(&mut self, request_id: &str) {
        self.state.context_mut().selected_request_id = Some(request_id.to_owned());
    }

    fn home(&self) -> Screen {
        self.role.map_or(Screen::SignIn, |role| role.home_screen())
    }

    fn admission(&self, target: Screen) -> Option<IgnoreReason> {
        match self.role {
            None if target.is_public() => None,
            None => Some(IgnoreReason::SignedOut),
            Some(role) if self.capabilities.permits(role, target) => None,
            Some(_) => Some(IgnoreReason::Forbidden),
        }
    }

    fn go(&mut self, target: Screen) -> Transition {
        if let Some(reason) = self.admission(target) {
            return self.go_ignored(target, reason);
        }

        let from = self.state.enter(target);
        let generation = self.scope.advance();
        debug!(from = %from, to = %target, generation, "navigation transition");
        Transition::Moved { from, to: target }
    }

    fn go_remembering(&mut self, target: Screen) -> Transition {
        if let Some(reason) = self.admission(target) {
            return self.go_ignored(target, reason);
        }

        let current = self.state.current();
        self.state.remember(current);
        self.go(target)
    }

    fn go_ignored(&self, target: Screen, reason: IgnoreReason) -> Transition {
        warn!(
            role = ?self.role,
            current = %self.state.current(),
            target = %target,
            reason = ?reason,
            "navigation transition ignored"
        );
        Transition::Ignored { target, reason }
    }

    fn go_or_home(&mut self, target: Screen) -> Transition {
        if self.admission(target).is_some() {
            let home = self.home();
            return self.go(home);
        }
        self.go(target)
    }

    fn restore(&mut self, flow: Screen) -> Transition {
        let fallback = match self.registry.descriptor(flow).back {
            BackRule::Restore { fallback } => fallback,
            BackRule::Parent(parent) => parent,
            BackRule::Home => self.home(),
        };
        if self.state.current() != flow {
            let target = self.state.previous().unwrap_or(fallback);
            return self.go_ignored(target, IgnoreReason::OutsideFlow);
        }

        let target = self.state.take_previous().unwrap_or(fallback);
        self.go_or_home(target)
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(CapabilityTable::default())
    }
}

#[cfg(test)]
mod tests;
