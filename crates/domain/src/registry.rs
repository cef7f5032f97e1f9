//! Static screen catalog: titles, consumed context, and back rules.

use std::str::FromStr;

use serde::Serialize;

use crate::{CarriedContext, ContextParam, NavigationState, Screen};

/// How a generic back navigation leaves a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "screen", rename_all = "snake_case")]
pub enum BackRule {
    /// Go to a statically known parent.
    Parent(Screen),
    /// Consume the back pointer, or go to `fallback` when it is empty.
    Restore {
        /// Destination when nothing was saved.
        fallback: Screen,
    },
    /// Go to the session's home screen, or sign-in when signed out.
    Home,
}

/// Catalog entry for one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenDescriptor {
    /// Screen identifier.
    pub screen: Screen,
    /// Header title.
    pub title: &'static str,
    /// Context the view cannot render meaningfully without.
    pub requires: &'static [ContextParam],
    /// Context the view reads when present.
    pub accepts: &'static [ContextParam],
    /// Generic back behavior.
    pub back: BackRule,
}

/// What the renderer should draw for a navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderTarget {
    /// Screen to render.
    pub screen: Screen,
    /// Carried context projected onto what the screen accepts.
    pub params: CarriedContext,
    /// Required params that are absent; the view renders an empty state.
    pub missing: Vec<ContextParam>,
}

impl RenderTarget {
    /// Returns whether every required param is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Fixed catalog mapping each screen to its descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenRegistry;

const NONE: &[ContextParam] = &[];
const REQUEST: &[ContextParam] = &[ContextParam::SelectedRequest];
const SUPPLIER: &[ContextParam] = &[ContextParam::SelectedSupplier];
const REVIEW: &[ContextParam] = &[ContextParam::ReviewRequest];
const FILTER: &[ContextParam] = &[ContextParam::RequestFilter];

impl ScreenRegistry {
    /// Returns the descriptor for `screen`. Total over the catalog.
    #[must_use]
    pub fn descriptor(&self, screen: Screen) -> ScreenDescriptor {
        let (title, requires, accepts, back) = match screen {
            Screen::SignIn => ("Sign in", NONE, NONE, BackRule::Home),
            Screen::SignUp => ("Create account", NONE, NONE, BackRule::Parent(Screen::SignIn)),
            Screen::ForgotPassword => (
                "Reset password",
                NONE,
                NONE,
                BackRule::Parent(Screen::SignIn),
            ),
            Screen::Terms => ("Terms of use", NONE, NONE, BackRule::Parent(Screen::SignUp)),
            Screen::PendingApproval => (
                "Awaiting approval",
                NONE,
                NONE,
                BackRule::Parent(Screen::SignIn),
            ),
            Screen::Profile => ("Profile", NONE, NONE, BackRule::Home),
            Screen::RequestsList => ("Purchase requests", NONE, FILTER, BackRule::Home),
            Screen::NewRequest => (
                "New request",
                NONE,
                NONE,
                BackRule::Parent(Screen::RequestsList),
            ),
            Screen::RequestDetail => (
                "Request",
                REQUEST,
                REQUEST,
                BackRule::Parent(Screen::RequestsList),
            ),
            Screen::RequestReview => (
                "Review request",
                REVIEW,
                REVIEW,
                BackRule::Restore {
                    fallback: Screen::ManagerDashboard,
                },
            ),
            Screen::PaymentTracking => (
                "Payment",
                REQUEST,
                REQUEST,
                BackRule::Parent(Screen::RequestDetail),
            ),
            Screen::Dashboard => ("Dashboard", NONE, NONE, BackRule::Home),
            Screen::ManagerDashboard => ("Manager dashboard", NONE, NONE, BackRule::Home),
            Screen::SupplierWelcome => ("Welcome", NONE, NONE, BackRule::Home),
            Screen::SupplierQuestionnaire => (
                "Qualification questionnaire",
                NONE,
                NONE,
                BackRule::Parent(Screen::SupplierWelcome),
            ),
            Screen::SupplierProgress => (
                "Qualification progress",
                NONE,
                NONE,
                BackRule::Parent(Screen::SupplierWelcome),
            ),
            Screen::SupplierQuotations => (
                "My quotations",
                NONE,
                NONE,
                BackRule::Parent(Screen::SupplierWelcome),
            ),
            Screen::QuotationForm => (
                "Submit quotation",
                REQUEST,
                REQUEST,
                BackRule::Parent(Screen::SupplierQuotations),
            ),
            Screen::SupplierList => (
                "Suppliers",
                NONE,
                NONE,
                BackRule::Parent(Screen::ManagerDashboard),
            ),
            Screen::SupplierDetail => (
                "Supplier",
                SUPPLIER,
                SUPPLIER,
                BackRule::Restore {
                    fallback: Screen::SupplierList,
                },
            ),
            Screen::SupplierInvite => (
                "Invite suppliers",
                NONE,
                REQUEST,
                BackRule::Restore {
                    fallback: Screen::SupplierList,
                },
            ),
            Screen::EpiConfiguration => (
                "PPE configuration",
                NONE,
                NONE,
                BackRule::Restore {
                    fallback: Screen::ManagerDashboard,
                },
            ),
        };

        ScreenDescriptor {
            screen,
            title,
            requires,
            accepts,
            back,
        }
    }

    /// Returns every descriptor in catalog order.
    pub fn catalog(&self) -> impl Iterator<Item = ScreenDescriptor> + '_ {
        Screen::all()
            .iter()
            .map(|screen| self.descriptor(*screen))
    }

    /// Maps a raw identifier to a screen, falling back to sign-in.
    #[must_use]
    pub fn resolve_identifier(&self, identifier: &str) -> Screen {
        Screen::from_str(identifier.trim()).unwrap_or(Screen::SignIn)
    }

    /// Resolves what to render for `state`.
    #[must_use]
    pub fn resolve(&self, state: &NavigationState) -> RenderTarget {
        let descriptor = self.descriptor(state.current());
        let missing = descriptor
            .requires
            .iter()
            .copied()
            .filter(|param| !state.context().has(*param))
            .collect();

        RenderTarget {
            screen: descriptor.screen,
            params: state.context().project(descriptor.accepts),
            missing,
        }
    }
}
