//! Navigation state and the context carried between screens.

use serde::{Deserialize, Serialize};

use crate::{RequestFilter, Screen};

/// Piece of carried context a screen may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextParam {
    /// `CarriedContext::selected_request_id`.
    SelectedRequest,
    /// `CarriedContext::selected_supplier_id`.
    SelectedSupplier,
    /// `CarriedContext::request_filter`.
    RequestFilter,
    /// `CarriedContext::review_request_id`.
    ReviewRequest,
}

impl ContextParam {
    /// Returns a stable name for logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelectedRequest => "selected_request_id",
            Self::SelectedSupplier => "selected_supplier_id",
            Self::RequestFilter => "request_filter",
            Self::ReviewRequest => "review_request_id",
        }
    }
}

/// Small pieces of state handed from one transition to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarriedContext {
    /// Request chosen on a list or dashboard.
    pub selected_request_id: Option<String>,
    /// Supplier chosen on the supplier list.
    pub selected_supplier_id: Option<String>,
    /// Filter applied to the requests list.
    pub request_filter: Option<RequestFilter>,
    /// Request under review.
    pub review_request_id: Option<String>,
}

impl CarriedContext {
    /// Returns whether a usable value is carried for `param`.
    ///
    /// Blank ids count as absent.
    #[must_use]
    pub fn has(&self, param: ContextParam) -> bool {
        match param {
            ContextParam::SelectedRequest => usable(self.selected_request_id.as_deref()),
            ContextParam::SelectedSupplier => usable(self.selected_supplier_id.as_deref()),
            ContextParam::RequestFilter => self.request_filter.is_some(),
            ContextParam::ReviewRequest => usable(self.review_request_id.as_deref()),
        }
    }

    /// Returns a copy holding only the listed params.
    #[must_use]
    pub fn project(&self, params: &[ContextParam]) -> Self {
        let mut projected = Self::default();
        for param in params {
            match param {
                ContextParam::SelectedRequest => {
                    projected.selected_request_id = self.selected_request_id.clone();
                }
                ContextParam::SelectedSupplier => {
                    projected.selected_supplier_id = self.selected_supplier_id.clone();
                }
                ContextParam::RequestFilter => projected.request_filter = self.request_filter,
                ContextParam::ReviewRequest => {
                    projected.review_request_id = self.review_request_id.clone();
                }
            }
        }

        projected
    }
}

fn usable(value: Option<&str>) -> bool {
    value.is_some_and(|id| !id.trim().is_empty())
}

/// Current screen, one-slot back pointer, and carried context.
///
/// `previous` is a single slot: only one hop of history is representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    current: Screen,
    previous: Option<Screen>,
    context: CarriedContext,
}

impl NavigationState {
    /// Creates the initial signed-out state.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Screen::SignIn)
    }

    /// Creates a fresh state positioned on `screen` with no history.
    #[must_use]
    pub fn starting_at(screen: Screen) -> Self {
        Self {
            current: screen,
            previous: None,
            context: CarriedContext::default(),
        }
    }

    /// Returns the screen being rendered.
    #[must_use]
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Returns the saved back pointer.
    #[must_use]
    pub fn previous(&self) -> Option<Screen> {
        self.previous
    }

    /// Returns the carried context.
    #[must_use]
    pub fn context(&self) -> &CarriedContext {
        &self.context
    }

    /// Moves to `screen`, returning the screen left behind.
    pub fn enter(&mut self, screen: Screen) -> Screen {
        std::mem::replace(&mut self.current, screen)
    }

    /// Stores `screen` in the back pointer, overwriting any prior value.
    pub fn remember(&mut self, screen: Screen) {
        self.previous = Some(screen);
    }

    /// Empties the back pointer and returns what it held.
    pub fn take_previous(&mut self) -> Option<Screen> {
        self.previous.take()
    }

    /// Returns the carried context for mutation.
    pub fn context_mut(&mut self) -> &mut CarriedContext {
        &mut self.context
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{CarriedContext, ContextParam, NavigationState};
    use crate::{RequestFilter, Screen};

    #[test]
    fn initial_state_is_sign_in_without_history() {
        let state = NavigationState::new();
        assert_eq!(state.current(), Screen::SignIn);
        assert_eq!(state.previous(), None);
        assert_eq!(state.context(), &CarriedContext::default());
    }

    #[test]
    fn back_pointer_holds_a_single_screen() {
        let mut state = NavigationState::new();
        state.remember(Screen::Dashboard);
        state.remember(Screen::SupplierList);

        assert_eq!(state.take_previous(), Some(Screen::SupplierList));
        assert_eq!(state.take_previous(), None);
    }

    #[test]
    fn blank_ids_are_not_usable() {
        let context = CarriedContext {
            selected_request_id: Some("  ".to_owned()),
            review_request_id: Some("req-1".to_owned()),
            ..CarriedContext::default()
        };

        assert!(!context.has(ContextParam::SelectedRequest));
        assert!(context.has(ContextParam::ReviewRequest));
    }

    #[test]
    fn project_keeps_only_listed_params() {
        let context = CarriedContext {
            selected_request_id: Some("req-1".to_owned()),
            selected_supplier_id: Some("sup-1".to_owned()),
            request_filter: Some(RequestFilter::Pending),
            review_request_id: Some("req-2".to_owned()),
        };

        let projected = context.project(&[ContextParam::SelectedSupplier]);
        assert_eq!(projected.selected_supplier_id.as_deref(), Some("sup-1"));
        assert_eq!(projected.selected_request_id, None);
        assert_eq!(projected.request_filter, None);
    }
}
