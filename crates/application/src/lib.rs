//! Application services and ports.

#![forbid(unsafe_code)]

mod client_runtime;
mod document_ports;
mod identity_ports;
mod navigation_controller;
mod session_store;
mod view_scope;
mod view_service;

pub use client_runtime::{ClientRuntime, PendingView};
pub use document_ports::{DocumentStore, QuotationQuery, RequestQuery};
pub use identity_ports::{IdentityProvider, ProfileStore, ProfileUpdate};
pub use navigation_controller::{IgnoreReason, NavigationCommand, NavigationController, Transition};
pub use session_store::{SessionChange, SessionState, SessionStore, SignUpParams};
pub use view_scope::{ViewScope, ViewToken};
pub use view_service::{DASHBOARD_RECENT_LIMIT, ViewModel, ViewOutcome, ViewService};
