//! Domain types for supplier qualification and purchase-request navigation.

#![forbid(unsafe_code)]

mod account;
mod capability;
mod navigation;
mod records;
mod registry;
mod role;
mod screen;
mod session;

pub use account::{EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, validate_password};
pub use capability::CapabilityTable;
pub use navigation::{CarriedContext, ContextParam, NavigationState};
pub use records::{
    PaymentStatus, PurchaseRequest, QualificationStatus, Quotation, RequestFilter, RequestStatus,
    RequestSummary, Supplier,
};
pub use registry::{BackRule, RenderTarget, ScreenDescriptor, ScreenRegistry};
pub use role::Role;
pub use screen::Screen;
pub use session::{ApprovalPolicy, ApprovalStatus, Session, UserProfile};
