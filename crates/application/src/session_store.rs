//! Session store driven by identity provider notifications.
//!
//! An account whose profile carries `approved = false` is never left
//! signed in: it is signed out at the provider and the store keeps a
//! notice explaining why.

use std::sync::Arc;

use serde::Serialize;
use supplink_core::{AppError, AppResult, Principal};
use supplink_domain::{
    ApprovalPolicy, EmailAddress, Role, Session, UserProfile, validate_password,
};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{IdentityProvider, ProfileStore, ProfileUpdate};

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    /// Nobody is signed in. `notice` explains the last failure, if any.
    SignedOut {
        /// User-facing message.
        notice: Option<String>,
    },
    /// An admitted account is signed in.
    SignedIn {
        /// The open session.
        session: Session,
    },
}

/// What a call did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// A session was opened.
    Established(Session),
    /// The session was closed normally.
    Cleared,
    /// Sign-in was refused or failed; the account was signed out.
    Rejected(String),
    /// Nothing changed.
    Unchanged,
}

/// Input for account creation.
#[derive(Debug, Clone)]
pub struct SignUpParams {
    /// Sign-in email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Requested role.
    pub role: Role,
}

/// Holds the authenticated session and applies provider notifications.
pub struct SessionStore {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    policy: ApprovalPolicy,
    state: SessionState,
}

impl SessionStore {
    /// Creates a signed-out store.
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        policy: ApprovalPolicy,
    ) -> Self {
        Self {
            identity,
            profiles,
            policy,
            state: SessionState::SignedOut { notice: None },
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the open session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::SignedIn { session } => Some(session),
            SessionState::SignedOut { .. } => None,
        }
    }

    /// Returns the pending user-facing notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        match &self.state {
            SessionState::SignedOut { notice } => notice.as_deref(),
            SessionState::SignedIn { .. } => None,
        }
    }

    /// Returns the approval policy in force.
    #[must_use]
    pub fn policy(&self) -> ApprovalPolicy {
        self.policy
    }

    /// Subscribes to provider principal changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.identity.subscribe()
    }

    /// Applies one provider notification.
    ///
    /// The profile is fetched on every signed-in notification, so a repeat
    /// for the current uid still picks up a revoked approval.
    pub async fn handle_auth_change(&mut self, principal: Option<Principal>) -> SessionChange {
        let Some(principal) = principal else {
            return match &self.state {
                SessionState::SignedIn { session } => {
                    info!(uid = %session.principal().uid(), "session cleared");
                    self.state = SessionState::SignedOut { notice: None };
                    SessionChange::Cleared
                }
                SessionState::SignedOut { .. } => SessionChange::Unchanged,
            };
        };

        match self.profiles.fetch_profile(principal.uid()).await {
            Ok(Some(profile)) => self.open_session(principal, &profile).await,
            Ok(None) => {
                warn!(uid = %principal.uid(), "authenticated principal has no profile");
                self.force_sign_out("no profile was found for this account".to_owned())
                    .await
            }
            Err(error) => {
                warn!(uid = %principal.uid(), error = %error, "failed to fetch profile");
                self.force_sign_out(format!(
                    "could not load your profile: {}",
                    error.user_message()
                ))
                .await
            }
        }
    }

    /// Signs in with email and password.
    ///
    /// Provider errors are returned. When nobody is signed in they are also
    /// kept as the notice; an open session stays open.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> AppResult<SessionChange> {
        self.clear_notice();

        match self.identity.sign_in(email.trim(), password).await {
            Ok(principal) => Ok(self.handle_auth_change(Some(principal)).await),
            Err(error) => {
                info!(error = %error, "sign-in refused by identity provider");
                if let SessionState::SignedOut { notice } = &mut self.state {
                    *notice = Some(error.user_message().to_owned());
                }
                Err(error)
            }
        }
    }

    /// Creates an account whose profile awaits approval, then applies the
    /// resulting sign-in.
    pub async fn sign_up(&mut self, params: SignUpParams) -> AppResult<SessionChange> {
        self.clear_notice();

        let email = EmailAddress::new(params.email.as_str())?;
        validate_password(params.password.as_str())?;
        if params.first_name.trim().is_empty() {
            return Err(AppError::Validation("first name is required".to_owned()));
        }

        let principal = self
            .identity
            .sign_up(email.as_str(), params.password.as_str())
            .await?;

        let profile = UserProfile {
            uid: principal.uid().to_owned(),
            email: email.as_str().to_owned(),
            first_name: params.first_name.trim().to_owned(),
            last_name: params.last_name.trim().to_owned(),
            role: params.role,
            approved: Some(false),
        };

        if let Err(error) = self.profiles.create_profile(profile).await {
            warn!(uid = %principal.uid(), error = %error, "failed to create profile");
            return Ok(self
                .force_sign_out(format!(
                    "could not create your profile: {}",
                    error.user_message()
                ))
                .await);
        }

        info!(uid = %principal.uid(), role = %params.role, "account created");
        Ok(self.handle_auth_change(Some(principal)).await)
    }

    /// Signs out at the provider and clears the session.
    pub async fn sign_out(&mut self) -> AppResult<SessionChange> {
        self.identity.sign_out().await?;
        Ok(self.handle_auth_change(None).await)
    }

    /// Updates the signed-in user's profile and refreshes the session.
    ///
    /// A refreshed profile that is no longer admitted forces a sign-out.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> AppResult<UserProfile> {
        let Some(session) = self.session() else {
            return Err(AppError::Unauthorized(
                "sign in to update your profile".to_owned(),
            ));
        };
        if update.is_empty() {
            return Err(AppError::Validation("nothing to update".to_owned()));
        }

        let principal = session.principal().clone();
        let profile = self
            .profiles
            .update_profile(principal.uid(), update)
            .await?;

        match Session::open(principal, &profile, self.policy) {
            Ok(session) => {
                self.state = SessionState::SignedIn { session };
                Ok(profile)
            }
            Err(error) => {
                warn!(uid = %profile.uid, approved = ?profile.approved, "account no longer admitted");
                self.force_sign_out(error.user_message().to_owned()).await;
                Err(error)
            }
        }
    }

    async fn open_session(&mut self, principal: Principal, profile: &UserProfile) -> SessionChange {
        match Session::open(principal, profile, self.policy) {
            Ok(session) if self.session() == Some(&session) => SessionChange::Unchanged,
            Ok(session) => {
                info!(
                    uid = %session.principal().uid(),
                    role = %session.role(),
                    approval = ?session.approval(),
                    "session established"
                );
                self.state = SessionState::SignedIn {
                    session: session.clone(),
                };
                SessionChange::Established(session)
            }
            Err(error) => {
                warn!(uid = %profile.uid, approved = ?profile.approved, "account not admitted");
                self.force_sign_out(error.user_message().to_owned()).await
            }
        }
    }

    async fn force_sign_out(&mut self, notice: String) -> SessionChange {
        self.state = SessionState::SignedOut {
            notice: Some(notice.clone()),
        };

        if let Err(error) = self.identity.sign_out().await {
            warn!(error = %error, "forced sign-out failed at identity provider");
        }

        SessionChange::Rejected(notice)
    }

    fn clear_notice(&mut self) {
        if let SessionState::SignedOut { notice } = &mut self.state {
            *notice = None;
        }
    }
}
