//! Composition of session store, navigation controller, and view loading.
//!
//! The runtime owns the controller outright; callers mutate navigation
//! through `navigation_mut()` and its named transitions, and the session
//! store's changes are mapped to `login`/`logout` here.

use supplink_core::{AppError, AppResult, Principal};
use supplink_domain::{RenderTarget, Screen, Session, UserProfile};
use tokio::sync::watch;
use tracing::warn;

use crate::{
    NavigationController, ProfileUpdate, SessionChange, SessionState, SessionStore, SignUpParams,
    ViewModel, ViewOutcome, ViewService, ViewToken,
};

/// Client-side application runtime.
pub struct ClientRuntime {
    sessions: SessionStore,
    navigation: NavigationController,
    views: ViewService,
}

impl ClientRuntime {
    /// Creates a runtime positioned on the sign-in screen.
    #[must_use]
    pub fn new(
        sessions: SessionStore,
        navigation: NavigationController,
        views: ViewService,
    ) -> Self {
        Self {
            sessions,
            navigation,
            views,
        }
    }

    /// Returns the navigation controller.
    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Returns the navigation controller for transitions.
    pub fn navigation_mut(&mut self) -> &mut NavigationController {
        &mut self.navigation
    }

    /// Returns the session state.
    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        self.sessions.state()
    }

    /// Returns the open session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.sessions.session()
    }

    /// Subscribes to identity provider notifications.
    #[must_use]
    pub fn subscribe_auth(&self) -> watch::Receiver<Option<Principal>> {
        self.sessions.subscribe()
    }

    /// Signs in and routes to the role's home screen.
    ///
    /// A refused account leaves the runtime on sign-in and returns the notice
    /// as `Forbidden`. A provider error is returned as is and leaves any
    /// open session in place.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> AppResult<Screen> {
        let change = self.sessions.sign_in(email, password).await?;
        self.apply(&change);

        match change {
            SessionChange::Rejected(notice) => Err(AppError::Forbidden(notice)),
            _ => Ok(self.navigation.current()),
        }
    }

    /// Creates an account and shows the awaiting-approval screen.
    pub async fn sign_up(&mut self, params: SignUpParams) -> AppResult<Screen> {
        let change = self.sessions.sign_up(params).await?;
        self.apply(&change);

        if matches!(change, SessionChange::Rejected(_)) {
            self.navigation.show_pending_approval();
        }

        Ok(self.navigation.current())
    }

    /// Signs out and returns to sign-in.
    pub async fn sign_out(&mut self) -> AppResult<()> {
        let change = self.sessions.sign_out().await?;
        self.apply(&change);
        Ok(())
    }

    /// Applies an identity provider notification.
    pub async fn apply_auth_change(&mut self, principal: Option<Principal>) -> SessionChange {
        let change = self.sessions.handle_auth_change(principal).await;
        self.apply(&change);
        change
    }

    /// Updates the signed-in user's profile.
    ///
    /// Navigation is logged out if the store forced the session closed.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> AppResult<UserProfile> {
        let result = self.sessions.update_profile(update).await;
        if self.sessions.session().is_none() && self.navigation.role().is_some() {
            warn!("session closed during profile update");
            self.navigation.logout();
        }
        result
    }

    /// Captures everything needed to load the current view.
    ///
    /// The returned request owns its inputs, so it can be awaited after
    /// further transitions; it then resolves to `None`.
    #[must_use]
    pub fn prepare_view(&self) -> PendingView {
        PendingView {
            target: self.navigation.render_target(),
            viewer: self.sessions.session().cloned(),
            token: self.navigation.view_token(),
            views: self.views.clone(),
        }
    }

    /// Loads the current view. `None` when it was torn down meanwhile.
    pub async fn refresh_view(&self) -> Option<ViewModel> {
        self.prepare_view().resolve().await
    }

    fn apply(&mut self, change: &SessionChange) {
        match change {
            SessionChange::Established(session) => {
                self.navigation.login(session.role());
            }
            SessionChange::Cleared => {
                if self.navigation.role().is_some() {
                    self.navigation.logout();
                }
            }
            SessionChange::Rejected(_) => {
                self.navigation.logout();
            }
            SessionChange::Unchanged => {}
        }
    }
}

/// A view load detached from the runtime borrow.
pub struct PendingView {
    target: RenderTarget,
    viewer: Option<Session>,
    token: ViewToken,
    views: ViewService,
}

impl PendingView {
    /// Returns the target being loaded.
    #[must_use]
    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Runs the load. Failures become `ViewModel::Failed`; stale loads `None`.
    pub async fn resolve(self) -> Option<ViewModel> {
        let screen = self.target.screen;
        match self
            .views
            .load(&self.target, self.viewer.as_ref(), &self.token)
            .await
        {
            Ok(ViewOutcome::Ready(model)) => Some(model),
            Ok(ViewOutcome::Stale) => {
                warn!(screen = %screen, "dropping stale view completion");
                None
            }
            Err(error) => {
                if self.token.is_stale() {
                    return None;
                }
                warn!(screen = %screen, error = %error, "view fetch failed");
                Some(ViewModel::Failed {
                    screen,
                    message: error.user_message().to_owned(),
                })
            }
        }
    }
}
