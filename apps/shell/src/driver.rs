//! Executes parsed commands against the client runtime.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use supplink_application::{
    ClientRuntime, NavigationController, SessionChange, SessionStore, SignUpParams, ViewService,
};
use supplink_core::{AppError, AppResult, Principal, ResultEnvelope};
use supplink_infrastructure::{InMemoryDocumentStore, InMemoryIdentityProvider, InMemoryProfileStore};
use tokio::sync::watch;
use tracing::info;

use crate::command::{HELP, ShellCommand};
use crate::config::ShellConfig;
use crate::seed::SeedDocument;

pub enum Step {
    Reply(ResultEnvelope<Value>),
    Quit,
}

pub struct Shell {
    runtime: ClientRuntime,
}

impl Shell {
    /// Wires the in-memory adapters, loads `seed`, and starts on sign-in.
    pub async fn bootstrap(config: &ShellConfig, seed: SeedDocument) -> AppResult<Self> {
        let identity = Arc::new(InMemoryIdentityProvider::new());
        let profiles = Arc::new(InMemoryProfileStore::new());
        let documents = Arc::new(InMemoryDocumentStore::new());

        let counts = seed.apply(&identity, &profiles, &documents).await?;
        info!(
            accounts = counts.accounts,
            requests = counts.requests,
            quotations = counts.quotations,
            suppliers = counts.suppliers,
            "seed loaded"
        );

        let sessions = SessionStore::new(identity, profiles, config.approval_policy);
        let views = ViewService::new(documents, config.fetch_timeout);

        Ok(Self {
            runtime: ClientRuntime::new(sessions, NavigationController::default(), views),
        })
    }

    pub fn subscribe_auth(&self) -> watch::Receiver<Option<Principal>> {
        self.runtime.subscribe_auth()
    }

    pub async fn execute(&mut self, command: ShellCommand) -> Step {
        let result = match command {
            ShellCommand::Quit => return Step::Quit,
            ShellCommand::Help => Ok(Value::String(HELP.to_owned())),
            ShellCommand::SignIn { email, password } => self.sign_in(&email, &password).await,
            ShellCommand::SignUp {
                email,
                password,
                role,
                first_name,
                last_name,
            } => {
                self.sign_up(SignUpParams {
                    email,
                    password,
                    role,
                    first_name,
                    last_name,
                })
                .await
            }
            ShellCommand::SignOut => self.sign_out().await,
            ShellCommand::Go(command) => {
                let transition = self.runtime.navigation_mut().dispatch(&command);
                Ok(json!({
                    "transition": transition,
                    "navigation": self.runtime.navigation().state(),
                }))
            }
            ShellCommand::State => self.state(),
            ShellCommand::View => self.view().await,
        };

        Step::Reply(ResultEnvelope::from(result))
    }

    /// Applies a provider notification; `None` when nothing changed.
    pub async fn apply_auth_change(
        &mut self,
        principal: Option<Principal>,
    ) -> Option<ResultEnvelope<Value>> {
        let change = self.runtime.apply_auth_change(principal).await;
        let event = match &change {
            SessionChange::Unchanged => return None,
            SessionChange::Established(_) => "session_established",
            SessionChange::Cleared => "session_cleared",
            SessionChange::Rejected(_) => "session_rejected",
        };
        info!(event, screen = %self.runtime.navigation().current(), "applied auth notification");

        Some(ResultEnvelope::ok(json!({
            "event": event,
            "session": self.runtime.session_state(),
            "screen": self.runtime.navigation().current(),
        })))
    }

    async fn sign_in(&mut self, email: &str, password: &str) -> AppResult<Value> {
        let screen = self.runtime.sign_in(email, password).await?;
        Ok(json!({
            "screen": screen,
            "session": self.runtime.session(),
        }))
    }

    async fn sign_up(&mut self, params: SignUpParams) -> AppResult<Value> {
        let screen = self.runtime.sign_up(params).await?;
        Ok(json!({
            "screen": screen,
            "session": self.runtime.session_state(),
        }))
    }

    async fn sign_out(&mut self) -> AppResult<Value> {
        self.runtime.sign_out().await?;
        Ok(json!({ "screen": self.runtime.navigation().current() }))
    }

    fn state(&self) -> AppResult<Value> {
        let navigation = self.runtime.navigation();
        Ok(json!({
            "session": self.runtime.session_state(),
            "role": navigation.role(),
            "navigation": navigation.state(),
            "target": navigation.render_target(),
        }))
    }

    async fn view(&self) -> AppResult<Value> {
        match self.runtime.refresh_view().await {
            Some(model) => to_json(&model),
            None => Err(AppError::Conflict(
                "the screen changed before its data loaded".to_owned(),
            )),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| AppError::Internal(format!("failed to encode response: {error}")))
}

#[cfg(test)]
mod tests;
