//! Profiles, approval rules, and the authenticated session.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use supplink_core::{AppError, Principal};

use crate::Role;

/// Profile record stored alongside the identity provider account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider uid, also the record key.
    pub uid: String,
    /// Contact email.
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Access class.
    pub role: Role,
    /// Approval flag. Legacy records carry no flag at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

impl UserProfile {
    /// Returns the approval status derived from the raw flag.
    #[must_use]
    pub fn approval(&self) -> ApprovalStatus {
        ApprovalStatus::from_flag(self.approved)
    }

    /// Returns "first last", or the email when both names are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return self.email.clone();
        }

        full_name.to_owned()
    }
}

/// Approval state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Flag explicitly `true`.
    Approved,
    /// Flag absent; account predates approval tracking.
    Unflagged,
    /// Flag explicitly `false`.
    Unapproved,
}

impl ApprovalStatus {
    /// Derives the status from the stored flag.
    #[must_use]
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Approved,
            Some(false) => Self::Unapproved,
            None => Self::Unflagged,
        }
    }
}

/// Decides which approval states may hold a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalPolicy {
    /// Admits approved and unflagged accounts.
    #[default]
    Legacy,
    /// Admits approved accounts only.
    Strict,
}

impl ApprovalPolicy {
    /// Returns a stable configuration value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Strict => "strict",
        }
    }

    /// Returns whether an account in `status` may be signed in.
    #[must_use]
    pub fn admits(&self, status: ApprovalStatus) -> bool {
        match (self, status) {
            (_, ApprovalStatus::Approved) => true,
            (Self::Legacy, ApprovalStatus::Unflagged) => true,
            (Self::Strict, ApprovalStatus::Unflagged) => false,
            (_, ApprovalStatus::Unapproved) => false,
        }
    }
}

impl FromStr for ApprovalPolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "strict" => Ok(Self::Strict),
            _ => Err(AppError::Validation(format!(
                "unknown approval policy '{value}'"
            ))),
        }
    }
}

/// Authenticated session. Only exists for admitted accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    principal: Principal,
    role: Role,
    approval: ApprovalStatus,
    display_name: String,
}

impl Session {
    /// Opens a session for `principal` if `policy` admits the profile.
    pub fn open(
        principal: Principal,
        profile: &UserProfile,
        policy: ApprovalPolicy,
    ) -> Result<Self, AppError> {
        let approval = profile.approval();
        if !policy.admits(approval) {
            return Err(AppError::Forbidden(
                "your account is awaiting approval by an administrator".to_owned(),
            ));
        }

        Ok(Self {
            principal,
            role: profile.role,
            approval,
            display_name: profile.display_name(),
        })
    }

    /// Returns the authenticated principal.
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Returns the session role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the approval status the session was opened with.
    #[must_use]
    pub fn approval(&self) -> ApprovalStatus {
        self.approval
    }

    /// Returns the display name captured at sign-in.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}
