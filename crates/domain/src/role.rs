use std::str::FromStr;

use serde::{Deserialize, Serialize};
use supplink_core::AppError;

use crate::Screen;

/// Access class of an authenticated session, fixed at session creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Files purchase requests.
    Requester,
    /// Approves purchase requests.
    Approver,
    /// Reviews requests, manages suppliers and invitations.
    Manager,
    /// External supplier completing onboarding and quoting.
    Supplier,
    /// Back-office administrator.
    Admin,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "requester",
            Self::Approver => "approver",
            Self::Manager => "manager",
            Self::Supplier => "supplier",
            Self::Admin => "admin",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::Requester,
            Role::Approver,
            Role::Manager,
            Role::Supplier,
            Role::Admin,
        ];

        ALL
    }

    /// Returns the screen a freshly signed-in session of this role lands on.
    #[must_use]
    pub fn home_screen(&self) -> Screen {
        match self {
            Self::Requester => Screen::RequestsList,
            Self::Approver | Self::Admin => Screen::Dashboard,
            Self::Manager => Screen::ManagerDashboard,
            Self::Supplier => Screen::SupplierWelcome,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "requester" => Ok(Self::Requester),
            "approver" => Ok(Self::Approver),
            "manager" => Ok(Self::Manager),
            "supplier" => Ok(Self::Supplier),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::Role;
    use crate::Screen;

    #[test]
    fn home_screens_follow_role_routing_table() {
        assert_eq!(Role::Requester.home_screen(), Screen::RequestsList);
        assert_eq!(Role::Approver.home_screen(), Screen::Dashboard);
        assert_eq!(Role::Manager.home_screen(), Screen::ManagerDashboard);
        assert_eq!(Role::Supplier.home_screen(), Screen::SupplierWelcome);
        assert_eq!(Role::Admin.home_screen(), Screen::Dashboard);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("buyer").is_err());
    }

    proptest! {
        #[test]
        fn storage_value_parses_back(index in 0usize..5) {
            let role = Role::all()[index];
            prop_assert_eq!(Role::from_str(role.as_str()).ok(), Some(role));
        }

        #[test]
        fn no_role_lands_on_sign_in(index in 0usize..5) {
            prop_assert_ne!(Role::all()[index].home_screen(), Screen::SignIn);
        }
    }
}
