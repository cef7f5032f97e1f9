use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{Role, Screen};

/// Role-to-screen permissions.
///
/// Screens absent from the table are open to every signed-in role;
/// restricted screens are open only to the listed roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityTable {
    restricted: BTreeMap<Screen, BTreeSet<Role>>,
}

impl CapabilityTable {
    /// Creates a table with no restricted screens.
    #[must_use]
    pub fn open() -> Self {
        Self {
            restricted: BTreeMap::new(),
        }
    }

    /// Restricts `screen` to `roles`, replacing any earlier restriction.
    #[must_use]
    pub fn restrict(mut self, screen: Screen, roles: impl IntoIterator<Item = Role>) -> Self {
        self.restricted.insert(screen, roles.into_iter().collect());
        self
    }

    /// Returns whether `role` may enter `screen`.
    #[must_use]
    pub fn permits(&self, role: Role, screen: Screen) -> bool {
        self.restricted
            .get(&screen)
            .is_none_or(|roles| roles.contains(&role))
    }

    /// Returns the screens `role` may enter.
    #[must_use]
    pub fn permitted_screens(&self, role: Role) -> BTreeSet<Screen> {
        Screen::all()
            .iter()
            .copied()
            .filter(|screen| self.permits(role, *screen))
            .collect()
    }
}

impl Default for CapabilityTable {
    /// Only managers reach the supplier list.
    fn default() -> Self {
        Self::open().restrict(Screen::SupplierList, [Role::Manager])
    }
}
