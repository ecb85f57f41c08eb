use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Permission, Role};

/// Access requirement declared for a protected operation.
///
/// - `allowed_roles`: principal's role must be one of these (any-of).
/// - `required_permissions`: principal must hold every one of these (all-of).
///
/// An empty clause imposes no constraint; both clauses are AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement {
    #[serde(default)]
    pub allowed_roles: BTreeSet<Role>,
    #[serde(default)]
    pub required_permissions: BTreeSet<Permission>,
}

impl AccessRequirement {
    /// A requirement with no clauses (authorizes every authenticated principal).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles.extend(roles);
        self
    }

    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.required_permissions.extend(permissions);
        self
    }

    /// True when neither clause is declared.
    pub fn is_unconstrained(&self) -> bool {
        self.allowed_roles.is_empty() && self.required_permissions.is_empty()
    }
}
