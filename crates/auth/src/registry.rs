//! Role → permission registry.
//!
//! The registry is configuration: it is built once at startup (from the
//! built-in defaults or a JSON policy document) and never mutated afterwards,
//! so it can be shared across request handlers without synchronization.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Permission, Role};

/// Total mapping from [`Role`] to its granted permission set.
///
/// A role with no configured entry resolves to the empty set, so an
/// incompletely configured role degrades to "no access".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionMap {
    grants: BTreeMap<Role, BTreeSet<Permission>>,
}

#[derive(Debug, Error)]
pub enum PolicyLoadError {
    #[error("invalid policy document: {0}")]
    Invalid(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct PolicyDocument {
    roles: BTreeMap<Role, Vec<Permission>>,
}

impl RolePermissionMap {
    /// An empty map (every role resolves to no permissions).
    pub fn empty() -> Self {
        Self {
            grants: BTreeMap::new(),
        }
    }

    /// Replace the permission set granted to `role`.
    pub fn with_role(mut self, role: Role, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.grants.insert(role, permissions.into_iter().collect());
        self
    }

    /// Load a mapping from a JSON policy document:
    ///
    /// ```json
    /// { "roles": { "admin": ["read_users", "write_users"], "guest": [] } }
    /// ```
    ///
    /// Unknown role or permission names are rejected.
    pub fn from_json(raw: &str) -> Result<Self, PolicyLoadError> {
        let doc: PolicyDocument = serde_json::from_str(raw)?;
        let grants = doc
            .roles
            .into_iter()
            .map(|(role, perms)| (role, perms.into_iter().collect()))
            .collect();
        Ok(Self { grants })
    }

    /// Permissions granted to `role` (empty if the role is not configured).
    pub fn permissions_for(&self, role: Role) -> BTreeSet<Permission> {
        self.grants.get(&role).cloned().unwrap_or_default()
    }

    /// Whether `role` is granted `permission`, without materializing the set.
    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|perms| perms.contains(&permission))
    }
}

impl Default for RolePermissionMap {
    fn default() -> Self {
        use Permission::*;

        Self::empty()
            .with_role(Role::Admin, Permission::ALL)
            .with_role(Role::User, [ReadProducts, WriteProducts])
            .with_role(Role::Guest, [ReadProducts])
            .with_role(
                Role::Developer,
                [ReadUsers, ReadProducts, AccessDevTools, ViewLogs],
            )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Audit view
// ─────────────────────────────────────────────────────────────────────────────

/// Role definition with its granted permissions (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub name: Role,
    pub permissions: Vec<Permission>,
    pub description: &'static str,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub name: Permission,
    pub description: String,
    pub category: String,
}

/// Registry of all roles and permissions, as currently configured.
#[derive(Debug, Clone, Serialize)]
pub struct RbacRegistry {
    pub roles: Vec<RoleDefinition>,
    pub permissions: Vec<PermissionDefinition>,
}

impl RbacRegistry {
    pub fn from_map(map: &RolePermissionMap) -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| RoleDefinition {
                name: role,
                permissions: map.permissions_for(role).into_iter().collect(),
                description: role_description(role),
            })
            .collect();

        let permissions = Permission::ALL
            .into_iter()
            .map(|perm| {
                let (action, resource) = split_tag(perm);
                PermissionDefinition {
                    name: perm,
                    description: format!("{} {}", action_description(action), resource.replace('_', " ")),
                    category: resource.to_string(),
                }
            })
            .collect();

        Self { roles, permissions }
    }

    pub fn role(&self, role: Role) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.name == role)
    }
}

fn role_description(role: Role) -> &'static str {
    match role {
        Role::Admin => "Full system administrator",
        Role::User => "Regular user who can browse and manage products",
        Role::Guest => "Read-only visitor",
        Role::Developer => "Engineer with access to diagnostics and developer tooling",
    }
}

/// Tags are "<action>_<resource>", e.g. "read_users" or "access_dev_tools".
fn split_tag(perm: Permission) -> (&'static str, &'static str) {
    perm.as_str().split_once('_').unwrap_or((perm.as_str(), ""))
}

fn action_description(action: &str) -> &str {
    match action {
        "read" => "View/list",
        "write" => "Create/update",
        "delete" => "Delete",
        "access" => "Use",
        "view" => "View",
        other => other,
    }
}
