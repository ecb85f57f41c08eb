use std::collections::BTreeSet;

use crate::{Permission, Principal, RolePermissionMap};

/// Effective permissions of `principal`, derived from its current role.
///
/// Recomputed on every call; nothing is cached on the principal.
pub fn effective_permissions(map: &RolePermissionMap, principal: &Principal) -> BTreeSet<Permission> {
    map.permissions_for(principal.role)
}
