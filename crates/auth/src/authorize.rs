use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::{AccessRequirement, Permission, Principal, PrincipalId, Role, RolePermissionMap, effective_permissions};

/// Structured reason for a denied authorization.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Denial {
    #[error("role '{actual}' is not one of the allowed roles {}", join(.required))]
    RoleDenied {
        required: BTreeSet<Role>,
        actual: Role,
    },

    #[error("missing required permissions {}", join(.missing))]
    PermissionDenied {
        required: BTreeSet<Permission>,
        missing: BTreeSet<Permission>,
    },
}

fn join<T: core::fmt::Display>(items: &BTreeSet<T>) -> String {
    let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

/// Evaluate `requirement` against `principal`.
///
/// - No IO
/// - No panics
/// - Role clause first, then permission clause; first failure wins
/// - A requirement with no clauses allows unconditionally
pub fn authorize(
    map: &RolePermissionMap,
    principal: &Principal,
    requirement: &AccessRequirement,
) -> Result<(), Denial> {
    if !requirement.allowed_roles.is_empty() && !requirement.allowed_roles.contains(&principal.role) {
        return Err(Denial::RoleDenied {
            required: requirement.allowed_roles.clone(),
            actual: principal.role,
        });
    }

    if !requirement.required_permissions.is_empty() {
        let effective = effective_permissions(map, principal);
        let missing: BTreeSet<Permission> = requirement
            .required_permissions
            .difference(&effective)
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(Denial::PermissionDenied {
                required: requirement.required_permissions.clone(),
                missing,
            });
        }
    }

    Ok(())
}

/// Shareable enforcement point bound to a fixed role mapping.
#[derive(Debug, Clone)]
pub struct AuthorizationGuard {
    map: Arc<RolePermissionMap>,
}

impl AuthorizationGuard {
    pub fn new(map: impl Into<Arc<RolePermissionMap>>) -> Self {
        Self { map: map.into() }
    }

    pub fn role_permissions(&self) -> &RolePermissionMap {
        &self.map
    }

    pub fn authorize(&self, principal: &Principal, requirement: &AccessRequirement) -> Result<(), Denial> {
        let decision = authorize(&self.map, principal, requirement);
        match &decision {
            Ok(()) => tracing::debug!(principal_id = %principal.id, "access granted"),
            Err(denial) => {
                tracing::info!(principal_id = %principal.id, role = %principal.role, %denial, "access denied")
            }
        }
        decision
    }

    pub fn explain(&self, principal: &Principal, requirement: &AccessRequirement) -> AuthorizationExplanation {
        explain_authorization(&self.map, principal, requirement)
    }
}

impl Default for AuthorizationGuard {
    fn default() -> Self {
        Self::new(RolePermissionMap::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub requirement: AccessRequirement,
    pub granted: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
    pub principal: PrincipalState,
    pub denial: Option<Denial>,
    /// Ways the denial could be resolved (empty when granted).
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrincipalState {
    pub principal_id: PrincipalId,
    pub role: Role,
    pub effective_permissions: BTreeSet<Permission>,
}

/// Explain why `requirement` is (or would be) granted or denied for `principal`.
pub fn explain_authorization(
    map: &RolePermissionMap,
    principal: &Principal,
    requirement: &AccessRequirement,
) -> AuthorizationExplanation {
    let state = PrincipalState {
        principal_id: principal.id.clone(),
        role: principal.role,
        effective_permissions: effective_permissions(map, principal),
    };

    match authorize(map, principal, requirement) {
        Ok(()) => AuthorizationExplanation {
            requirement: requirement.clone(),
            granted: true,
            reason: if requirement.is_unconstrained() {
                "No access requirement declared".to_string()
            } else {
                format!("Role '{}' satisfies every declared clause", principal.role)
            },
            principal: state,
            denial: None,
            suggestions: Vec::new(),
        },
        Err(denial) => {
            let mut suggestions = Vec::new();

            let satisfying: Vec<&str> = Role::ALL
                .into_iter()
                .filter(|role| {
                    let mut candidate = principal.clone();
                    candidate.role = *role;
                    authorize(map, &candidate, requirement).is_ok()
                })
                .map(|role| role.as_str())
                .collect();

            if satisfying.is_empty() {
                suggestions.push(
                    "No configured role satisfies this requirement; check the role-permission mapping"
                        .to_string(),
                );
            } else {
                suggestions.push(format!("Assign one of the roles {satisfying:?}"));
            }

            if let Denial::PermissionDenied { missing, .. } = &denial {
                suggestions.push(format!(
                    "Grant {} to role '{}' in the role-permission mapping",
                    join(missing),
                    principal.role
                ));
            }

            AuthorizationExplanation {
                requirement: requirement.clone(),
                granted: false,
                reason: denial.to_string(),
                principal: state,
                denial: Some(denial),
                suggestions,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Credential;

    fn principal(role: Role) -> Principal {
        Principal::new(format!("{role}_user"), role, Credential::new("pw"))
    }

    fn admin_guest_map() -> RolePermissionMap {
        RolePermissionMap::empty()
            .with_role(
                Role::Admin,
                [Permission::ReadUsers, Permission::WriteUsers, Permission::DeleteUsers],
            )
            .with_role(Role::Guest, Vec::<Permission>::new())
    }

    #[test]
    fn permission_clause_allows_admin_and_denies_guest() {
        let map = admin_guest_map();
        let req = AccessRequirement::new().permissions([Permission::WriteUsers]);

        assert_eq!(authorize(&map, &principal(Role::Admin), &req), Ok(()));
        assert_eq!(
            authorize(&map, &principal(Role::Guest), &req),
            Err(Denial::PermissionDenied {
                required: BTreeSet::from([Permission::WriteUsers]),
                missing: BTreeSet::from([Permission::WriteUsers]),
            })
        );
    }

    #[test]
    fn role_clause_is_any_of() {
        let map = RolePermissionMap::default();
        let req = AccessRequirement::new().roles([Role::Admin, Role::User]);

        assert_eq!(authorize(&map, &principal(Role::User), &req), Ok(()));
        assert_eq!(
            authorize(&map, &principal(Role::Guest), &req),
            Err(Denial::RoleDenied {
                required: BTreeSet::from([Role::Admin, Role::User]),
                actual: Role::Guest,
            })
        );
    }

    #[test]
    fn permission_clause_is_all_of_and_reports_only_missing() {
        let map = RolePermissionMap::default();
        let req = AccessRequirement::new().permissions([Permission::ReadUsers, Permission::WriteUsers]);

        let Err(Denial::PermissionDenied { missing, required }) =
            authorize(&map, &principal(Role::Developer), &req)
        else {
            panic!("expected PermissionDenied");
        };
        assert_eq!(missing, BTreeSet::from([Permission::WriteUsers]));
        assert_eq!(required.len(), 2);
    }

    #[test]
    fn role_alone_never_satisfies_both_clauses() {
        let map = RolePermissionMap::default();
        let req = AccessRequirement::new()
            .roles([Role::User, Role::Developer])
            .permissions([Permission::ViewLogs]);

        assert!(matches!(
            authorize(&map, &principal(Role::User), &req),
            Err(Denial::PermissionDenied { .. })
        ));
        assert_eq!(authorize(&map, &principal(Role::Developer), &req), Ok(()));
    }

    #[test]
    fn role_clause_is_checked_first() {
        let map = RolePermissionMap::default();
        let req = AccessRequirement::new()
            .roles([Role::Admin])
            .permissions([Permission::DeleteUsers]);

        assert!(matches!(
            authorize(&map, &principal(Role::Guest), &req),
            Err(Denial::RoleDenied { .. })
        ));
    }

    #[test]
    fn unconstrained_requirement_allows_everyone() {
        let map = RolePermissionMap::empty();
        for role in Role::ALL {
            assert_eq!(authorize(&map, &principal(role), &AccessRequirement::new()), Ok(()));
        }
    }

    #[test]
    fn unconfigured_role_fails_safe() {
        let map = RolePermissionMap::empty();
        let req = AccessRequirement::new().permissions([Permission::ReadProducts]);

        assert!(authorize(&map, &principal(Role::Admin), &req).is_err());
    }

    #[test]
    fn denial_messages_echo_unmet_clause() {
        let denial = Denial::PermissionDenied {
            required: BTreeSet::from([Permission::ViewLogs, Permission::ReadUsers]),
            missing: BTreeSet::from([Permission::ViewLogs]),
        };
        assert_eq!(denial.to_string(), "missing required permissions [view_logs]");

        let denial = Denial::RoleDenied {
            required: BTreeSet::from([Role::Admin]),
            actual: Role::Guest,
        };
        assert_eq!(denial.to_string(), "role 'guest' is not one of the allowed roles [admin]");
    }

    #[test]
    fn denial_serializes_with_kind_tag() {
        let denial = Denial::RoleDenied {
            required: BTreeSet::from([Role::Admin]),
            actual: Role::Guest,
        };
        let json = serde_json::to_value(&denial).unwrap();

        assert_eq!(json["kind"], "role_denied");
        assert_eq!(json["actual"], "guest");
        assert_eq!(json["required"], serde_json::json!(["admin"]));
    }

    #[test]
    fn explanation_suggests_satisfying_roles() {
        let guard = AuthorizationGuard::default();
        let req = AccessRequirement::new().permissions([Permission::AccessDevTools]);

        let explanation = guard.explain(&principal(Role::User), &req);
        assert!(!explanation.granted);
        assert!(explanation.denial.is_some());
        assert!(explanation.suggestions[0].contains("admin"));
        assert!(explanation.suggestions[0].contains("developer"));
        assert!(explanation.suggestions[1].contains("access_dev_tools"));

        let explanation = guard.explain(&principal(Role::Developer), &req);
        assert!(explanation.granted);
        assert!(explanation.suggestions.is_empty());
        assert!(
            explanation
                .principal
                .effective_permissions
                .contains(&Permission::ViewLogs)
        );
    }

    #[test]
    fn explanation_flags_unsatisfiable_requirement() {
        let guard = AuthorizationGuard::new(RolePermissionMap::empty());
        let req = AccessRequirement::new().permissions([Permission::ViewLogs]);

        let explanation = guard.explain(&principal(Role::Admin), &req);
        assert!(!explanation.granted);
        assert!(explanation.suggestions[0].starts_with("No configured role"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use proptest::sample::subsequence;

        fn any_role() -> impl Strategy<Value = Role> {
            proptest::sample::select(Role::ALL.to_vec())
        }

        fn role_set() -> impl Strategy<Value = BTreeSet<Role>> {
            subsequence(Role::ALL.to_vec(), 0..=Role::ALL.len())
                .prop_map(|v| v.into_iter().collect())
        }

        fn permission_set() -> impl Strategy<Value = BTreeSet<Permission>> {
            subsequence(Permission::ALL.to_vec(), 0..=Permission::ALL.len())
                .prop_map(|v| v.into_iter().collect())
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: Allow iff every declared clause holds; the denial names the failing clause.
            #[test]
            fn allow_iff_all_declared_clauses_hold(
                role in any_role(),
                allowed_roles in role_set(),
                required_permissions in permission_set(),
            ) {
                let map = RolePermissionMap::default();
                let p = principal(role);
                let req = AccessRequirement { allowed_roles, required_permissions };

                let role_ok = req.allowed_roles.is_empty() || req.allowed_roles.contains(&role);
                let perms_ok = req.required_permissions.is_subset(&map.permissions_for(role));

                match authorize(&map, &p, &req) {
                    Ok(()) => prop_assert!(role_ok && perms_ok),
                    Err(Denial::RoleDenied { actual, .. }) => {
                        prop_assert!(!role_ok);
                        prop_assert_eq!(actual, role);
                    }
                    Err(Denial::PermissionDenied { missing, .. }) => {
                        prop_assert!(role_ok && !perms_ok);
                        let expected: BTreeSet<Permission> = req
                            .required_permissions
                            .difference(&map.permissions_for(role))
                            .copied()
                            .collect();
                        prop_assert_eq!(missing, expected);
                    }
                }
            }

            /// Property: Evaluation is deterministic regardless of interleaving with other principals.
            #[test]
            fn authorize_is_deterministic(
                first in any_role(),
                second in any_role(),
                required_permissions in permission_set(),
            ) {
                let map = RolePermissionMap::default();
                let req = AccessRequirement::new().permissions(required_permissions);

                let a1 = authorize(&map, &principal(first), &req);
                let _ = authorize(&map, &principal(second), &req);
                let a2 = authorize(&map, &principal(first), &req);

                prop_assert_eq!(a1, a2);
                prop_assert_eq!(
                    effective_permissions(&map, &principal(first)),
                    map.permissions_for(first)
                );
            }
        }
    }
}
