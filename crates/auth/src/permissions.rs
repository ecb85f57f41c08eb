use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability tag required to perform a protected operation.
///
/// The set is closed: a permission that is not listed here cannot be
/// constructed, so a typo in a policy document fails at load time instead of
/// silently granting (or withholding) access at request time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ReadUsers,
    WriteUsers,
    DeleteUsers,
    ReadProducts,
    WriteProducts,
    AccessDevTools,
    ViewLogs,
}

impl Permission {
    pub const ALL: [Permission; 7] = [
        Permission::ReadUsers,
        Permission::WriteUsers,
        Permission::DeleteUsers,
        Permission::ReadProducts,
        Permission::WriteProducts,
        Permission::AccessDevTools,
        Permission::ViewLogs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ReadUsers => "read_users",
            Permission::WriteUsers => "write_users",
            Permission::DeleteUsers => "delete_users",
            Permission::ReadProducts => "read_products",
            Permission::WriteProducts => "write_products",
            Permission::AccessDevTools => "access_dev_tools",
            Permission::ViewLogs => "view_logs",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown permission '{0}'")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}
