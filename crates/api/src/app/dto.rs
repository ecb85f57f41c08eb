use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use gatekeeper_auth::{AccessRequirement, Permission, Role};

use super::errors;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Query for `/rbac/explain`: comma-separated role and permission names.
#[derive(Debug, Default, Deserialize)]
pub struct ExplainQuery {
    pub roles: Option<String>,
    pub permissions: Option<String>,
}

impl ExplainQuery {
    pub fn to_requirement(&self) -> Result<AccessRequirement, Response> {
        let roles = parse_list::<Role>(self.roles.as_deref())
            .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_role", e))?;
        let permissions = parse_list::<Permission>(self.permissions.as_deref())
            .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_permission", e))?;

        Ok(AccessRequirement::new().roles(roles).permissions(permissions))
    }
}

fn parse_list<T>(raw: Option<&str>) -> Result<Vec<T>, String>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>().map_err(|e| e.to_string()))
        .collect()
}
