//! HTTP binding for the gatekeeper RBAC core: login, bearer-token
//! authentication, and per-route access requirements.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
