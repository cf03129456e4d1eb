//! HTTP transport for the token service
//!
//! Exposes issue, refresh, revoke and introspect under `/api/v1/auth` and
//! maps [`tk_core::DomainError`] onto status codes in one place
//! ([`handlers::error_handler`]).

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
