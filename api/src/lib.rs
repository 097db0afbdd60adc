//! HTTP API layer for the Signet backend
//!
//! Exposes the account lifecycle over actix-web: request DTOs with
//! validation, one route module per endpoint, the domain-error to HTTP
//! mapping, CORS configuration, and the application factory shared by the
//! server binary and the tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
