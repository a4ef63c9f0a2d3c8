//! # API REST
//!
//! REST API implementation for the symptom report system.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//! - Render timeout enforcement around the core's synchronous PDF pipeline
//!
//! Uses `symrep-core` for all business logic.

#![warn(rust_2018_idioms)]

pub mod dto;
pub mod health;
pub mod render;
pub mod routes;

pub use routes::{router, AppState};
