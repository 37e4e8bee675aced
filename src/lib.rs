//! Samyoga studio portal backend.
//!
//! Public blog, a student dashboard for booking classes and tracking
//! payments and progress, and an admin panel for approvals, scheduling,
//! content and an AI assistant.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

pub use error::{AppError, AppResult};
pub use state::AppState;
