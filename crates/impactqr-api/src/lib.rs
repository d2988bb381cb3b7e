//! # impactqr-api
//!
//! HTTP gateway for ImpactQR built on Axum.
//!
//! Provides the upload, download, lock and stats endpoints, the HTML status
//! pages served to browsers that follow a dead link, middleware (CORS,
//! compression, request logging), DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
