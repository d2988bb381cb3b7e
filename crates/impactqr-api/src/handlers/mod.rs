//! HTTP request handlers.

pub mod download;
pub mod health;
pub mod link;
pub mod lock;
pub mod stats;
pub mod upload;
