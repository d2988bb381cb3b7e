//! Shared domain types.

pub mod token;
