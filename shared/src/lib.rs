//! Shared types and models for the AgriNova advisory platform
//!
//! This crate contains types and client-side logic shared between the
//! backend, the browser (via WASM), and other components of the system.

pub mod calendar;
pub mod models;
pub mod store;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
