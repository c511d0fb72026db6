//! cachecarry - Selective build cache migration
//!
//! Copies the build cache entries named by a build plan manifest from one
//! cache root into another, so a fresh cache starts with exactly what a
//! known build needs.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod transfer;
pub mod ui;

pub use error::{CarryError, CarryResult};
