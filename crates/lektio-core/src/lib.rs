//! Shared foundation for the lektio tutoring scheduler: configuration,
//! core error types, and types used across crates.

pub mod config;
pub mod error;
pub mod types;
