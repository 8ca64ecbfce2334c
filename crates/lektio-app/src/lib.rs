//! HTTP layer for the lektio scheduler: routing, request parsing, JSON
//! serialization, and depot injection. No business logic lives here.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod store_handler;
