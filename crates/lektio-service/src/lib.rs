//! Service layer: week-view assembly, the occurrence-scope edit
//! protocol, and teacher-identity resolution.

pub mod auth;
pub mod edit;
pub mod error;
pub mod week;
