//! Storage boundary for the lektio scheduler.
//!
//! The scheduling core is written against the [`store::ScheduleStore`]
//! trait only; which engine backs it is an external concern. This crate
//! ships the trait and an in-memory implementation used by the app and
//! the test suites.

pub mod error;
pub mod memory;
pub mod store;
