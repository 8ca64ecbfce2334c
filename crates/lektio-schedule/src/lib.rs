//! Recurrence expansion core for the lektio tutoring scheduler.
//!
//! Given a set of weekly recurring schedule definitions and a target
//! calendar week, this crate deterministically produces the concrete
//! session occurrences for that week: weekday membership, start/end
//! date bounds, and per-date exception overrides (rescheduled time or
//! cancellation) are all applied here.
//!
//! Everything in this crate is pure computation: no I/O, no clock
//! reads. Re-running an expansion with the same inputs always yields
//! the same output.
//!
//! ## Stored time-of-day convention
//! Schedule and exception times are stored as full timestamps whose
//! date component is a storage artifact. Only the time-of-day, read in
//! the UTC frame, is meaningful. All date-only comparisons are made on
//! calendar dates in that same frame; mixing frames is the primary
//! off-by-one-day hazard this crate exists to prevent.

pub mod calendar;
pub mod compose;
pub mod error;
pub mod expand;
pub mod model;
