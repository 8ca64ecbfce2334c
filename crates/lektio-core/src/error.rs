use thiserror::Error;

/// Errors shared across the lektio crates.
///
/// Validation and not-found taxonomies live in the scheduling layers;
/// what remains here is the programmer-error case of a broken wiring
/// invariant (e.g. a depot entry that was never injected).
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
