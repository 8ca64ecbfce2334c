//! Teacher-identity resolution.
//!
//! The scheduling core never performs authorization; it only needs a
//! teacher id to scope its queries. This boundary maps the deployment's
//! auth configuration to that identity.

use crate::error::{ServiceError, ServiceResult};
use lektio_core::config::{AuthMethod, Settings};
use lektio_core::types::Teacher;

/// ## Summary
/// Resolves the caller to a teacher identity according to the
/// configured auth method. Single-teacher deployments derive a stable
/// id from the configured name.
///
/// ## Errors
/// Returns `InvalidConfiguration` when the configured method is missing
/// the data it needs, or names a method this build does not support.
pub fn resolve_teacher(settings: &Settings) -> ServiceResult<Teacher> {
    match settings.auth.method {
        AuthMethod::SingleTeacher => {
            let single = settings.auth.single_teacher.as_ref().ok_or_else(|| {
                ServiceError::InvalidConfiguration(
                    "auth.method is single_teacher but auth.single_teacher is unset".to_string(),
                )
            })?;
            Ok(Teacher::from_name(&single.name))
        }
        AuthMethod::Proxy => Err(ServiceError::InvalidConfiguration(
            "proxy auth is not supported by this build".to_string(),
        )),
    }
}
