use salvo::Depot;
use tracing::error;

use crate::config::get_config_from_depot;
use lektio_core::types::Teacher;
use lektio_service::auth::resolve_teacher;

/// Depot keys set by the middleware for downstream handlers.
pub mod depot_keys {
    pub const TEACHER: &str = "teacher";
}

pub struct AuthMiddleware;

/// ## Summary
/// Resolves the request to a teacher identity and stores it in the
/// depot. Scheduling handlers never authorize on their own; they only
/// read the resolved identity.
///
/// ## Side Effects
/// Inserts the resolved `Teacher` into the depot under
/// `depot_keys::TEACHER`.
///
/// ## Errors
/// Returns HTTP 500 if the auth configuration is unusable.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        match resolve_teacher(&config) {
            Ok(teacher) => {
                tracing::trace!(teacher_id = %teacher.id, "teacher resolved");
                depot.insert(depot_keys::TEACHER, teacher);
            }
            Err(e) => {
                error!(error = ?e, "Failed to resolve teacher identity");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Retrieves the resolved teacher from the depot.
///
/// ## Errors
/// Returns `None` if the middleware did not run; handlers treat that as
/// an internal error.
#[must_use]
pub fn get_teacher_from_depot(depot: &Depot) -> Option<Teacher> {
    depot.get::<Teacher>(depot_keys::TEACHER).ok().cloned()
}
