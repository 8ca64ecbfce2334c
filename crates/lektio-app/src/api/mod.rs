mod healthcheck;
mod schedules;
mod slots;
mod week;

use salvo::{Response, Router, http::StatusCode, writing::Json};
use serde::Serialize;

use crate::middleware::auth::AuthMiddleware;
use lektio_service::error::ServiceError;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps a service failure onto an HTTP status and JSON error body:
/// rejected input becomes 400, a missing record 404, everything else
/// 500.
pub(crate) fn render_service_error(res: &mut Response, err: &ServiceError) {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        tracing::error!(error = ?err, "request failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: err.to_string(),
    }));
}

pub(crate) fn render_bad_request(res: &mut Response, message: &str) {
    res.status_code(StatusCode::BAD_REQUEST);
    res.render(Json(ErrorResponse {
        error: message.to_string(),
    }));
}

pub(crate) fn render_internal_error(res: &mut Response) {
    res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
    res.render(Json(ErrorResponse {
        error: "Internal server error".to_string(),
    }));
}

/// ## Summary
/// Constructs the main API router with all scheduling handlers.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(healthcheck::routes())
        .push(
            Router::with_path("api")
                .hoop(AuthMiddleware)
                .push(week::routes())
                .push(schedules::routes())
                .push(slots::routes()),
        )
}
