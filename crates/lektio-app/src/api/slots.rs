use chrono::NaiveDate;
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{render_bad_request, render_internal_error, render_service_error};
use crate::middleware::auth::get_teacher_from_depot;
use crate::store_handler::get_store_from_depot;
use lektio_schedule::model::{OneOffSlot, TimeRange};
use lektio_service::edit::delete_one_off;

/// ## Summary
/// Create one-off slot request payload. Times are wall-clock `"HH:MM"`.
#[derive(Debug, Deserialize)]
pub struct CreateSlotRequest {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub max_students: u32,
}

/// ## Summary
/// Created slot response payload
#[derive(Debug, Serialize)]
pub struct SlotCreatedResponse {
    pub id: Uuid,
}

/// ## Summary
/// POST /api/slots - create a one-off (non-recurring) slot.
///
/// ## Errors
/// Returns HTTP 400 on malformed input or invalid times
/// Returns HTTP 500 if the store is unavailable
#[handler]
async fn create_slot(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let body: CreateSlotRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to parse create slot request");
            render_bad_request(res, "Invalid request body");
            return;
        }
    };
    let range = match TimeRange::parse(&body.start_time, &body.end_time) {
        Ok(range) => range,
        Err(e) => {
            render_service_error(res, &e.into());
            return;
        }
    };
    let Some(teacher) = get_teacher_from_depot(depot) else {
        render_internal_error(res);
        return;
    };
    let store = match get_store_from_depot(depot) {
        Ok(store) => store,
        Err(_) => {
            render_internal_error(res);
            return;
        }
    };

    let slot = OneOffSlot {
        id: Uuid::new_v4(),
        teacher_id: teacher.id,
        date: body.date,
        start_time: range.start_stored(),
        end_time: range.end_stored(),
        max_students: body.max_students,
        student_ids: Vec::new(),
    };
    let id = slot.id;
    match store.create_one_off_slot(slot).await {
        Ok(()) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(SlotCreatedResponse { id }));
        }
        Err(e) => render_service_error(res, &e.into()),
    }
}

/// ## Summary
/// DELETE /api/slots/{slot_id} - delete a one-off slot outright.
///
/// ## Errors
/// Returns HTTP 404 if the slot no longer exists
#[handler]
async fn delete_slot(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(raw) = req.param::<String>("slot_id") else {
        render_bad_request(res, "slot id is required");
        return;
    };
    let Ok(slot_id) = Uuid::parse_str(&raw) else {
        render_bad_request(res, "slot id must be a UUID");
        return;
    };
    let store = match get_store_from_depot(depot) {
        Ok(store) => store,
        Err(_) => {
            render_internal_error(res);
            return;
        }
    };

    match delete_one_off(store.as_ref(), slot_id).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => render_service_error(res, &e),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("slots")
        .post(create_slot)
        .push(Router::with_path("{slot_id}").delete(delete_slot))
}
