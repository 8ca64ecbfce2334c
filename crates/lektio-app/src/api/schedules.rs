use chrono::NaiveDate;
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{render_bad_request, render_internal_error, render_service_error};
use crate::middleware::auth::get_teacher_from_depot;
use crate::store_handler::get_store_from_depot;
use lektio_schedule::calendar::DayOfWeek;
use lektio_schedule::model::{RecurringSchedule, TimeRange};
use lektio_service::edit::{
    SeriesEdit, cancel_occurrence, delete_series, reschedule_occurrence, reschedule_series,
};

/// ## Summary
/// Create schedule request payload. Times are wall-clock `"HH:MM"`.
#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: String,
    pub end_time: String,
    pub days: Vec<DayOfWeek>,
    pub max_students: u32,
}

/// ## Summary
/// Instance-scope reschedule payload.
#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub start_time: String,
    pub end_time: String,
}

/// ## Summary
/// Created schedule response payload
#[derive(Debug, Serialize)]
pub struct ScheduleCreatedResponse {
    pub id: Uuid,
}

fn parse_schedule_id(req: &Request, res: &mut Response) -> Option<Uuid> {
    let Some(raw) = req.param::<String>("schedule_id") else {
        render_bad_request(res, "schedule id is required");
        return None;
    };
    match Uuid::parse_str(&raw) {
        Ok(id) => Some(id),
        Err(_) => {
            render_bad_request(res, "schedule id must be a UUID");
            None
        }
    }
}

fn parse_date(req: &Request, res: &mut Response) -> Option<NaiveDate> {
    let Some(raw) = req.param::<String>("date") else {
        render_bad_request(res, "occurrence date is required");
        return None;
    };
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            render_bad_request(res, "occurrence date must be YYYY-MM-DD");
            None
        }
    }
}

/// ## Summary
/// POST /api/schedules - create a recurring schedule.
///
/// ## Errors
/// Returns HTTP 400 on malformed input or a violated model invariant
/// Returns HTTP 500 if the store is unavailable
#[handler]
async fn create_schedule(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let body: CreateScheduleRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to parse create schedule request");
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

    let schedule = RecurringSchedule {
        id: Uuid::new_v4(),
        teacher_id: teacher.id,
        start_date: body.start_date,
        end_date: body.end_date,
        start_time: range.start_stored(),
        end_time: range.end_stored(),
        days: body.days,
        max_students: body.max_students,
        exceptions: Vec::new(),
        day_assignments: Vec::new(),
    };
    if let Err(e) = schedule.validate() {
        render_service_error(res, &e.into());
        return;
    }

    let store = match get_store_from_depot(depot) {
        Ok(store) => store,
        Err(_) => {
            render_internal_error(res);
            return;
        }
    };

    let id = schedule.id;
    match store.create_schedule(schedule).await {
        Ok(()) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(ScheduleCreatedResponse { id }));
        }
        Err(e) => render_service_error(res, &e.into()),
    }
}

/// ## Summary
/// PATCH /api/schedules/{schedule_id} - series-scope edit of the base
/// pattern. Existing exceptions keep overriding.
///
/// ## Errors
/// Returns HTTP 400 on invalid times or an empty weekday set
/// Returns HTTP 404 if the schedule no longer exists
#[handler]
async fn patch_series(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(schedule_id) = parse_schedule_id(req, res) else {
        return;
    };
    let edit: SeriesEdit = match req.parse_json().await {
        Ok(edit) => edit,
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to parse series edit request");
            render_bad_request(res, "Invalid request body");
            return;
        }
    };
    let store = match get_store_from_depot(depot) {
        Ok(store) => store,
        Err(_) => {
            render_internal_error(res);
            return;
        }
    };

    match reschedule_series(store.as_ref(), schedule_id, edit).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => render_service_error(res, &e),
    }
}

/// ## Summary
/// DELETE /api/schedules/{schedule_id} - delete the series and cascade
/// its exceptions.
///
/// ## Errors
/// Returns HTTP 404 if the schedule no longer exists
#[handler]
async fn delete_schedule(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(schedule_id) = parse_schedule_id(req, res) else {
        return;
    };
    let store = match get_store_from_depot(depot) {
        Ok(store) => store,
        Err(_) => {
            render_internal_error(res);
            return;
        }
    };

    match delete_series(store.as_ref(), schedule_id).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => render_service_error(res, &e),
    }
}

/// ## Summary
/// PUT /api/schedules/{schedule_id}/occurrences/{date} - instance-scope
/// reschedule of a single occurrence via its exception.
///
/// ## Errors
/// Returns HTTP 400 on malformed date or invalid times
/// Returns HTTP 404 if the schedule no longer exists
#[handler]
async fn put_occurrence(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(schedule_id) = parse_schedule_id(req, res) else {
        return;
    };
    let Some(date) = parse_date(req, res) else {
        return;
    };
    let body: RescheduleRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to parse reschedule request");
            render_bad_request(res, "Invalid request body");
            return;
        }
    };
    let store = match get_store_from_depot(depot) {
        Ok(store) => store,
        Err(_) => {
            render_internal_error(res);
            return;
        }
    };

    match reschedule_occurrence(
        store.as_ref(),
        schedule_id,
        date,
        &body.start_time,
        &body.end_time,
    )
    .await
    {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => render_service_error(res, &e),
    }
}

/// ## Summary
/// DELETE /api/schedules/{schedule_id}/occurrences/{date} - cancel one
/// occurrence by recording a cancelling exception. Nothing structural
/// is deleted.
///
/// ## Errors
/// Returns HTTP 404 if the schedule no longer exists
#[handler]
async fn delete_occurrence(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(schedule_id) = parse_schedule_id(req, res) else {
        return;
    };
    let Some(date) = parse_date(req, res) else {
        return;
    };
    let store = match get_store_from_depot(depot) {
        Ok(store) => store,
        Err(_) => {
            render_internal_error(res);
            return;
        }
    };

    match cancel_occurrence(store.as_ref(), schedule_id, date).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => render_service_error(res, &e),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("schedules")
        .post(create_schedule)
        .push(
            Router::with_path("{schedule_id}")
                .patch(patch_series)
                .delete(delete_schedule),
        )
        .push(
            Router::with_path("{schedule_id}/occurrences/{date}")
                .put(put_occurrence)
                .delete(delete_occurrence),
        )
}
