use chrono::NaiveDate;
use salvo::{Depot, Request, Response, Router, handler, writing::Json};
use serde::Serialize;

use super::{render_bad_request, render_internal_error, render_service_error};
use crate::middleware::auth::get_teacher_from_depot;
use crate::store_handler::get_store_from_depot;
use lektio_schedule::compose::bucket_by_day;
use lektio_schedule::model::Occurrence;
use lektio_service::week::load_week;

/// ## Summary
/// Week view response payload: the flat occurrence list plus Mon→Sun
/// weekday buckets for rendering.
#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub week_start: NaiveDate,
    pub occurrences: Vec<Occurrence>,
    pub days: [Vec<Occurrence>; 7],
}

/// ## Summary
/// GET /api/week?start=YYYY-MM-DD - the composed calendar week.
///
/// Any date of the week may be passed; the anchor is normalized to its
/// Monday server-side.
///
/// ## Errors
/// Returns HTTP 400 if `start` is missing or not a calendar date
/// Returns HTTP 500 if the store is unavailable
#[handler]
async fn get_week(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(start) = req.query::<String>("start") else {
        render_bad_request(res, "query parameter `start` is required");
        return;
    };
    let Ok(anchor) = NaiveDate::parse_from_str(&start, "%Y-%m-%d") else {
        render_bad_request(res, "`start` must be a YYYY-MM-DD date");
        return;
    };

    let Some(teacher) = get_teacher_from_depot(depot) else {
        render_internal_error(res);
        return;
    };
    let store = match get_store_from_depot(depot) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = ?e, "Failed to get store");
            render_internal_error(res);
            return;
        }
    };

    match load_week(store.as_ref(), teacher.id, anchor).await {
        Ok(view) => {
            let days = bucket_by_day(view.occurrences.clone());
            res.render(Json(WeekResponse {
                week_start: view.week_start,
                occurrences: view.occurrences,
                days,
            }));
        }
        Err(e) => render_service_error(res, &e),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("week").get(get_week)
}
