//! Dashboard aggregation for the college tracker. Loads everything the
//! user tracks in one joined query, then classifies in memory: per-status
//! counts, deadlines coming up inside a 30-day window, and deadlines that
//! already passed while the application is still open.

use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{Duration, NaiveDate, Utc};
use common::model::college::{CollegeDashboard, CollegeStatus, CollegeSummary, TrackedCollege};
use rusqlite::{params, Connection};

use crate::error::ApiError;
use crate::services::user_id;
use crate::{config::Config, db};

use super::{map_tracked, SELECT_TRACKED};

const UPCOMING_WINDOW_DAYS: i64 = 30;

pub async fn process(
    req: HttpRequest,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let user = user_id(&req)?;
    let conn = db::open(&config.db_path)?;
    let dashboard = build_dashboard(&conn, user, Utc::now().date_naive())?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// Pure read: classifies the user's applications relative to `today`.
/// The load query orders by deadline ascending with NULLs last, and the
/// upcoming/overdue filters preserve that order, so both lists come out
/// sorted soonest-first without re-sorting.
pub fn build_dashboard(
    conn: &Connection,
    user_id: i64,
    today: NaiveDate,
) -> Result<CollegeDashboard, ApiError> {
    let applications = load_tracked(conn, user_id)?;

    let mut by_status: HashMap<String, u32> = CollegeStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), 0))
        .collect();
    for entry in &applications {
        *by_status.entry(entry.application.status.as_str().to_string()).or_insert(0) += 1;
    }

    let window_end = today + Duration::days(UPCOMING_WINDOW_DAYS);
    let upcoming_deadlines: Vec<TrackedCollege> = applications
        .iter()
        .filter(|entry| !entry.application.status.is_closed())
        .filter(|entry| {
            entry
                .application
                .deadline
                .map(|d| d >= today && d <= window_end)
                .unwrap_or(false)
        })
        .cloned()
        .collect();

    let overdue: Vec<TrackedCollege> = applications
        .iter()
        .filter(|entry| !entry.application.status.is_closed())
        .filter(|entry| entry.application.deadline.map(|d| d < today).unwrap_or(false))
        .cloned()
        .collect();

    Ok(CollegeDashboard {
        summary: CollegeSummary {
            total_applications: applications.len() as u32,
            by_status,
        },
        upcoming_deadlines,
        overdue,
        applications,
    })
}

fn load_tracked(conn: &Connection, user_id: i64) -> Result<Vec<TrackedCollege>, ApiError> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE a.user_id = ?1 ORDER BY a.deadline IS NULL, a.deadline",
        SELECT_TRACKED
    ))?;
    let entries = stmt
        .query_map(params![user_id], map_tracked)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}
