//! # College Application Tracker
//!
//! Aggregates the API endpoints for tracking college applications. Each
//! record ties the authenticated user to one institution from the catalog
//! and carries a status plus a timeline that fills in as the status
//! advances.
//!
//! ## Registered routes (under `/api/colleges/tracker`):
//!
//! *   **`POST /save`** — start tracking an institution. Fails with 404 if
//!     the institution does not exist and 400 if the user already tracks it.
//! *   **`PUT /{application_id}`** — partial update of a tracked
//!     application. Status changes stamp the matching timeline field on
//!     first arrival (in_progress → started_at, submitted → submitted_at,
//!     decision → decided_at).
//! *   **`DELETE /{application_id}`** — stop tracking. Hard delete.
//! *   **`GET /dashboard`** — per-status summary, upcoming deadlines for
//!     the next 30 days, and overdue applications.
//! *   **`GET /list`** — the user's applications with optional status
//!     filter and sorting.
//!
//! Every query is scoped by the user id from the `X-User-Id` header; a
//! record belonging to another user is indistinguishable from a missing one.

mod dashboard;
mod delete;
mod list;
mod save;
mod update;

use actix_web::{web, Scope};
use common::model::college::{CollegeApplication, CollegeStatus, TrackedCollege};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::ApiError;

const API_PATH: &str = "/api/colleges/tracker";

pub fn configure_routes() -> Scope {
    web::scope(API_PATH)
        .route("/save", web::post().to(save::process))
        .route("/dashboard", web::get().to(dashboard::process))
        .route("/list", web::get().to(list::process))
        .route("/{application_id}", web::put().to(update::process))
        .route("/{application_id}", web::delete().to(delete::process))
}

pub(crate) const SELECT_APPLICATION: &str = "SELECT id, user_id, institution_id, status, \
     application_type, deadline, notes, application_fee, fee_waived, saved_at, started_at, \
     submitted_at, decided_at, updated_at FROM college_applications";

pub(crate) const SELECT_TRACKED: &str = "SELECT a.id, a.user_id, a.institution_id, a.status, \
     a.application_type, a.deadline, a.notes, a.application_fee, a.fee_waived, a.saved_at, \
     a.started_at, a.submitted_at, a.decided_at, a.updated_at, i.name, i.city, i.state \
     FROM college_applications a JOIN institutions i ON i.id = a.institution_id";

pub(crate) fn map_application(row: &Row) -> rusqlite::Result<CollegeApplication> {
    let status_text: String = row.get(3)?;
    let status = CollegeStatus::parse(&status_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown college status: {}", status_text).into(),
        )
    })?;

    Ok(CollegeApplication {
        id: row.get(0)?,
        user_id: row.get(1)?,
        institution_id: row.get(2)?,
        status,
        application_type: row.get(4)?,
        deadline: row.get(5)?,
        notes: row.get(6)?,
        application_fee: row.get(7)?,
        fee_waived: row.get(8)?,
        saved_at: row.get(9)?,
        started_at: row.get(10)?,
        submitted_at: row.get(11)?,
        decided_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

pub(crate) fn map_tracked(row: &Row) -> rusqlite::Result<TrackedCollege> {
    Ok(TrackedCollege {
        application: map_application(row)?,
        institution_name: row.get(14)?,
        institution_city: row.get(15)?,
        institution_state: row.get(16)?,
    })
}

/// Loads one application filtered on (id, user_id). A missing row and a row
/// owned by someone else both come back as `NotFound`.
pub(crate) fn load_application(
    conn: &Connection,
    application_id: i64,
    user_id: i64,
) -> Result<CollegeApplication, ApiError> {
    conn.query_row(
        &format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_APPLICATION),
        params![application_id, user_id],
        map_application,
    )
    .optional()?
    .ok_or(ApiError::NotFound("application"))
}
