//! # Scholarship Application Tracker
//!
//! The scholarship twin of the college tracker: same five routes under
//! `/api/scholarships/tracker`, same ownership and timeline rules. The
//! differences are in the money: a scholarship's deadline and amount range
//! live on the catalog entry, the dashboard sums potential and awarded
//! value, and the upcoming-deadline view is capped at five entries.

mod dashboard;
mod delete;
mod list;
mod save;
mod update;

use actix_web::{web, Scope};
use common::model::scholarship::{ScholarshipApplication, ScholarshipStatus, TrackedScholarship};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::ApiError;

const API_PATH: &str = "/api/scholarships/tracker";

pub fn configure_routes() -> Scope {
    web::scope(API_PATH)
        .route("/save", web::post().to(save::process))
        .route("/dashboard", web::get().to(dashboard::process))
        .route("/list", web::get().to(list::process))
        .route("/{application_id}", web::put().to(update::process))
        .route("/{application_id}", web::delete().to(delete::process))
}

pub(crate) const SELECT_APPLICATION: &str = "SELECT id, user_id, scholarship_id, status, notes, \
     essay_draft, award_amount, saved_at, started_at, submitted_at, decision_date, updated_at \
     FROM scholarship_applications";

pub(crate) const SELECT_TRACKED: &str = "SELECT a.id, a.user_id, a.scholarship_id, a.status, \
     a.notes, a.essay_draft, a.award_amount, a.saved_at, a.started_at, a.submitted_at, \
     a.decision_date, a.updated_at, s.name, s.organization, s.amount_max, s.deadline \
     FROM scholarship_applications a JOIN scholarships s ON s.id = a.scholarship_id";

pub(crate) fn map_application(row: &Row) -> rusqlite::Result<ScholarshipApplication> {
    let status_text: String = row.get(3)?;
    let status = ScholarshipStatus::parse(&status_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown scholarship status: {}", status_text).into(),
        )
    })?;

    Ok(ScholarshipApplication {
        id: row.get(0)?,
        user_id: row.get(1)?,
        scholarship_id: row.get(2)?,
        status,
        notes: row.get(4)?,
        essay_draft: row.get(5)?,
        award_amount: row.get(6)?,
        saved_at: row.get(7)?,
        started_at: row.get(8)?,
        submitted_at: row.get(9)?,
        decision_date: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

pub(crate) fn map_tracked(row: &Row) -> rusqlite::Result<TrackedScholarship> {
    Ok(TrackedScholarship {
        application: map_application(row)?,
        scholarship_name: row.get(12)?,
        organization: row.get(13)?,
        amount_max: row.get(14)?,
        deadline: row.get(15)?,
    })
}

pub(crate) fn load_application(
    conn: &Connection,
    application_id: i64,
    user_id: i64,
) -> Result<ScholarshipApplication, ApiError> {
    conn.query_row(
        &format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_APPLICATION),
        params![application_id, user_id],
        map_application,
    )
    .optional()?
    .ok_or(ApiError::NotFound("application"))
}
