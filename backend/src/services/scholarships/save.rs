use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use common::model::scholarship::ScholarshipApplication;
use common::requests::SaveScholarshipRequest;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{duplicate_on_conflict, ApiError};
use crate::services::user_id;
use crate::{config::Config, db};

use super::load_application;

pub async fn process(
    req: HttpRequest,
    config: web::Data<Config>,
    payload: web::Json<SaveScholarshipRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = user_id(&req)?;
    let conn = db::open(&config.db_path)?;
    let saved = save_application(&conn, user, &payload)?;
    Ok(HttpResponse::Created().json(saved))
}

/// Starts tracking a scholarship for the user. Same shape as the college
/// save: existence check on the target, advisory duplicate check, UNIQUE
/// constraint as the backstop.
pub fn save_application(
    conn: &Connection,
    user_id: i64,
    req: &SaveScholarshipRequest,
) -> Result<ScholarshipApplication, ApiError> {
    let scholarship: Option<i64> = conn
        .query_row(
            "SELECT id FROM scholarships WHERE id = ?1",
            params![req.scholarship_id],
            |row| row.get(0),
        )
        .optional()?;
    if scholarship.is_none() {
        return Err(ApiError::NotFound("scholarship"));
    }

    let already_tracked: Option<i64> = conn
        .query_row(
            "SELECT id FROM scholarship_applications WHERE user_id = ?1 AND scholarship_id = ?2",
            params![user_id, req.scholarship_id],
            |row| row.get(0),
        )
        .optional()?;
    if already_tracked.is_some() {
        return Err(ApiError::Duplicate("scholarship"));
    }

    let now = Utc::now();
    let status = req.status.unwrap_or_default();

    conn.execute(
        "INSERT INTO scholarship_applications (user_id, scholarship_id, status, notes, \
         essay_draft, award_amount, saved_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            req.scholarship_id,
            status.as_str(),
            req.notes,
            req.essay_draft,
            req.award_amount,
            now,
            now,
        ],
    )
    .map_err(|e| duplicate_on_conflict(e, "scholarship"))?;

    load_application(conn, conn.last_insert_rowid(), user_id)
}
