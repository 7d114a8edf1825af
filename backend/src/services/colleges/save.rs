use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use common::model::college::CollegeApplication;
use common::requests::SaveCollegeRequest;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{duplicate_on_conflict, ApiError};
use crate::services::user_id;
use crate::{config::Config, db};

use super::load_application;

pub async fn process(
    req: HttpRequest,
    config: web::Data<Config>,
    payload: web::Json<SaveCollegeRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = user_id(&req)?;
    let conn = db::open(&config.db_path)?;
    let saved = save_application(&conn, user, &payload)?;
    Ok(HttpResponse::Created().json(saved))
}

/// Starts tracking an institution for the user. The institution must exist
/// and must not already be tracked; the UNIQUE(user_id, institution_id)
/// constraint backs the existence check against concurrent saves.
pub fn save_application(
    conn: &Connection,
    user_id: i64,
    req: &SaveCollegeRequest,
) -> Result<CollegeApplication, ApiError> {
    let institution: Option<i64> = conn
        .query_row(
            "SELECT id FROM institutions WHERE id = ?1",
            params![req.institution_id],
            |row| row.get(0),
        )
        .optional()?;
    if institution.is_none() {
        return Err(ApiError::NotFound("institution"));
    }

    let already_tracked: Option<i64> = conn
        .query_row(
            "SELECT id FROM college_applications WHERE user_id = ?1 AND institution_id = ?2",
            params![user_id, req.institution_id],
            |row| row.get(0),
        )
        .optional()?;
    if already_tracked.is_some() {
        return Err(ApiError::Duplicate("institution"));
    }

    let now = Utc::now();
    let status = req.status.unwrap_or_default();

    conn.execute(
        "INSERT INTO college_applications (user_id, institution_id, status, application_type, \
         deadline, notes, application_fee, fee_waived, saved_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            user_id,
            req.institution_id,
            status.as_str(),
            req.application_type,
            req.deadline,
            req.notes,
            req.application_fee,
            req.fee_waived.unwrap_or(false),
            now,
            now,
        ],
    )
    .map_err(|e| duplicate_on_conflict(e, "institution"))?;

    load_application(conn, conn.last_insert_rowid(), user_id)
}

#[cfg(test)]
mod tests {
    use common::model::college::CollegeStatus;

    use super::super::testutil::seeded_conn;
    use super::*;

    fn request(institution_id: i64) -> SaveCollegeRequest {
        SaveCollegeRequest {
            institution_id,
            status: None,
            application_type: None,
            deadline: None,
            notes: None,
            application_fee: None,
            fee_waived: None,
        }
    }

    #[test]
    fn save_sets_defaults_and_leaves_timeline_empty() {
        let conn = seeded_conn();
        let app = save_application(&conn, 7, &request(1)).unwrap();

        assert_eq!(app.user_id, 7);
        assert_eq!(app.institution_id, 1);
        assert_eq!(app.status, CollegeStatus::Researching);
        assert!(!app.fee_waived);
        assert!(app.started_at.is_none());
        assert!(app.submitted_at.is_none());
        assert!(app.decided_at.is_none());
    }

    #[test]
    fn save_honors_a_status_override() {
        let conn = seeded_conn();
        let req = SaveCollegeRequest {
            status: Some(CollegeStatus::Planning),
            ..request(2)
        };
        let app = save_application(&conn, 7, &req).unwrap();
        assert_eq!(app.status, CollegeStatus::Planning);
    }

    #[test]
    fn saving_twice_is_a_duplicate() {
        let conn = seeded_conn();
        save_application(&conn, 7, &request(1)).unwrap();

        let err = save_application(&conn, 7, &request(1)).unwrap_err();
        assert!(matches!(err, ApiError::Duplicate(_)));

        // A different user can still track the same institution.
        save_application(&conn, 8, &request(1)).unwrap();
    }

    #[test]
    fn saving_an_unknown_institution_is_not_found() {
        let conn = seeded_conn();
        let err = save_application(&conn, 7, &request(999)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
