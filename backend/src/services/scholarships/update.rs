use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use common::model::scholarship::{ScholarshipApplication, ScholarshipStatus};
use common::requests::UpdateScholarshipRequest;
use rusqlite::{params, Connection};

use crate::error::ApiError;
use crate::services::user_id;
use crate::{config::Config, db};

use super::load_application;

pub async fn process(
    req: HttpRequest,
    config: web::Data<Config>,
    path: web::Path<i64>,
    payload: web::Json<UpdateScholarshipRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = user_id(&req)?;
    let conn = db::open(&config.db_path)?;
    let updated = update_application(&conn, path.into_inner(), user, &payload)?;
    Ok(HttpResponse::Ok().json(updated))
}

pub fn update_application(
    conn: &Connection,
    application_id: i64,
    user_id: i64,
    req: &UpdateScholarshipRequest,
) -> Result<ScholarshipApplication, ApiError> {
    let mut app = load_application(conn, application_id, user_id)?;

    if let Some(status) = req.status {
        apply_status(&mut app, status);
    }
    if let Some(ref notes) = req.notes {
        app.notes = Some(notes.clone());
    }
    if let Some(ref essay_draft) = req.essay_draft {
        app.essay_draft = Some(essay_draft.clone());
    }
    if let Some(award_amount) = req.award_amount {
        app.award_amount = Some(award_amount);
    }
    app.updated_at = Utc::now();

    conn.execute(
        "UPDATE scholarship_applications SET status = ?1, notes = ?2, essay_draft = ?3, \
         award_amount = ?4, started_at = ?5, submitted_at = ?6, decision_date = ?7, \
         updated_at = ?8 WHERE id = ?9 AND user_id = ?10",
        params![
            app.status.as_str(),
            app.notes,
            app.essay_draft,
            app.award_amount,
            app.started_at,
            app.submitted_at,
            app.decision_date,
            app.updated_at,
            application_id,
            user_id,
        ],
    )?;

    Ok(app)
}

/// Same stamp-on-first-arrival rules as the college tracker, with the
/// decision landing in decision_date.
pub(crate) fn apply_status(app: &mut ScholarshipApplication, status: ScholarshipStatus) {
    let now = Utc::now();
    if status == ScholarshipStatus::InProgress && app.started_at.is_none() {
        app.started_at = Some(now);
    }
    if status == ScholarshipStatus::Submitted && app.submitted_at.is_none() {
        app.submitted_at = Some(now);
    }
    if status.is_decision() && app.decision_date.is_none() {
        app.decision_date = Some(now);
    }
    app.status = status;
}

#[cfg(test)]
mod tests {
    use common::requests::SaveScholarshipRequest;

    use super::super::save::save_application;
    use super::super::testutil::seeded_conn;
    use super::*;

    fn tracked(conn: &Connection, user: i64, scholarship: i64) -> ScholarshipApplication {
        let req = SaveScholarshipRequest {
            scholarship_id: scholarship,
            status: None,
            notes: None,
            essay_draft: None,
            award_amount: None,
        };
        save_application(conn, user, &req).unwrap()
    }

    fn set_status(status: ScholarshipStatus) -> UpdateScholarshipRequest {
        UpdateScholarshipRequest {
            status: Some(status),
            ..Default::default()
        }
    }

    #[test]
    fn timeline_stamps_land_once_per_field() {
        let conn = seeded_conn();
        let app = tracked(&conn, 7, 1);

        let started = update_application(&conn, app.id, 7, &set_status(ScholarshipStatus::InProgress))
            .unwrap()
            .started_at
            .unwrap();
        let submitted = update_application(&conn, app.id, 7, &set_status(ScholarshipStatus::Submitted))
            .unwrap()
            .submitted_at
            .unwrap();
        let decided = update_application(&conn, app.id, 7, &set_status(ScholarshipStatus::Rejected))
            .unwrap()
            .decision_date
            .unwrap();

        // Cycling back through does not move any of the three stamps.
        let after = update_application(&conn, app.id, 7, &set_status(ScholarshipStatus::InProgress))
            .and_then(|_| update_application(&conn, app.id, 7, &set_status(ScholarshipStatus::Accepted)))
            .unwrap();
        assert_eq!(after.started_at, Some(started));
        assert_eq!(after.submitted_at, Some(submitted));
        assert_eq!(after.decision_date, Some(decided));
    }

    #[test]
    fn not_pursuing_stamps_nothing() {
        let conn = seeded_conn();
        let app = tracked(&conn, 7, 1);

        let updated =
            update_application(&conn, app.id, 7, &set_status(ScholarshipStatus::NotPursuing)).unwrap();
        assert_eq!(updated.status, ScholarshipStatus::NotPursuing);
        assert!(updated.started_at.is_none());
        assert!(updated.submitted_at.is_none());
        assert!(updated.decision_date.is_none());
    }

    #[test]
    fn award_amount_and_essay_survive_separate_updates() {
        let conn = seeded_conn();
        let app = tracked(&conn, 7, 1);

        update_application(
            &conn,
            app.id,
            7,
            &UpdateScholarshipRequest {
                essay_draft: Some("Growing up on a farm taught me...".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let updated = update_application(
            &conn,
            app.id,
            7,
            &UpdateScholarshipRequest {
                status: Some(ScholarshipStatus::Accepted),
                award_amount: Some(2000.0),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.award_amount, Some(2000.0));
        assert!(updated.essay_draft.as_deref().unwrap().starts_with("Growing up"));
        assert!(updated.decision_date.is_some());
    }

    #[test]
    fn another_users_record_is_not_found() {
        let conn = seeded_conn();
        let app = tracked(&conn, 7, 1);

        let err =
            update_application(&conn, app.id, 8, &set_status(ScholarshipStatus::Submitted)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
