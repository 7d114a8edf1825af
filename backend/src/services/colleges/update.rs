use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use common::model::college::{CollegeApplication, CollegeStatus};
use common::requests::UpdateCollegeRequest;
use rusqlite::{params, Connection};

use crate::error::ApiError;
use crate::services::user_id;
use crate::{config::Config, db};

use super::load_application;

pub async fn process(
    req: HttpRequest,
    config: web::Data<Config>,
    path: web::Path<i64>,
    payload: web::Json<UpdateCollegeRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = user_id(&req)?;
    let conn = db::open(&config.db_path)?;
    let updated = update_application(&conn, path.into_inner(), user, &payload)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Applies the fields present in the payload and persists the row. Fields
/// absent from the JSON body keep their stored value; serde already drops
/// unknown fields on the floor.
pub fn update_application(
    conn: &Connection,
    application_id: i64,
    user_id: i64,
    req: &UpdateCollegeRequest,
) -> Result<CollegeApplication, ApiError> {
    let mut app = load_application(conn, application_id, user_id)?;

    if let Some(status) = req.status {
        apply_status(&mut app, status);
    }
    if let Some(ref application_type) = req.application_type {
        app.application_type = Some(application_type.clone());
    }
    if let Some(deadline) = req.deadline {
        app.deadline = Some(deadline);
    }
    if let Some(ref notes) = req.notes {
        app.notes = Some(notes.clone());
    }
    if let Some(fee) = req.application_fee {
        app.application_fee = Some(fee);
    }
    if let Some(fee_waived) = req.fee_waived {
        app.fee_waived = fee_waived;
    }
    app.updated_at = Utc::now();

    conn.execute(
        "UPDATE college_applications SET status = ?1, application_type = ?2, deadline = ?3, \
         notes = ?4, application_fee = ?5, fee_waived = ?6, started_at = ?7, submitted_at = ?8, \
         decided_at = ?9, updated_at = ?10 WHERE id = ?11 AND user_id = ?12",
        params![
            app.status.as_str(),
            app.application_type,
            app.deadline,
            app.notes,
            app.application_fee,
            app.fee_waived,
            app.started_at,
            app.submitted_at,
            app.decided_at,
            app.updated_at,
            application_id,
            user_id,
        ],
    )?;

    Ok(app)
}

/// Sets the status and stamps the timeline field it maps to, first arrival
/// only. The checks are independent: jumping straight to submitted stamps
/// submitted_at but never backfills started_at, and a timestamp already set
/// is left alone no matter how the status moves afterwards.
pub(crate) fn apply_status(app: &mut CollegeApplication, status: CollegeStatus) {
    let now = Utc::now();
    if status == CollegeStatus::InProgress && app.started_at.is_none() {
        app.started_at = Some(now);
    }
    if status == CollegeStatus::Submitted && app.submitted_at.is_none() {
        app.submitted_at = Some(now);
    }
    if status.is_decision() && app.decided_at.is_none() {
        app.decided_at = Some(now);
    }
    app.status = status;
}
