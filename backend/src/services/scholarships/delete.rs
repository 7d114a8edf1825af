use actix_web::{web, HttpRequest, HttpResponse};
use rusqlite::{params, Connection};

use crate::error::ApiError;
use crate::services::user_id;
use crate::{config::Config, db};

pub async fn process(
    req: HttpRequest,
    config: web::Data<Config>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = user_id(&req)?;
    let conn = db::open(&config.db_path)?;
    delete_application(&conn, path.into_inner(), user)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": true })))
}

pub fn delete_application(
    conn: &Connection,
    application_id: i64,
    user_id: i64,
) -> Result<(), ApiError> {
    let affected = conn.execute(
        "DELETE FROM scholarship_applications WHERE id = ?1 AND user_id = ?2",
        params![application_id, user_id],
    )?;
    if affected == 0 {
        return Err(ApiError::NotFound("application"));
    }
    Ok(())
}
