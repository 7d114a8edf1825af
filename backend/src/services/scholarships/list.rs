use actix_web::{web, HttpRequest, HttpResponse};
use common::model::scholarship::TrackedScholarship;
use common::requests::ListQuery;
use rusqlite::{params, Connection};

use crate::error::ApiError;
use crate::services::user_id;
use crate::{config::Config, db};

use super::{map_tracked, SELECT_TRACKED};

pub async fn process(
    req: HttpRequest,
    config: web::Data<Config>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let user = user_id(&req)?;
    let conn = db::open(&config.db_path)?;
    let applications = list_applications(&conn, user, &query)?;
    Ok(HttpResponse::Ok().json(applications))
}

/// "amount" sorts by the scholarship's amount_max, "award" by what was
/// actually granted; anything unrecognized falls back to the deadline.
fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("saved_at") => "a.saved_at",
        Some("status") => "a.status",
        Some("amount") => "s.amount_max",
        Some("award") => "a.award_amount",
        _ => "s.deadline",
    }
}

pub fn list_applications(
    conn: &Connection,
    user_id: i64,
    query: &ListQuery,
) -> Result<Vec<TrackedScholarship>, ApiError> {
    let column = sort_column(query.sort_by.as_deref());
    let direction = match query.sort_order.as_deref() {
        Some("desc") => "DESC",
        _ => "ASC",
    };

    let mut sql = format!("{} WHERE a.user_id = ?1", SELECT_TRACKED);
    if query.status.is_some() {
        sql.push_str(" AND a.status = ?2");
    }
    sql.push_str(&format!(" ORDER BY {} IS NULL, {} {}", column, column, direction));

    let mut stmt = conn.prepare(&sql)?;
    let applications = match query.status.as_deref() {
        Some(status) => stmt
            .query_map(params![user_id, status], map_tracked)?
            .collect::<Result<Vec<_>, _>>()?,
        None => stmt
            .query_map(params![user_id], map_tracked)?
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(applications)
}
