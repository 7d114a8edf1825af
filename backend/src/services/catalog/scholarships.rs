use actix_web::{web, HttpResponse, Scope};
use common::model::scholarship::Scholarship;
use common::requests::CatalogQuery;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::ApiError;
use crate::{config::Config, db};

const API_PATH: &str = "/api/scholarships";

pub fn configure_routes() -> Scope {
    web::scope(API_PATH)
        .route("", web::get().to(list))
        .route("/{scholarship_id}", web::get().to(get))
}

fn map_scholarship(row: &Row) -> rusqlite::Result<Scholarship> {
    Ok(Scholarship {
        id: row.get(0)?,
        name: row.get(1)?,
        organization: row.get(2)?,
        amount_min: row.get(3)?,
        amount_max: row.get(4)?,
        deadline: row.get(5)?,
        website: row.get(6)?,
        description: row.get(7)?,
    })
}

async fn list(
    config: web::Data<Config>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, ApiError> {
    let conn = db::open(&config.db_path)?;
    let scholarships = list_scholarships(&conn, &query)?;
    Ok(HttpResponse::Ok().json(scholarships))
}

async fn get(config: web::Data<Config>, path: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let conn = db::open(&config.db_path)?;
    let scholarship = get_scholarship(&conn, path.into_inner())?;
    Ok(HttpResponse::Ok().json(scholarship))
}

pub fn list_scholarships(
    conn: &Connection,
    query: &CatalogQuery,
) -> Result<Vec<Scholarship>, ApiError> {
    let name_filter = query
        .q
        .as_deref()
        .map(|q| format!("%{}%", q))
        .unwrap_or_else(|| "%".to_string());

    let mut stmt = conn.prepare(
        "SELECT id, name, organization, amount_min, amount_max, deadline, website, description \
         FROM scholarships WHERE name LIKE ?1 ORDER BY deadline IS NULL, deadline",
    )?;
    let scholarships = stmt
        .query_map(params![name_filter], map_scholarship)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(scholarships)
}

pub fn get_scholarship(conn: &Connection, scholarship_id: i64) -> Result<Scholarship, ApiError> {
    conn.query_row(
        "SELECT id, name, organization, amount_min, amount_max, deadline, website, description \
         FROM scholarships WHERE id = ?1",
        params![scholarship_id],
        map_scholarship,
    )
    .optional()?
    .ok_or(ApiError::NotFound("scholarship"))
}

#[cfg(test)]
mod tests {
    use crate::services::scholarships::testutil::seeded_conn;

    use super::*;

    #[test]
    fn list_matches_on_name_and_orders_by_deadline() {
        let conn = seeded_conn();

        let all = list_scholarships(&conn, &CatalogQuery::default()).unwrap();
        assert_eq!(all.len(), 7);
        assert_eq!(all[0].name, "STEM Futures Award");
        // The undated entry sorts last.
        assert_eq!(all[6].name, "Rolling Essay Contest");

        let grants = list_scholarships(
            &conn,
            &CatalogQuery {
                q: Some("grant".to_string()),
                state: None,
            },
        )
        .unwrap();
        assert_eq!(grants.len(), 2);
    }

    #[test]
    fn missing_scholarship_is_not_found() {
        let conn = seeded_conn();
        assert!(matches!(
            get_scholarship(&conn, 99).unwrap_err(),
            ApiError::NotFound(_)
        ));
    }
}
