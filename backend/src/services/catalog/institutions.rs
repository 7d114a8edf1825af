use actix_web::{web, HttpResponse, Scope};
use common::model::institution::Institution;
use common::requests::CatalogQuery;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::ApiError;
use crate::{config::Config, db};

const API_PATH: &str = "/api/institutions";

pub fn configure_routes() -> Scope {
    web::scope(API_PATH)
        .route("", web::get().to(list))
        .route("/{institution_id}", web::get().to(get))
}

fn map_institution(row: &Row) -> rusqlite::Result<Institution> {
    Ok(Institution {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        website: row.get(4)?,
    })
}

async fn list(
    config: web::Data<Config>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, ApiError> {
    let conn = db::open(&config.db_path)?;
    let institutions = list_institutions(&conn, &query)?;
    Ok(HttpResponse::Ok().json(institutions))
}

async fn get(config: web::Data<Config>, path: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let conn = db::open(&config.db_path)?;
    let institution = get_institution(&conn, path.into_inner())?;
    Ok(HttpResponse::Ok().json(institution))
}

pub fn list_institutions(
    conn: &Connection,
    query: &CatalogQuery,
) -> Result<Vec<Institution>, ApiError> {
    let name_filter = query
        .q
        .as_deref()
        .map(|q| format!("%{}%", q))
        .unwrap_or_else(|| "%".to_string());

    let mut sql =
        String::from("SELECT id, name, city, state, website FROM institutions WHERE name LIKE ?1");
    if query.state.is_some() {
        sql.push_str(" AND state = ?2");
    }
    sql.push_str(" ORDER BY name");

    let mut stmt = conn.prepare(&sql)?;
    let institutions = match query.state.as_deref() {
        Some(state) => stmt
            .query_map(params![name_filter, state], map_institution)?
            .collect::<Result<Vec<_>, _>>()?,
        None => stmt
            .query_map(params![name_filter], map_institution)?
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(institutions)
}

pub fn get_institution(conn: &Connection, institution_id: i64) -> Result<Institution, ApiError> {
    conn.query_row(
        "SELECT id, name, city, state, website FROM institutions WHERE id = ?1",
        params![institution_id],
        map_institution,
    )
    .optional()?
    .ok_or(ApiError::NotFound("institution"))
}

#[cfg(test)]
mod tests {
    use crate::services::colleges::testutil::seeded_conn;

    use super::*;

    #[test]
    fn name_and_state_filters_narrow_the_list() {
        let conn = seeded_conn();

        let all = list_institutions(&conn, &CatalogQuery::default()).unwrap();
        assert_eq!(all.len(), 3);

        let indiana = list_institutions(
            &conn,
            &CatalogQuery {
                q: None,
                state: Some("IN".to_string()),
            },
        )
        .unwrap();
        assert_eq!(indiana.len(), 2);

        let purdue = list_institutions(
            &conn,
            &CatalogQuery {
                q: Some("purdue".to_string()),
                state: None,
            },
        )
        .unwrap();
        assert_eq!(purdue.len(), 1);
        assert_eq!(purdue[0].name, "Purdue University");
    }

    #[test]
    fn missing_institution_is_not_found() {
        let conn = seeded_conn();
        get_institution(&conn, 1).unwrap();
        assert!(matches!(
            get_institution(&conn, 42).unwrap_err(),
            ApiError::NotFound(_)
        ));
    }
}
