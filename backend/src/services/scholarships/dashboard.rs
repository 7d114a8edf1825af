//! Dashboard aggregation for the scholarship tracker. On top of the
//! per-status counts this rolls up the money: what could still be won
//! across open applications and what has actually been awarded. The
//! upcoming-deadline view is capped at the five soonest entries.

use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{Duration, NaiveDate, Utc};
use common::model::scholarship::{
    ScholarshipDashboard, ScholarshipStatus, ScholarshipSummary, TrackedScholarship,
};
use rusqlite::{params, Connection};

use crate::error::ApiError;
use crate::services::user_id;
use crate::{config::Config, db};

use super::{map_tracked, SELECT_TRACKED};

const UPCOMING_WINDOW_DAYS: i64 = 30;
const UPCOMING_LIMIT: usize = 5;

pub async fn process(
    req: HttpRequest,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let user = user_id(&req)?;
    let conn = db::open(&config.db_path)?;
    let dashboard = build_dashboard(&conn, user, Utc::now().date_naive())?;
    Ok(HttpResponse::Ok().json(dashboard))
}

pub fn build_dashboard(
    conn: &Connection,
    user_id: i64,
    today: NaiveDate,
) -> Result<ScholarshipDashboard, ApiError> {
    let applications = load_tracked(conn, user_id)?;

    let mut by_status: HashMap<String, u32> = ScholarshipStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), 0))
        .collect();
    let mut total_potential_value = 0.0;
    let mut total_awarded_value = 0.0;
    for entry in &applications {
        let status = entry.application.status;
        *by_status.entry(status.as_str().to_string()).or_insert(0) += 1;

        if status.counts_toward_potential() {
            total_potential_value += entry.amount_max.unwrap_or(0.0);
        }
        if status == ScholarshipStatus::Accepted {
            total_awarded_value += entry.application.award_amount.unwrap_or(0.0);
        }
    }

    // Deadlines come from the catalog entry, already sorted ascending by
    // the load query, so truncating keeps the five soonest.
    let window_end = today + Duration::days(UPCOMING_WINDOW_DAYS);
    let upcoming_deadlines: Vec<TrackedScholarship> = applications
        .iter()
        .filter(|entry| entry.application.status.is_active())
        .filter(|entry| entry.deadline.map(|d| d >= today && d <= window_end).unwrap_or(false))
        .take(UPCOMING_LIMIT)
        .cloned()
        .collect();

    let overdue: Vec<TrackedScholarship> = applications
        .iter()
        .filter(|entry| entry.application.status.is_active())
        .filter(|entry| entry.deadline.map(|d| d < today).unwrap_or(false))
        .cloned()
        .collect();

    Ok(ScholarshipDashboard {
        summary: ScholarshipSummary {
            total_applications: applications.len() as u32,
            by_status,
            total_potential_value,
            total_awarded_value,
        },
        upcoming_deadlines,
        overdue,
        applications,
    })
}

fn load_tracked(conn: &Connection, user_id: i64) -> Result<Vec<TrackedScholarship>, ApiError> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE a.user_id = ?1 ORDER BY s.deadline IS NULL, s.deadline",
        SELECT_TRACKED
    ))?;
    let entries = stmt
        .query_map(params![user_id], map_tracked)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use common::requests::{SaveScholarshipRequest, UpdateScholarshipRequest};

    use super::super::save::save_application;
    use super::super::testutil::seeded_conn;
    use super::super::update::update_application;
    use super::*;

    const USER: i64 = 7;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn track(conn: &Connection, scholarship: i64) -> i64 {
        let req = SaveScholarshipRequest {
            scholarship_id: scholarship,
            status: None,
            notes: None,
            essay_draft: None,
            award_amount: None,
        };
        save_application(conn, USER, &req).unwrap().id
    }

    fn set(conn: &Connection, id: i64, status: ScholarshipStatus, award: Option<f64>) {
        let req = UpdateScholarshipRequest {
            status: Some(status),
            award_amount: award,
            ..Default::default()
        };
        update_application(conn, id, USER, &req).unwrap();
    }

    #[test]
    fn potential_counts_open_applications_and_awarded_counts_wins() {
        let conn = seeded_conn();
        // amount_max 5000, left at interested.
        track(&conn, 1);
        // amount_max 3000, accepted with a 2000 award.
        let accepted = track(&conn, 2);
        set(&conn, accepted, ScholarshipStatus::Accepted, Some(2000.0));

        let summary = build_dashboard(&conn, USER, today()).unwrap().summary;
        assert_eq!(summary.total_potential_value, 5000.0);
        assert_eq!(summary.total_awarded_value, 2000.0);
    }

    #[test]
    fn submitted_money_is_still_potential() {
        let conn = seeded_conn();
        let id = track(&conn, 3); // amount_max 10000
        set(&conn, id, ScholarshipStatus::Submitted, None);

        let summary = build_dashboard(&conn, USER, today()).unwrap().summary;
        assert_eq!(summary.total_potential_value, 10000.0);
        assert_eq!(summary.total_awarded_value, 0.0);
    }

    #[test]
    fn counts_cover_every_status_and_sum_to_the_total() {
        let conn = seeded_conn();
        track(&conn, 1);
        let submitted = track(&conn, 2);
        set(&conn, submitted, ScholarshipStatus::Submitted, None);

        let summary = build_dashboard(&conn, USER, today()).unwrap().summary;
        assert_eq!(summary.by_status.len(), ScholarshipStatus::ALL.len());
        assert_eq!(summary.by_status["interested"], 1);
        assert_eq!(summary.by_status["submitted"], 1);
        assert_eq!(summary.by_status["not_pursuing"], 0);
        assert_eq!(summary.by_status.values().sum::<u32>(), summary.total_applications);
    }

    #[test]
    fn upcoming_is_active_only_and_capped_at_five() {
        let conn = seeded_conn();
        // Six scholarships with March deadlines inside the window.
        let ids: Vec<i64> = (1..=6).map(|scholarship| track(&conn, scholarship)).collect();

        let dashboard = build_dashboard(&conn, USER, today()).unwrap();
        assert_eq!(dashboard.upcoming_deadlines.len(), UPCOMING_LIMIT);
        // The five soonest, ascending.
        let names: Vec<&str> = dashboard
            .upcoming_deadlines
            .iter()
            .map(|entry| entry.scholarship_name.as_str())
            .collect();
        assert_eq!(names[0], "STEM Futures Award");
        assert_eq!(names[4], "Women in Engineering Award");

        // Submitting the soonest frees a slot for the sixth.
        set(&conn, ids[0], ScholarshipStatus::Submitted, None);
        let dashboard = build_dashboard(&conn, USER, today()).unwrap();
        assert_eq!(dashboard.upcoming_deadlines.len(), 5);
        assert_eq!(
            dashboard.upcoming_deadlines[0].scholarship_name,
            "First Generation Grant"
        );
        assert_eq!(
            dashboard.upcoming_deadlines[4].scholarship_name,
            "Transfer Student Grant"
        );
    }

    #[test]
    fn overdue_requires_an_active_status() {
        let conn = seeded_conn();
        let id = track(&conn, 1); // deadline 2026-03-05
        set(&conn, id, ScholarshipStatus::InProgress, None);

        let after = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        let dashboard = build_dashboard(&conn, USER, after).unwrap();
        assert_eq!(dashboard.overdue.len(), 1);

        set(&conn, id, ScholarshipStatus::NotPursuing, None);
        let dashboard = build_dashboard(&conn, USER, after).unwrap();
        assert!(dashboard.overdue.is_empty());
    }

    #[test]
    fn undated_scholarships_never_classify() {
        let conn = seeded_conn();
        track(&conn, 7); // no deadline

        let dashboard = build_dashboard(&conn, USER, today()).unwrap();
        assert!(dashboard.upcoming_deadlines.is_empty());
        assert!(dashboard.overdue.is_empty());
        assert_eq!(dashboard.summary.total_applications, 1);
    }
}
