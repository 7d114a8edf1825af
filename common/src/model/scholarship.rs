use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a tracked scholarship application currently stands. Permissive in
/// the same way as the college status: any value can be set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScholarshipStatus {
    /// Bookmarked, no commitment yet. Initial status for new records.
    Interested,
    Planning,
    InProgress,
    Submitted,
    Accepted,
    Rejected,
    /// Dropped without applying.
    NotPursuing,
}

impl ScholarshipStatus {
    pub const ALL: [ScholarshipStatus; 7] = [
        ScholarshipStatus::Interested,
        ScholarshipStatus::Planning,
        ScholarshipStatus::InProgress,
        ScholarshipStatus::Submitted,
        ScholarshipStatus::Accepted,
        ScholarshipStatus::Rejected,
        ScholarshipStatus::NotPursuing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScholarshipStatus::Interested => "interested",
            ScholarshipStatus::Planning => "planning",
            ScholarshipStatus::InProgress => "in_progress",
            ScholarshipStatus::Submitted => "submitted",
            ScholarshipStatus::Accepted => "accepted",
            ScholarshipStatus::Rejected => "rejected",
            ScholarshipStatus::NotPursuing => "not_pursuing",
        }
    }

    pub fn parse(value: &str) -> Option<ScholarshipStatus> {
        ScholarshipStatus::ALL.iter().copied().find(|s| s.as_str() == value)
    }

    /// Statuses where the scholarship deadline still matters. Submitted
    /// applications are done with their deadline, so they are not active.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ScholarshipStatus::Interested
                | ScholarshipStatus::Planning
                | ScholarshipStatus::InProgress
        )
    }

    /// Statuses whose award is still winnable, counted into the potential
    /// value total. Includes submitted: the money is still in play until a
    /// decision lands.
    pub fn counts_toward_potential(&self) -> bool {
        matches!(
            self,
            ScholarshipStatus::Interested
                | ScholarshipStatus::Planning
                | ScholarshipStatus::InProgress
                | ScholarshipStatus::Submitted
        )
    }

    pub fn is_decision(&self) -> bool {
        matches!(self, ScholarshipStatus::Accepted | ScholarshipStatus::Rejected)
    }
}

impl Default for ScholarshipStatus {
    fn default() -> Self {
        ScholarshipStatus::Interested
    }
}

/// A scholarship from the catalog. Read-only as far as the tracker is
/// concerned; the deadline and amount range live here, not on the
/// application record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: i64,
    pub name: String,
    pub organization: Option<String>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub deadline: Option<NaiveDate>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// One user's tracked application to one scholarship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipApplication {
    pub id: i64,
    pub user_id: i64,
    pub scholarship_id: i64,
    pub status: ScholarshipStatus,
    pub notes: Option<String>,
    pub essay_draft: Option<String>,
    /// What was actually granted, filled in when the status turns accepted.
    pub award_amount: Option<f64>,
    pub saved_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub decision_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// A scholarship application joined with its catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedScholarship {
    #[serde(flatten)]
    pub application: ScholarshipApplication,
    pub scholarship_name: String,
    pub organization: Option<String>,
    pub amount_max: Option<f64>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipSummary {
    pub total_applications: u32,
    pub by_status: HashMap<String, u32>,
    /// Sum of amount_max over applications whose award is still winnable.
    pub total_potential_value: f64,
    /// Sum of award_amount over accepted applications.
    pub total_awarded_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipDashboard {
    pub summary: ScholarshipSummary,
    /// At most the five soonest active deadlines in the next 30 days.
    pub upcoming_deadlines: Vec<TrackedScholarship>,
    pub overdue: Vec<TrackedScholarship>,
    pub applications: Vec<TrackedScholarship>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_round_trips() {
        for status in ScholarshipStatus::ALL {
            assert_eq!(ScholarshipStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn submitted_counts_toward_potential_but_is_not_active() {
        assert!(ScholarshipStatus::Submitted.counts_toward_potential());
        assert!(!ScholarshipStatus::Submitted.is_active());
        assert!(!ScholarshipStatus::Accepted.counts_toward_potential());
    }
}
