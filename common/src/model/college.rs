use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a tracked college application currently stands.
///
/// The status is advisory: any value may be set from any other value. The
/// backend only reacts to specific target statuses by stamping the matching
/// timeline field the first time they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollegeStatus {
    /// Still looking into the school. Initial status for new records.
    Researching,
    /// Decided to apply, not yet working on the application.
    Planning,
    /// Actively working on the application.
    InProgress,
    /// Application sent.
    Submitted,
    /// Admitted.
    Accepted,
    /// Placed on the waitlist.
    Waitlisted,
    /// Denied admission.
    Rejected,
    /// Admitted but turned the offer down.
    Declined,
    /// Admitted and committed.
    Enrolled,
}

impl CollegeStatus {
    pub const ALL: [CollegeStatus; 9] = [
        CollegeStatus::Researching,
        CollegeStatus::Planning,
        CollegeStatus::InProgress,
        CollegeStatus::Submitted,
        CollegeStatus::Accepted,
        CollegeStatus::Waitlisted,
        CollegeStatus::Rejected,
        CollegeStatus::Declined,
        CollegeStatus::Enrolled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollegeStatus::Researching => "researching",
            CollegeStatus::Planning => "planning",
            CollegeStatus::InProgress => "in_progress",
            CollegeStatus::Submitted => "submitted",
            CollegeStatus::Accepted => "accepted",
            CollegeStatus::Waitlisted => "waitlisted",
            CollegeStatus::Rejected => "rejected",
            CollegeStatus::Declined => "declined",
            CollegeStatus::Enrolled => "enrolled",
        }
    }

    pub fn parse(value: &str) -> Option<CollegeStatus> {
        CollegeStatus::ALL.iter().copied().find(|s| s.as_str() == value)
    }

    /// Statuses past the point where the application deadline still matters.
    /// These are excluded from the upcoming-deadline and overdue views.
    /// Waitlisted is intentionally not closed.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            CollegeStatus::Submitted
                | CollegeStatus::Accepted
                | CollegeStatus::Rejected
                | CollegeStatus::Declined
                | CollegeStatus::Enrolled
        )
    }

    /// Statuses that represent an admission decision from the school.
    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            CollegeStatus::Accepted | CollegeStatus::Waitlisted | CollegeStatus::Rejected
        )
    }
}

impl Default for CollegeStatus {
    fn default() -> Self {
        CollegeStatus::Researching
    }
}

/// One user's tracked application to one institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeApplication {
    pub id: i64,
    pub user_id: i64,
    pub institution_id: i64,
    pub status: CollegeStatus,
    /// Free-form plan name, e.g. "early_action" or "regular_decision".
    pub application_type: Option<String>,
    /// Deadline for this application. Chosen by the user since it depends
    /// on the application type.
    pub deadline: Option<NaiveDate>,
    pub notes: Option<String>,
    pub application_fee: Option<f64>,
    pub fee_waived: bool,
    pub saved_at: DateTime<Utc>,
    /// Set the first time the status reaches in_progress.
    pub started_at: Option<DateTime<Utc>>,
    /// Set the first time the status reaches submitted.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Set the first time the status reaches a decision (accepted,
    /// waitlisted or rejected).
    pub decided_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// A college application joined with the institution it points to, as
/// returned by the dashboard and list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedCollege {
    #[serde(flatten)]
    pub application: CollegeApplication,
    pub institution_name: String,
    pub institution_city: Option<String>,
    pub institution_state: Option<String>,
}

/// Per-status counts for one user's college applications. Every status
/// appears as a key, zero when the user has no records in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeSummary {
    pub total_applications: u32,
    pub by_status: HashMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeDashboard {
    pub summary: CollegeSummary,
    /// Open applications with a deadline in the next 30 days, soonest first.
    pub upcoming_deadlines: Vec<TrackedCollege>,
    /// Open applications whose deadline has already passed, oldest first.
    pub overdue: Vec<TrackedCollege>,
    /// Everything the user tracks, ordered by deadline.
    pub applications: Vec<TrackedCollege>,
}
