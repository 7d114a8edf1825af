use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::college::CollegeStatus;
use crate::model::scholarship::ScholarshipStatus;

/// Payload for tracking a new college application. Everything beyond the
/// institution id is optional; the status defaults to researching.
#[derive(Debug, Deserialize)]
pub struct SaveCollegeRequest {
    pub institution_id: i64,
    pub status: Option<CollegeStatus>,
    pub application_type: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub notes: Option<String>,
    pub application_fee: Option<f64>,
    pub fee_waived: Option<bool>,
}

/// Partial update of a tracked college application. Only fields present in
/// the JSON body are applied; anything else on the record keeps its value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCollegeRequest {
    pub status: Option<CollegeStatus>,
    pub application_type: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub notes: Option<String>,
    pub application_fee: Option<f64>,
    pub fee_waived: Option<bool>,
}

/// Payload for tracking a new scholarship application.
#[derive(Debug, Deserialize)]
pub struct SaveScholarshipRequest {
    pub scholarship_id: i64,
    pub status: Option<ScholarshipStatus>,
    pub notes: Option<String>,
    pub essay_draft: Option<String>,
    pub award_amount: Option<f64>,
}

/// Partial update of a tracked scholarship application.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateScholarshipRequest {
    pub status: Option<ScholarshipStatus>,
    pub notes: Option<String>,
    pub essay_draft: Option<String>,
    pub award_amount: Option<f64>,
}

/// Query string for the tracker list endpoints. An unknown sort_by falls
/// back to deadline; sort_order is ascending unless it is exactly "desc".
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Query string for the catalog list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring match on the name.
    pub q: Option<String>,
    /// Two-letter state filter, institutions only.
    pub state: Option<String>,
}
