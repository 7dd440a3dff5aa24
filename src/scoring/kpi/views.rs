use super::super::domain::KpiAnnotation;
use chrono::NaiveDate;
use serde::Serialize;

/// One KPI row: an invariant's aggregated actual compared to its objective.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiRow {
    pub invariant_id: String,
    pub invariant_title: String,
    /// Raw aggregate before display rounding.
    pub value: f64,
    /// Screen rendering of `value` (zero decimals for measured metrics).
    pub display_value: String,
    pub objective_label: String,
    pub is_exceeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<KpiAnnotationView>,
}

/// Analyst commentary attached to a KPI row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiAnnotationView {
    pub annotation_id: String,
    pub result: Option<String>,
    pub root_cause: Option<String>,
    pub action_taken: Option<String>,
    pub comment: Option<String>,
}

impl KpiAnnotationView {
    pub(crate) fn from_record(annotation: &KpiAnnotation) -> Self {
        Self {
            annotation_id: annotation.id.clone(),
            result: annotation.result.clone(),
            root_cause: annotation.root_cause.clone(),
            action_taken: annotation.action_taken.clone(),
            comment: annotation.comment.clone(),
        }
    }
}

/// Trip activity of one Monday-start week.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTripSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub label: String,
    pub report_count: usize,
    pub distance_km: f64,
    pub driving_seconds: i64,
}
