use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A project as listed under an axis of a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: i64,
    pub project_number: Option<String>,
    pub title: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_cost: Option<Decimal>,
    pub direct_jobs: Option<i64>,
    pub beneficiaries: Option<i64>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub axis_id: i64,
    pub axis_label: Option<String>,
    pub sector_id: Option<i64>,
    pub sector_label: Option<String>,
    pub pole_id: Option<i64>,
    pub pole_label: Option<String>,
}
