use rust_decimal::Decimal;
use serde::Serialize;

/// Row shape as it comes back from the grouped statistics query.
///
/// Every measure is nullable: `COUNT`/`SUM` over a `LEFT JOIN` can yield
/// `NULL`, and older database functions return untyped columns. Nothing here
/// is trusted until it goes through `StatRow::from`.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct RawStatRow {
    pub axis_id: i64,
    pub axis_label: Option<String>,
    pub pole_id: Option<i64>,
    pub pole_label: Option<String>,
    pub sector_id: Option<i64>,
    pub sector_label: Option<String>,
    pub objective_id: Option<i64>,
    pub objective_label: Option<String>,
    pub project_count: Option<i64>,
    pub total_cost: Option<Decimal>,
    pub total_direct_jobs: Option<i64>,
    pub total_beneficiaries: Option<i64>,
}

/// One pre-aggregated (axis, sector, objective) combination.
///
/// Measures are already coerced: counts cannot be negative and the cost
/// (millions of dirhams) is never below zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRow {
    pub axis_id: i64,
    pub axis_label: String,
    pub pole_id: Option<i64>,
    pub pole_label: Option<String>,
    pub sector_id: Option<i64>,
    pub sector_label: Option<String>,
    pub objective_id: Option<i64>,
    pub objective_label: Option<String>,
    pub project_count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    pub total_direct_jobs: u64,
    pub total_beneficiaries: u64,
}

impl StatRow {
    /// Row for an axis with no optional metadata and zeroed measures.
    pub fn new(axis_id: i64, axis_label: impl Into<String>) -> Self {
        Self {
            axis_id,
            axis_label: axis_label.into(),
            pole_id: None,
            pole_label: None,
            sector_id: None,
            sector_label: None,
            objective_id: None,
            objective_label: None,
            project_count: 0,
            total_cost: Decimal::ZERO,
            total_direct_jobs: 0,
            total_beneficiaries: 0,
        }
    }

    pub fn with_pole(mut self, pole_id: i64, pole_label: impl Into<String>) -> Self {
        self.pole_id = Some(pole_id);
        self.pole_label = Some(pole_label.into());
        self
    }

    pub fn with_sector(mut self, sector_id: Option<i64>, sector_label: Option<&str>) -> Self {
        self.sector_id = sector_id;
        self.sector_label = sector_label.map(str::to_string);
        self
    }

    pub fn with_objective(mut self, objective_id: Option<i64>, objective_label: Option<&str>) -> Self {
        self.objective_id = objective_id;
        self.objective_label = objective_label.map(str::to_string);
        self
    }

    pub fn with_measures(
        mut self,
        project_count: u64,
        total_cost: Decimal,
        total_direct_jobs: u64,
        total_beneficiaries: u64,
    ) -> Self {
        self.project_count = project_count;
        self.total_cost = non_negative_cost(Some(total_cost));
        self.total_direct_jobs = total_direct_jobs;
        self.total_beneficiaries = total_beneficiaries;
        self
    }
}

impl From<RawStatRow> for StatRow {
    fn from(raw: RawStatRow) -> Self {
        Self {
            axis_id: raw.axis_id,
            axis_label: raw.axis_label.unwrap_or_default(),
            pole_id: raw.pole_id,
            pole_label: raw.pole_label,
            sector_id: raw.sector_id,
            sector_label: raw.sector_label,
            objective_id: raw.objective_id,
            objective_label: raw.objective_label,
            project_count: non_negative_count(raw.project_count),
            total_cost: non_negative_cost(raw.total_cost),
            total_direct_jobs: non_negative_count(raw.total_direct_jobs),
            total_beneficiaries: non_negative_count(raw.total_beneficiaries),
        }
    }
}

fn non_negative_count(value: Option<i64>) -> u64 {
    value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

fn non_negative_cost(value: Option<Decimal>) -> Decimal {
    match value {
        Some(cost) if cost > Decimal::ZERO => cost,
        _ => Decimal::ZERO,
    }
}
