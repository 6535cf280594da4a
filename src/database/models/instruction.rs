use serde::Serialize;
use sqlx::FromRow;

/// Counters behind the governor's instruction panel.
///
/// `urgent` counts instructions past their deadline that are not executed,
/// whatever their recorded status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InstructionStats {
    pub total: u64,
    pub executed: u64,
    pub in_progress: u64,
    pub overdue: u64,
    pub urgent: u64,
}

#[derive(Debug, Default, FromRow)]
pub struct RawInstructionStats {
    pub total: Option<i64>,
    pub executed: Option<i64>,
    pub in_progress: Option<i64>,
    pub overdue: Option<i64>,
    pub urgent: Option<i64>,
}

impl From<RawInstructionStats> for InstructionStats {
    fn from(raw: RawInstructionStats) -> Self {
        let count = |value: Option<i64>| value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0);
        Self {
            total: count(raw.total),
            executed: count(raw.executed),
            in_progress: count(raw.in_progress),
            overdue: count(raw.overdue),
            urgent: count(raw.urgent),
        }
    }
}
