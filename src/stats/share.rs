use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::hierarchy::{Hierarchy, RollupStats};

/// An axis with its share of the overall budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisShare {
    pub axis_id: i64,
    pub axis_label: String,
    pub pole_label: Option<String>,
    pub stats: RollupStats,
    pub percentage: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub global_total_cost: Decimal,
}

/// `part / total * 100`, two decimals, `"0.00"` when there is no total.
pub fn percentage_of(part: Decimal, total: Decimal) -> String {
    if total <= Decimal::ZERO {
        return "0.00".to_string();
    }

    let ratio = part
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    format!("{:.2}", ratio)
}

pub fn axis_shares(hierarchy: &Hierarchy) -> Vec<AxisShare> {
    let total = hierarchy.total_stats.total_cost;

    hierarchy
        .axes
        .iter()
        .map(|axis| AxisShare {
            axis_id: axis.axis_id,
            axis_label: axis.axis_label.clone(),
            pole_label: axis.pole_label.clone(),
            stats: axis.stats,
            percentage: percentage_of(axis.stats.total_cost, total),
            global_total_cost: total,
        })
        .collect()
}
