use std::collections::HashMap;
use std::hash::Hash;
use std::iter::Sum;
use std::ops::AddAssign;

use rust_decimal::Decimal;
use serde::Serialize;

use super::row::StatRow;

/// Label given to the synthetic sector that collects rows without a sector.
pub const SECTOR_PLACEHOLDER: &str = "Sector not defined";

/// Label given to the synthetic objective that collects rows without an objective.
pub const OBJECTIVE_PLACEHOLDER: &str = "Objective not defined";

/// Rolled-up measures for any node of the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupStats {
    pub project_count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    pub total_direct_jobs: u64,
    pub total_beneficiaries: u64,
}

impl RollupStats {
    pub fn from_row(row: &StatRow) -> Self {
        Self {
            project_count: row.project_count,
            total_cost: row.total_cost,
            total_direct_jobs: row.total_direct_jobs,
            total_beneficiaries: row.total_beneficiaries,
        }
    }
}

/// Saturating: measures are non-negative, so a sum past the type's range
/// pins at its maximum.
impl AddAssign for RollupStats {
    fn add_assign(&mut self, other: Self) {
        self.project_count = self.project_count.saturating_add(other.project_count);
        self.total_cost = self.total_cost.checked_add(other.total_cost).unwrap_or(Decimal::MAX);
        self.total_direct_jobs = self.total_direct_jobs.saturating_add(other.total_direct_jobs);
        self.total_beneficiaries = self.total_beneficiaries.saturating_add(other.total_beneficiaries);
    }
}

impl Sum for RollupStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, stats| {
            acc += stats;
            acc
        })
    }
}

impl<'a> Sum<&'a RollupStats> for RollupStats {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveLeaf {
    pub objective_id: Option<i64>,
    pub objective_label: String,
    #[serde(flatten)]
    pub measures: RollupStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorNode {
    pub sector_id: Option<i64>,
    pub sector_label: String,
    pub objectives: Vec<ObjectiveLeaf>,
    pub stats: RollupStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisNode {
    pub axis_id: i64,
    pub axis_label: String,
    pub pole_label: Option<String>,
    pub sectors: Vec<SectorNode>,
    pub stats: RollupStats,
}

/// Result of `aggregate`: axes in first-seen order plus the grand total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hierarchy {
    pub axes: Vec<AxisNode>,
    pub total_stats: RollupStats,
}

impl Hierarchy {
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn axis(&self, axis_id: i64) -> Option<&AxisNode> {
        self.axes.iter().find(|axis| axis.axis_id == axis_id)
    }
}

/// Builds the axis → sector → objective tree from grouped statistic rows.
///
/// Rows may arrive in any order. Nodes are keyed by id (a `None` id is its
/// own key, so every row without a sector lands in the same placeholder
/// sector of its axis), keep the order in which they were first seen, and
/// rows that map to the same leaf are summed. Rollups are computed once,
/// bottom-up, after every row has been consumed.
pub fn aggregate<'a, I>(rows: I) -> Hierarchy
where
    I: IntoIterator<Item = &'a StatRow>,
{
    let mut axes: Ordered<i64, AxisBuilder> = Ordered::default();

    for row in rows {
        let axis = axes.get_or_insert_with(row.axis_id, || AxisBuilder {
            axis_id: row.axis_id,
            axis_label: row.axis_label.clone(),
            pole_label: row.pole_label.clone(),
            sectors: Ordered::default(),
        });
        if axis.pole_label.is_none() {
            axis.pole_label = row.pole_label.clone();
        }

        let sector = axis.sectors.get_or_insert_with(row.sector_id, || SectorBuilder {
            sector_id: row.sector_id,
            sector_label: label_or(row.sector_id, row.sector_label.as_deref(), SECTOR_PLACEHOLDER),
            objectives: Ordered::default(),
        });

        let objective = sector.objectives.get_or_insert_with(row.objective_id, || ObjectiveLeaf {
            objective_id: row.objective_id,
            objective_label: label_or(
                row.objective_id,
                row.objective_label.as_deref(),
                OBJECTIVE_PLACEHOLDER,
            ),
            measures: RollupStats::default(),
        });
        objective.measures += RollupStats::from_row(row);
    }

    let axes: Vec<AxisNode> = axes.into_values().map(AxisBuilder::finish).collect();
    let total_stats: RollupStats = axes.iter().map(|axis| &axis.stats).sum();

    Hierarchy { axes, total_stats }
}

fn label_or(id: Option<i64>, label: Option<&str>, placeholder: &str) -> String {
    match (id, label) {
        (Some(_), Some(label)) if !label.trim().is_empty() => label.to_string(),
        _ => placeholder.to_string(),
    }
}

struct AxisBuilder {
    axis_id: i64,
    axis_label: String,
    pole_label: Option<String>,
    sectors: Ordered<Option<i64>, SectorBuilder>,
}

impl AxisBuilder {
    fn finish(self) -> AxisNode {
        let sectors: Vec<SectorNode> = self.sectors.into_values().map(SectorBuilder::finish).collect();
        let stats: RollupStats = sectors.iter().map(|sector| &sector.stats).sum();
        AxisNode {
            axis_id: self.axis_id,
            axis_label: self.axis_label,
            pole_label: self.pole_label,
            sectors,
            stats,
        }
    }
}

struct SectorBuilder {
    sector_id: Option<i64>,
    sector_label: String,
    objectives: Ordered<Option<i64>, ObjectiveLeaf>,
}

impl SectorBuilder {
    fn finish(self) -> SectorNode {
        let objectives = self.objectives.into_values().collect::<Vec<_>>();
        let stats: RollupStats = objectives.iter().map(|objective| &objective.measures).sum();
        SectorNode {
            sector_id: self.sector_id,
            sector_label: self.sector_label,
            objectives,
            stats,
        }
    }
}

/// Insertion-ordered map used at each level of the tree.
struct Ordered<K, V> {
    index: HashMap<K, usize>,
    values: Vec<V>,
}

impl<K, V> Default for Ordered<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            values: Vec::new(),
        }
    }
}

impl<K: Eq + Hash, V> Ordered<K, V> {
    fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        let values = &mut self.values;
        let position = *self.index.entry(key).or_insert_with(|| {
            values.push(make());
            values.len() - 1
        });
        &mut self.values[position]
    }

    fn into_values(self) -> impl Iterator<Item = V> {
        self.values.into_iter()
    }
}
