mod common;

use rust_decimal::Decimal;

use common::{money, sample_rows};
use pdti_stats_api::stats::{
    aggregate, axis_shares, percentage_of, Hierarchy, RollupStats, StatRow, OBJECTIVE_PLACEHOLDER, SECTOR_PLACEHOLDER,
};

fn leaf(axis: i64, sector: Option<i64>, objective: Option<i64>, count: u64, cost: Decimal) -> StatRow {
    StatRow::new(axis, format!("Axe {}", axis))
        .with_sector(sector, sector.map(|_| "Secteur"))
        .with_objective(objective, objective.map(|_| "Objectif"))
        .with_measures(count, cost, count * 2, count * 10)
}

fn row_total(rows: &[StatRow]) -> RollupStats {
    rows.iter().map(RollupStats::from_row).sum()
}

/// Axis/sector/objective ids with their rolled-up stats, in a canonical order.
fn shape(hierarchy: &Hierarchy) -> Vec<(i64, Option<i64>, Option<i64>, RollupStats)> {
    let mut shape: Vec<_> = hierarchy
        .axes
        .iter()
        .flat_map(|axis| {
            axis.sectors.iter().flat_map(move |sector| {
                sector
                    .objectives
                    .iter()
                    .map(move |objective| (axis.axis_id, sector.sector_id, objective.objective_id, objective.measures))
            })
        })
        .collect();
    shape.sort_by_key(|(axis, sector, objective, _)| (*axis, *sector, *objective));
    shape
}

#[test]
fn two_objectives_roll_up_to_one_axis() {
    let rows = vec![
        StatRow::new(1, "A")
            .with_sector(Some(10), Some("S"))
            .with_objective(Some(100), Some("O1"))
            .with_measures(2, money(50, 1), 3, 40),
        StatRow::new(1, "A")
            .with_sector(Some(10), Some("S"))
            .with_objective(Some(101), Some("O2"))
            .with_measures(1, money(20, 1), 1, 10),
    ];

    let hierarchy = aggregate(&rows);

    assert_eq!(hierarchy.axes.len(), 1);
    let axis = &hierarchy.axes[0];
    assert_eq!(axis.sectors.len(), 1);
    assert_eq!(axis.sectors[0].objectives.len(), 2);

    let expected = RollupStats {
        project_count: 3,
        total_cost: money(70, 1),
        total_direct_jobs: 4,
        total_beneficiaries: 50,
    };
    assert_eq!(axis.sectors[0].stats, expected);
    assert_eq!(axis.stats, expected);
    assert_eq!(hierarchy.total_stats, expected);
}

#[test]
fn totals_are_conserved_with_duplicate_keys() {
    let rows = vec![
        leaf(1, Some(1), Some(1), 1, money(1, 0)),
        leaf(1, Some(1), Some(1), 2, money(25, 1)),
        leaf(1, None, None, 3, money(0, 0)),
        leaf(2, Some(2), None, 4, money(125, 2)),
        leaf(1, None, None, 5, money(7, 0)),
    ];

    let hierarchy = aggregate(&rows);

    assert_eq!(hierarchy.total_stats, row_total(&rows));
    let axis_sum: RollupStats = hierarchy.axes.iter().map(|axis| axis.stats).sum();
    assert_eq!(axis_sum, hierarchy.total_stats);
    for axis in &hierarchy.axes {
        let sector_sum: RollupStats = axis.sectors.iter().map(|sector| sector.stats).sum();
        assert_eq!(sector_sum, axis.stats);
        for sector in &axis.sectors {
            let objective_sum: RollupStats = sector.objectives.iter().map(|objective| objective.measures).sum();
            assert_eq!(objective_sum, sector.stats);
        }
    }

    // (1, 1, 1) and (1, None, None) each appear twice.
    assert_eq!(shape(&hierarchy).len(), 3);
}

#[test]
fn input_order_does_not_change_the_tree() {
    let rows = sample_rows();
    let mut reversed = rows.clone();
    reversed.reverse();
    let mut interleaved: Vec<StatRow> = rows.iter().step_by(2).cloned().collect();
    interleaved.extend(rows.iter().skip(1).step_by(2).cloned());

    let expected = aggregate(&rows);

    for permutation in [&reversed, &interleaved] {
        let hierarchy = aggregate(permutation);
        assert_eq!(shape(&hierarchy), shape(&expected));
        assert_eq!(hierarchy.total_stats, expected.total_stats);
    }
}

#[test]
fn rows_without_sector_share_one_node() {
    let rows = vec![
        leaf(4, None, Some(1), 1, money(1, 0)),
        leaf(4, Some(9), Some(2), 1, money(1, 0)),
        leaf(4, None, Some(3), 1, money(1, 0)),
        leaf(4, None, None, 1, money(1, 0)),
    ];

    let hierarchy = aggregate(&rows);
    let sectors = &hierarchy.axes[0].sectors;

    assert_eq!(sectors.len(), 2);
    assert_eq!(sectors[0].sector_id, None);
    assert_eq!(sectors[0].sector_label, SECTOR_PLACEHOLDER);
    assert_eq!(sectors[0].objectives.len(), 3);
    assert_eq!(sectors[0].stats.project_count, 3);
    assert_eq!(sectors[0].objectives[2].objective_label, OBJECTIVE_PLACEHOLDER);
}

#[test]
fn empty_input_gives_empty_tree() {
    let hierarchy = aggregate(&[] as &[StatRow]);

    assert!(hierarchy.is_empty());
    assert_eq!(hierarchy.total_stats, RollupStats::default());
    assert!(axis_shares(&hierarchy).is_empty());
}

#[test]
fn shares_add_up_and_survive_a_zero_budget() {
    let hierarchy = aggregate(&sample_rows());
    let shares = axis_shares(&hierarchy);

    assert_eq!(shares.len(), 3);
    assert!(shares.iter().all(|share| share.global_total_cost == money(380, 1)));
    assert_eq!(shares[2].percentage, "0.00");

    let free = vec![leaf(1, None, None, 2, Decimal::ZERO), leaf(2, None, None, 1, Decimal::ZERO)];
    let shares = axis_shares(&aggregate(&free));
    assert!(shares.iter().all(|share| share.percentage == "0.00"));
    assert_eq!(percentage_of(money(1, 0), money(3, 0)), "33.33");
}
