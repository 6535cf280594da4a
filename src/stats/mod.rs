//! Project statistics rolled up along the program hierarchy
//! (axis → sector → objective).

pub mod filter;
pub mod hierarchy;
pub mod row;
pub mod share;

pub use filter::RowFilter;
pub use hierarchy::{
    aggregate, AxisNode, Hierarchy, ObjectiveLeaf, RollupStats, SectorNode, OBJECTIVE_PLACEHOLDER,
    SECTOR_PLACEHOLDER,
};
pub use row::{RawStatRow, StatRow};
pub use share::{axis_shares, percentage_of, AxisShare};
