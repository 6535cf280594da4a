pub mod manager;
pub mod models;
pub mod stats_repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use stats_repository::{PgStatsRepository, StatsRepository};
