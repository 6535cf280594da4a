pub mod axes;
pub mod hierarchy;
pub mod instructions;
pub mod projects;
pub mod summary;

pub use axes::{axes_get, axis_projects_get};
pub use hierarchy::{hierarchy_get, stats_get};
pub use instructions::instructions_get;
pub use projects::projects_get;
pub use summary::summary_get;
