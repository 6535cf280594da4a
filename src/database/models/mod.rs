pub mod instruction;
pub mod pagination;
pub mod project;

pub use instruction::{InstructionStats, RawInstructionStats};
pub use pagination::{PageRequest, Pagination, ProjectPage};
pub use project::ProjectSummary;
