//! Application layer - Use cases and business workflows

pub mod inspection;
pub mod loader;
pub mod reinspection;
pub mod selection;

pub use inspection::InspectionService;
pub use loader::ChecklistLoader;
pub use reinspection::{
    NotEligibleReason, PreparedReinspection, ReinspectionDraft, ReinspectionService,
    prepare_reinspection,
};
pub use selection::{available_for_inspection, available_for_reinspection};
