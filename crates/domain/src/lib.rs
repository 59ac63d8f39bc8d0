//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Value Objects (SerialNumber, ChecklistItem, ItemStatus)
//! - The checklist aggregate (AnswerSheet, ChecklistBatch) and its flat row form
//! - Operator session state machine with the submission permit
//! - Repository interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Business rules enforced at domain level
//! - Rich domain models with behavior
//! - Testable in isolation

pub mod checklist;
pub mod error;
pub mod plant_time;
pub mod production;
pub mod serial;
pub mod session;

// Re-export commonly used types
pub use checklist::{
    AnswerSheet, ChecklistBatch, ChecklistItem, ChecklistRecord, ChecklistRepository,
    CompletedAnswer, CompletedSheet, ItemAnswer, ItemStatus,
};
pub use error::{DomainError, Result};
pub use production::{ProductionEntry, ProductionLogRepository};
pub use serial::SerialNumber;
pub use session::{CredentialTable, Session, SubmissionPermit};
