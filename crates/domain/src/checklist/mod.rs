mod answer;
mod batch;
mod item;
mod record;
mod repository;
mod status;

pub use answer::{AnswerSheet, CompletedAnswer, CompletedSheet, ItemAnswer};
pub use batch::ChecklistBatch;
pub use item::{ChecklistItem, join_keys};
pub use record::ChecklistRecord;
pub use repository::ChecklistRepository;
pub use status::ItemStatus;
