mod entry;
mod repository;

pub use entry::ProductionEntry;
pub use repository::ProductionLogRepository;
