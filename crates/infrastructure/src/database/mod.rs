mod checklist_repository;
mod production_repository;

pub use checklist_repository::PostgresChecklistRepository;
pub use production_repository::PostgresProductionLogRepository;
