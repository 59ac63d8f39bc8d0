use crate::{ChecklistRecord, DomainError};
use async_trait::async_trait;

/// Repository interface for the flat checklist row store
///
/// This trait defines the contract for reading and appending checklist rows.
/// Implementations should be provided in the infrastructure layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChecklistRepository: Send + Sync {
    /// Fetch up to `limit` rows starting at `offset`, in insertion order.
    ///
    /// An offset at or past the end of the store returns an empty page, not
    /// an error.
    async fn fetch_range(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ChecklistRecord>, DomainError>;

    /// Append one row to the store.
    async fn insert(&self, record: &ChecklistRecord) -> Result<(), DomainError>;
}
