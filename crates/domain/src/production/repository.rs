use crate::{DomainError, ProductionEntry};
use async_trait::async_trait;

/// Repository interface for the production log
///
/// The log is read-only from this application's point of view; entries are
/// written by the production line system.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductionLogRepository: Send + Sync {
    /// Fetch the most recent `limit` entries, in the order they were logged.
    ///
    /// The limit trims the oldest entries; the rows that survive keep the
    /// table's insertion order, which the selection flow relies on.
    async fn fetch_latest(&self, limit: i64) -> Result<Vec<ProductionEntry>, DomainError>;
}
