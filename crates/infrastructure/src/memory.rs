use std::sync::Mutex;

use async_trait::async_trait;

use domain::{
    ChecklistRecord, ChecklistRepository, DomainError, ProductionEntry, ProductionLogRepository,
};

/// In-memory row store backing both repositories, for local development and
/// tests. Rows keep insertion order, matching the database tables.
#[derive(Debug, Default)]
pub struct InMemoryRowStore {
    checklists: Mutex<Vec<ChecklistRecord>>,
    production: Mutex<Vec<ProductionEntry>>,
}

impl InMemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a production-log entry, standing in for the line system that
    /// writes the real table.
    pub fn log_production(&self, entry: ProductionEntry) {
        self.production.lock().unwrap().push(entry);
    }

    pub fn checklist_count(&self) -> usize {
        self.checklists.lock().unwrap().len()
    }
}

#[async_trait]
impl ChecklistRepository for InMemoryRowStore {
    async fn fetch_range(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ChecklistRecord>, DomainError> {
        let rows = self.checklists.lock().unwrap();
        let start = (offset.max(0) as usize).min(rows.len());
        let end = (start + limit.max(0) as usize).min(rows.len());
        Ok(rows[start..end].to_vec())
    }

    async fn insert(&self, record: &ChecklistRecord) -> Result<(), DomainError> {
        self.checklists.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[async_trait]
impl ProductionLogRepository for InMemoryRowStore {
    async fn fetch_latest(&self, limit: i64) -> Result<Vec<ProductionEntry>, DomainError> {
        let entries = self.production.lock().unwrap();
        let take = (limit.max(0) as usize).min(entries.len());
        Ok(entries[entries.len() - take..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domain::{ChecklistItem, ItemStatus, SerialNumber};

    fn record(serial: &str) -> ChecklistRecord {
        ChecklistRecord {
            serial: SerialNumber::new(serial).unwrap(),
            item: ChecklistItem::Etiqueta,
            status: ItemStatus::Conforme,
            observation: None,
            inspector: "Maria".to_string(),
            recorded_at: Utc::now(),
            product_rejected: false,
            reinspection: false,
            batch_id: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_range_clamps_to_contents() {
        let store = InMemoryRowStore::new();
        for i in 0..5 {
            store.insert(&record(&format!("S{i}"))).await.unwrap();
        }

        let page = store.fetch_range(3, 10).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].serial.as_str(), "S3");

        let past_end = store.fetch_range(50, 10).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_latest_trims_to_newest_but_keeps_log_order() {
        let store = InMemoryRowStore::new();
        let base = Utc::now();
        for i in 0..4 {
            store.log_production(ProductionEntry::new(
                SerialNumber::new(format!("S{i}")).unwrap(),
                base + Duration::minutes(i),
            ));
        }

        // The two oldest entries fall outside the window; the survivors stay
        // in the order they were logged.
        let latest = store.fetch_latest(2).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].serial.as_str(), "S2");
        assert_eq!(latest[1].serial.as_str(), "S3");
    }
}
