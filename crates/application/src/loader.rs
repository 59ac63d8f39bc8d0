use std::sync::Arc;

use domain::{
    ChecklistRecord, ChecklistRepository, DomainError, ProductionEntry, ProductionLogRepository,
};

/// Page size for the full checklist table scan.
pub const CHECKLIST_PAGE_SIZE: i64 = 1000;

/// Cap on production-log entries fetched per load.
///
/// Known limitation: on a day with more than 1000 logged units the oldest
/// entries fall outside the window and are never offered for inspection.
pub const PRODUCTION_FETCH_LIMIT: i64 = 1000;

/// Loads the working dataset for the selection and reinspection flows.
pub struct ChecklistLoader {
    checklists: Arc<dyn ChecklistRepository>,
    production: Arc<dyn ProductionLogRepository>,
}

impl ChecklistLoader {
    pub fn new(
        checklists: Arc<dyn ChecklistRepository>,
        production: Arc<dyn ProductionLogRepository>,
    ) -> Self {
        Self {
            checklists,
            production,
        }
    }

    /// Fetch every checklist row, page by page, in insertion order.
    ///
    /// A page shorter than [`CHECKLIST_PAGE_SIZE`] ends the scan; a store
    /// holding an exact multiple of the page size costs one extra empty
    /// fetch.
    pub async fn load_checklists(&self) -> Result<Vec<ChecklistRecord>, DomainError> {
        let mut rows = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .checklists
                .fetch_range(offset, CHECKLIST_PAGE_SIZE)
                .await?;
            let fetched = page.len() as i64;
            rows.extend(page);

            if fetched < CHECKLIST_PAGE_SIZE {
                break;
            }
            offset += CHECKLIST_PAGE_SIZE;
        }

        tracing::debug!(rows = rows.len(), "Checklist table loaded");
        Ok(rows)
    }

    /// Fetch the most recent production-log entries, in log order.
    pub async fn load_production_entries(&self) -> Result<Vec<ProductionEntry>, DomainError> {
        let entries = self.production.fetch_latest(PRODUCTION_FETCH_LIMIT).await?;
        tracing::debug!(entries = entries.len(), "Production log loaded");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use domain::{ChecklistItem, ItemStatus, SerialNumber};
    use std::sync::Mutex;

    struct PagedRepo {
        rows: Vec<ChecklistRecord>,
        fetch_calls: Mutex<Vec<(i64, i64)>>,
    }

    impl PagedRepo {
        fn with_rows(count: usize) -> Self {
            let rows = (0..count)
                .map(|i| ChecklistRecord {
                    serial: SerialNumber::new(format!("S{i}")).unwrap(),
                    item: ChecklistItem::Etiqueta,
                    status: ItemStatus::Conforme,
                    observation: None,
                    inspector: "Maria".to_string(),
                    recorded_at: Utc::now(),
                    product_rejected: false,
                    reinspection: false,
                    batch_id: None,
                })
                .collect();
            Self {
                rows,
                fetch_calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChecklistRepository for PagedRepo {
        async fn fetch_range(
            &self,
            offset: i64,
            limit: i64,
        ) -> Result<Vec<ChecklistRecord>, DomainError> {
            self.fetch_calls.lock().unwrap().push((offset, limit));
            let start = (offset as usize).min(self.rows.len());
            let end = (start + limit as usize).min(self.rows.len());
            Ok(self.rows[start..end].to_vec())
        }

        async fn insert(&self, _record: &ChecklistRecord) -> Result<(), DomainError> {
            unimplemented!("read-only fake")
        }
    }

    struct EmptyProduction;

    #[async_trait]
    impl ProductionLogRepository for EmptyProduction {
        async fn fetch_latest(&self, _limit: i64) -> Result<Vec<ProductionEntry>, DomainError> {
            Ok(Vec::new())
        }
    }

    fn loader_over(rows: usize) -> (ChecklistLoader, Arc<PagedRepo>) {
        let repo = Arc::new(PagedRepo::with_rows(rows));
        let loader = ChecklistLoader::new(repo.clone(), Arc::new(EmptyProduction));
        (loader, repo)
    }

    #[tokio::test]
    async fn test_load_checklists_2500_rows_takes_three_fetches() {
        let (loader, repo) = loader_over(2500);

        let rows = loader.load_checklists().await.unwrap();

        assert_eq!(rows.len(), 2500);
        let calls = repo.fetch_calls.lock().unwrap().clone();
        assert_eq!(calls, vec![(0, 1000), (1000, 1000), (2000, 1000)]);

        // No duplicates, no gaps.
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.serial.as_str(), format!("S{i}"));
        }
    }

    #[tokio::test]
    async fn test_load_checklists_empty_store() {
        let (loader, repo) = loader_over(0);

        let rows = loader.load_checklists().await.unwrap();

        assert!(rows.is_empty());
        assert_eq!(repo.fetch_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_load_checklists_exact_page_multiple_stops_on_empty_page() {
        let (loader, repo) = loader_over(1000);

        let rows = loader.load_checklists().await.unwrap();

        assert_eq!(rows.len(), 1000);
        let calls = repo.fetch_calls.lock().unwrap().clone();
        assert_eq!(calls, vec![(0, 1000), (1000, 1000)]);
    }
}
