use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::checklist::{ChecklistItem, ItemStatus};
use crate::plant_time;
use crate::serial::SerialNumber;

/// One stored checklist row: a single item verdict of a single submission.
///
/// Rows are insert-only. A full submission persists 10 of these sharing
/// serial, timestamp, inspector, and both flags; `batch_id` stamps that
/// membership explicitly on new rows, while rows written before the column
/// existed carry `None` and are regrouped by the shared fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistRecord {
    pub serial: SerialNumber,
    pub item: ChecklistItem,
    pub status: ItemStatus,
    pub observation: Option<String>,
    pub inspector: String,
    pub recorded_at: DateTime<Utc>,
    pub product_rejected: bool,
    pub reinspection: bool,
    pub batch_id: Option<Uuid>,
}

impl ChecklistRecord {
    /// Calendar date of this row on the plant clock
    pub fn plant_date(&self) -> NaiveDate {
        plant_time::local_date(self.recorded_at)
    }
}
