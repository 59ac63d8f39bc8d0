use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::checklist::{ChecklistItem, ChecklistRecord, CompletedAnswer, CompletedSheet};
use crate::serial::SerialNumber;

/// One logical checklist submission: the 10 item verdicts that were (or will
/// be) persisted as 10 flat rows sharing the batch metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistBatch {
    batch_id: Option<Uuid>,
    serial: SerialNumber,
    inspector: String,
    recorded_at: DateTime<Utc>,
    product_rejected: bool,
    reinspection: bool,
    answers: Vec<CompletedAnswer>,
}

impl ChecklistBatch {
    /// Assemble a new batch from a validated sheet (write path).
    ///
    /// The rejection verdict is derived here and nowhere else: the unit is
    /// rejected exactly when any item came back Não Conforme.
    pub fn assemble(
        serial: SerialNumber,
        sheet: CompletedSheet,
        inspector: impl Into<String>,
        reinspection: bool,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            batch_id: Some(Uuid::new_v4()),
            serial,
            inspector: inspector.into(),
            recorded_at,
            product_rejected: sheet.has_rejection(),
            reinspection,
            answers: sheet.answers().to_vec(),
        }
    }

    /// Flatten into the stored representation: one row per answered item,
    /// all sharing serial, timestamp, inspector, flags, and batch id.
    pub fn rows(&self) -> Vec<ChecklistRecord> {
        self.answers
            .iter()
            .map(|answer| ChecklistRecord {
                serial: self.serial.clone(),
                item: answer.item,
                status: answer.status,
                observation: answer.model.clone(),
                inspector: self.inspector.clone(),
                recorded_at: self.recorded_at,
                product_rejected: self.product_rejected,
                reinspection: self.reinspection,
                batch_id: self.batch_id,
            })
            .collect()
    }

    /// Regroup flat rows into batches (read path).
    ///
    /// Rows with a batch id group by it; legacy rows group by the shared
    /// (serial, timestamp, inspector) triple. Result is ordered by timestamp
    /// ascending. Partial batches (an accepted failure mode of the store)
    /// come back with fewer than 10 answers.
    pub fn group(rows: &[ChecklistRecord]) -> Vec<ChecklistBatch> {
        let mut groups: HashMap<GroupKey, ChecklistBatch> = HashMap::new();

        for row in rows {
            let key = match row.batch_id {
                Some(id) => GroupKey::Id(id),
                None => GroupKey::Legacy(
                    row.serial.clone(),
                    row.recorded_at,
                    row.inspector.clone(),
                ),
            };

            let batch = groups.entry(key).or_insert_with(|| ChecklistBatch {
                batch_id: row.batch_id,
                serial: row.serial.clone(),
                inspector: row.inspector.clone(),
                recorded_at: row.recorded_at,
                product_rejected: row.product_rejected,
                reinspection: row.reinspection,
                answers: Vec::new(),
            });
            batch.answers.push(CompletedAnswer {
                item: row.item,
                status: row.status,
                model: row.observation.clone(),
            });
        }

        let mut batches: Vec<ChecklistBatch> = groups.into_values().collect();
        batches.sort_by_key(|b| b.recorded_at);
        batches
    }

    pub fn batch_id(&self) -> Option<Uuid> {
        self.batch_id
    }

    pub fn serial(&self) -> &SerialNumber {
        &self.serial
    }

    pub fn inspector(&self) -> &str {
        &self.inspector
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn product_rejected(&self) -> bool {
        self.product_rejected
    }

    pub fn reinspection(&self) -> bool {
        self.reinspection
    }

    pub fn answers(&self) -> &[CompletedAnswer] {
        &self.answers
    }

    pub fn answer_for(&self, item: ChecklistItem) -> Option<&CompletedAnswer> {
        self.answers.iter().find(|a| a.item == item)
    }
}

#[derive(PartialEq, Eq, Hash)]
enum GroupKey {
    Id(Uuid),
    Legacy(SerialNumber, DateTime<Utc>, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::{AnswerSheet, ItemStatus};
    use chrono::TimeZone;

    fn sheet(failing: &[ChecklistItem]) -> CompletedSheet {
        let mut sheet = AnswerSheet::new();
        for item in ChecklistItem::ALL {
            let status = if failing.contains(&item) {
                ItemStatus::NaoConforme
            } else {
                ItemStatus::Conforme
            };
            sheet.set_status(item, status);
            if item.requires_model() {
                sheet.set_model(item, item.model_options().unwrap()[0]);
            }
        }
        sheet.validate().unwrap()
    }

    fn t(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, hour, min, 0).unwrap()
    }

    #[test]
    fn test_assemble_produces_ten_rows_with_shared_metadata() {
        let batch = ChecklistBatch::assemble(
            SerialNumber::new("S1").unwrap(),
            sheet(&[]),
            "Maria",
            false,
            t(12, 0),
        );

        let rows = batch.rows();
        assert_eq!(rows.len(), 10);
        let first = &rows[0];
        assert!(first.batch_id.is_some());
        for row in &rows {
            assert_eq!(row.serial.as_str(), "S1");
            assert_eq!(row.inspector, "Maria");
            assert_eq!(row.recorded_at, t(12, 0));
            assert_eq!(row.batch_id, first.batch_id);
            assert!(!row.product_rejected);
            assert!(!row.reinspection);
        }
    }

    #[test]
    fn test_rejection_verdict_follows_any_nao_conforme() {
        let passing = ChecklistBatch::assemble(
            SerialNumber::new("S1").unwrap(),
            sheet(&[]),
            "Maria",
            false,
            t(9, 0),
        );
        assert!(!passing.product_rejected());

        let failing = ChecklistBatch::assemble(
            SerialNumber::new("S1").unwrap(),
            sheet(&[ChecklistItem::Solda]),
            "Maria",
            false,
            t(9, 5),
        );
        assert!(failing.product_rejected());
        assert!(failing.rows().iter().all(|r| r.product_rejected));
    }

    #[test]
    fn test_group_reassembles_written_batches() {
        let a = ChecklistBatch::assemble(
            SerialNumber::new("S1").unwrap(),
            sheet(&[]),
            "Maria",
            false,
            t(8, 0),
        );
        let b = ChecklistBatch::assemble(
            SerialNumber::new("S1").unwrap(),
            sheet(&[ChecklistItem::Rodagem]),
            "Catia",
            false,
            t(10, 0),
        );

        let mut rows = a.rows();
        rows.extend(b.rows());

        let grouped = ChecklistBatch::group(&rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].recorded_at(), t(8, 0));
        assert_eq!(grouped[1].recorded_at(), t(10, 0));
        assert_eq!(grouped[1].inspector(), "Catia");
        assert!(grouped[1].product_rejected());
        assert_eq!(grouped[0].answers().len(), 10);
    }

    #[test]
    fn test_group_falls_back_to_shared_fields_for_legacy_rows() {
        // Same serial and inspector, two distinct timestamps, no batch ids.
        let mut rows = Vec::new();
        for (ts, status) in [(t(8, 0), ItemStatus::Conforme), (t(9, 0), ItemStatus::NaoConforme)] {
            for item in [ChecklistItem::Etiqueta, ChecklistItem::Solda] {
                rows.push(ChecklistRecord {
                    serial: SerialNumber::new("S2").unwrap(),
                    item,
                    status,
                    observation: None,
                    inspector: "Vera".to_string(),
                    recorded_at: ts,
                    product_rejected: status.is_rejection(),
                    reinspection: false,
                    batch_id: None,
                });
            }
        }

        let grouped = ChecklistBatch::group(&rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].answers().len(), 2);
        assert!(grouped[0].batch_id().is_none());
        assert!(grouped[1].product_rejected());
    }

    #[test]
    fn test_answer_for_finds_item() {
        let batch = ChecklistBatch::assemble(
            SerialNumber::new("S1").unwrap(),
            sheet(&[]),
            "Maria",
            true,
            t(11, 0),
        );
        assert!(batch.reinspection());
        let answer = batch.answer_for(ChecklistItem::SistemaAtuacao).unwrap();
        assert_eq!(answer.model.as_deref(), Some("Spring"));
    }
}
