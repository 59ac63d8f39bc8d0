use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use domain::{
    AnswerSheet, ChecklistBatch, ChecklistItem, ChecklistRecord, ChecklistRepository, DomainError,
    ItemStatus, SerialNumber, Session, plant_time,
};

use crate::inspection::store_batch;

/// Why a serial has no reinspection to offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotEligibleReason {
    /// The serial has no first-inspection batch at all.
    NoPriorInspection,
    /// First inspections exist, but none dated today on the plant clock.
    NoInspectionToday,
}

/// Pre-filled form state for a reinspection, derived from the baseline batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ReinspectionDraft {
    pub serial: SerialNumber,
    pub baseline_recorded_at: DateTime<Utc>,
    pub baseline_inspector: String,
    pub sheet: AnswerSheet,
}

/// Outcome of preparing a reinspection. Not being eligible is an answer for
/// the caller to render, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedReinspection {
    Ready(ReinspectionDraft),
    NotEligible(NotEligibleReason),
}

/// Locate the baseline batch for `serial` and derive the pre-filled sheet.
///
/// The baseline is the most recent first-inspection batch recorded today on
/// the plant clock. Reinspection batches never serve as baselines.
pub fn prepare_reinspection(
    rows: &[ChecklistRecord],
    serial: &SerialNumber,
    today: NaiveDate,
) -> PreparedReinspection {
    let first_inspections: Vec<ChecklistBatch> = ChecklistBatch::group(rows)
        .into_iter()
        .filter(|b| b.serial() == serial && !b.reinspection())
        .collect();

    if first_inspections.is_empty() {
        return PreparedReinspection::NotEligible(NotEligibleReason::NoPriorInspection);
    }

    let baseline = first_inspections
        .into_iter()
        .filter(|b| plant_time::local_date(b.recorded_at()) == today)
        .max_by_key(|b| b.recorded_at());
    let Some(baseline) = baseline else {
        return PreparedReinspection::NotEligible(NotEligibleReason::NoInspectionToday);
    };

    let mut sheet = AnswerSheet::new();
    for item in ChecklistItem::ALL {
        match baseline.answer_for(item) {
            Some(answer) => {
                sheet.set_status(item, answer.status);
                // Carry the prior model over only while it is still a valid
                // option for the item.
                if let (Some(options), Some(model)) =
                    (item.model_options(), answer.model.as_deref())
                {
                    if options.contains(&model) {
                        sheet.set_model(item, model);
                    }
                }
            }
            // Partial legacy batches may miss items; those start out as N/A.
            None => sheet.set_status(item, ItemStatus::NaoAplicavel),
        }
    }

    PreparedReinspection::Ready(ReinspectionDraft {
        serial: serial.clone(),
        baseline_recorded_at: baseline.recorded_at(),
        baseline_inspector: baseline.inspector().to_string(),
        sheet,
    })
}

/// Runs the reinspection submit workflow.
pub struct ReinspectionService {
    checklists: Arc<dyn ChecklistRepository>,
}

impl ReinspectionService {
    pub fn new(checklists: Arc<dyn ChecklistRepository>) -> Self {
        Self { checklists }
    }

    /// Validate and persist one reinspection submission.
    ///
    /// Same contract as the first-inspection submit, with the reinspection
    /// flag set on every row and the rejection verdict recomputed from the
    /// new answers. Completeness is enforced here too.
    pub async fn submit(
        &self,
        session: &Arc<Session>,
        serial: SerialNumber,
        sheet: &AnswerSheet,
    ) -> Result<(), DomainError> {
        let permit = session.begin_submission()?;
        let completed = sheet.validate()?;

        let batch =
            ChecklistBatch::assemble(serial, completed, permit.inspector(), true, Utc::now());
        store_batch(self.checklists.as_ref(), &batch).await
    }
}
