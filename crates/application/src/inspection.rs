use std::sync::Arc;

use chrono::Utc;
use domain::{
    AnswerSheet, ChecklistBatch, ChecklistRepository, DomainError, SerialNumber, Session,
};

/// Runs the first-inspection submit workflow.
pub struct InspectionService {
    checklists: Arc<dyn ChecklistRepository>,
}

impl InspectionService {
    pub fn new(checklists: Arc<dyn ChecklistRepository>) -> Self {
        Self { checklists }
    }

    /// Validate and persist one checklist submission.
    ///
    /// The session's submission slot is claimed before anything else, so a
    /// double submit gets a busy signal instead of writing a second batch.
    /// The slot is released on every exit path.
    pub async fn submit(
        &self,
        session: &Arc<Session>,
        serial: SerialNumber,
        sheet: &AnswerSheet,
    ) -> Result<(), DomainError> {
        let permit = session.begin_submission()?;
        let completed = sheet.validate()?;

        let batch =
            ChecklistBatch::assemble(serial, completed, permit.inspector(), false, Utc::now());
        store_batch(self.checklists.as_ref(), &batch).await
    }
}

/// Write a batch as its flat rows, one insert per row.
///
/// The first failed insert aborts the rest and leaves the earlier rows in
/// place; the store has no multi-row transaction to roll them back with.
pub(crate) async fn store_batch(
    checklists: &dyn ChecklistRepository,
    batch: &ChecklistBatch,
) -> Result<(), DomainError> {
    let rows = batch.rows();
    for (written, row) in rows.iter().enumerate() {
        if let Err(e) = checklists.insert(row).await {
            tracing::warn!(
                serial = %batch.serial(),
                written,
                error = %e,
                "Checklist write failed, abandoning the rest of the batch"
            );
            return Err(e);
        }
    }

    tracing::info!(
        serial = %batch.serial(),
        inspector = %batch.inspector(),
        rejected = batch.product_rejected(),
        reinspection = batch.reinspection(),
        "Checklist batch stored"
    );
    Ok(())
}
