use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::checklist::{ChecklistItem, ItemStatus};
use crate::error::{DomainError, Result};

/// Draft answer for one catalog item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemAnswer {
    pub status: Option<ItemStatus>,
    pub model: Option<String>,
}

/// The form state of one inspection: always carries all 10 catalog items.
///
/// This replaces the free-form key → answer dictionaries of the previous
/// system; an unknown item key cannot be represented at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSheet {
    entries: BTreeMap<ChecklistItem, ItemAnswer>,
}

impl AnswerSheet {
    /// Empty sheet: every item present, nothing answered
    pub fn new() -> Self {
        let entries = ChecklistItem::ALL
            .into_iter()
            .map(|item| (item, ItemAnswer::default()))
            .collect();
        Self { entries }
    }

    pub fn set_status(&mut self, item: ChecklistItem, status: ItemStatus) {
        self.entries.entry(item).or_default().status = Some(status);
    }

    pub fn set_model(&mut self, item: ChecklistItem, model: impl Into<String>) {
        self.entries.entry(item).or_default().model = Some(model.into());
    }

    pub fn answer(&self, item: ChecklistItem) -> &ItemAnswer {
        // Sheets built by `new` hold every item; a sheet deserialized from
        // JSON may not. A missing entry reads as unanswered.
        static UNANSWERED: ItemAnswer = ItemAnswer {
            status: None,
            model: None,
        };
        self.entries.get(&item).unwrap_or(&UNANSWERED)
    }

    /// Completeness gate of the submission contract: every item needs a
    /// status, and every model-bearing item needs a non-empty model.
    /// Violations report the offending item keys and nothing is written.
    pub fn validate(&self) -> Result<CompletedSheet> {
        let mut missing_status = Vec::new();
        let mut missing_model = Vec::new();

        for item in ChecklistItem::ALL {
            let answer = self.answer(item);
            if answer.status.is_none() {
                missing_status.push(item);
            }
            if item.requires_model() {
                let blank = answer
                    .model
                    .as_deref()
                    .map(|m| m.trim().is_empty())
                    .unwrap_or(true);
                if blank {
                    missing_model.push(item);
                }
            }
        }

        if !missing_status.is_empty() || !missing_model.is_empty() {
            return Err(DomainError::IncompleteChecklist {
                missing_status,
                missing_model,
            });
        }

        let answers = ChecklistItem::ALL
            .into_iter()
            .map(|item| {
                let answer = self.answer(item);
                CompletedAnswer {
                    item,
                    status: answer.status.expect("validated above"),
                    model: answer
                        .model
                        .as_deref()
                        .map(str::trim)
                        .filter(|m| !m.is_empty())
                        .map(str::to_string),
                }
            })
            .collect();

        Ok(CompletedSheet { answers })
    }
}

impl Default for AnswerSheet {
    fn default() -> Self {
        Self::new()
    }
}

/// One validated answer, ready for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedAnswer {
    pub item: ChecklistItem,
    pub status: ItemStatus,
    pub model: Option<String>,
}

/// Proof of a passed completeness check: exactly one answer per catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSheet {
    answers: Vec<CompletedAnswer>,
}

impl CompletedSheet {
    pub fn answers(&self) -> &[CompletedAnswer] {
        &self.answers
    }

    /// True if any item failed: this rejects the whole unit
    pub fn has_rejection(&self) -> bool {
        self.answers.iter().any(|a| a.status.is_rejection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_sheet() -> AnswerSheet {
        let mut sheet = AnswerSheet::new();
        for item in ChecklistItem::ALL {
            sheet.set_status(item, ItemStatus::Conforme);
            if item.requires_model() {
                sheet.set_model(item, item.model_options().unwrap()[0]);
            }
        }
        sheet
    }

    #[test]
    fn test_new_sheet_is_unanswered() {
        let sheet = AnswerSheet::new();
        for item in ChecklistItem::ALL {
            assert_eq!(sheet.answer(item), &ItemAnswer::default());
        }
    }

    #[test]
    fn test_empty_sheet_reports_everything_missing() {
        let err = AnswerSheet::new().validate().unwrap_err();
        match err {
            DomainError::IncompleteChecklist {
                missing_status,
                missing_model,
            } => {
                assert_eq!(missing_status.len(), 10);
                assert_eq!(
                    missing_model,
                    vec![
                        ChecklistItem::Rodagem,
                        ChecklistItem::SistemaAtuacao,
                        ChecklistItem::CatracaFreio,
                        ChecklistItem::Solda,
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_single_status_is_named() {
        let mut sheet = complete_sheet();
        sheet.entries.get_mut(&ChecklistItem::TampaCubo).unwrap().status = None;

        let err = sheet.validate().unwrap_err();
        match err {
            DomainError::IncompleteChecklist {
                missing_status,
                missing_model,
            } => {
                assert_eq!(missing_status, vec![ChecklistItem::TampaCubo]);
                assert!(missing_model.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_model_counts_as_missing() {
        let mut sheet = complete_sheet();
        sheet.set_model(ChecklistItem::Solda, "   ");

        let err = sheet.validate().unwrap_err();
        match err {
            DomainError::IncompleteChecklist { missing_model, .. } => {
                assert_eq!(missing_model, vec![ChecklistItem::Solda]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_model_not_required_without_option_list() {
        // No model set for Etiqueta & friends; still valid.
        let sheet = complete_sheet();
        assert!(sheet.validate().is_ok());
    }

    #[test]
    fn test_deserialized_sheet_missing_entries_reads_as_unanswered() {
        // Only one of the ten items present on the wire.
        let sheet: AnswerSheet = serde_json::from_str(
            r#"{"entries":{"Etiqueta":{"status":"Conforme","model":null}}}"#,
        )
        .unwrap();

        assert_eq!(sheet.answer(ChecklistItem::Solda), &ItemAnswer::default());

        let err = sheet.validate().unwrap_err();
        match err {
            DomainError::IncompleteChecklist {
                missing_status,
                missing_model,
            } => {
                assert_eq!(missing_status.len(), 9);
                assert!(!missing_status.contains(&ChecklistItem::Etiqueta));
                assert_eq!(
                    missing_model,
                    vec![
                        ChecklistItem::Rodagem,
                        ChecklistItem::SistemaAtuacao,
                        ChecklistItem::CatracaFreio,
                        ChecklistItem::Solda,
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_completed_sheet_keeps_catalog_order_and_trims_models() {
        let mut sheet = complete_sheet();
        sheet.set_model(ChecklistItem::Rodagem, "  Aço  ");

        let completed = sheet.validate().unwrap();
        let answers = completed.answers();
        assert_eq!(answers.len(), 10);
        for (answer, item) in answers.iter().zip(ChecklistItem::ALL) {
            assert_eq!(answer.item, item);
        }
        assert_eq!(answers[3].model.as_deref(), Some("Aço"));
    }

    #[test]
    fn test_has_rejection() {
        let mut sheet = complete_sheet();
        assert!(!sheet.validate().unwrap().has_rejection());

        sheet.set_status(ChecklistItem::PinturaEixo, ItemStatus::NaoConforme);
        assert!(sheet.validate().unwrap().has_rejection());
    }
}
