use crate::checklist::{ChecklistItem, join_keys};
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid serial number: {0}")]
    InvalidSerialNumber(String),

    #[error(
        "Checklist incomplete: missing status for [{}], missing model for [{}]",
        join_keys(.missing_status),
        join_keys(.missing_model)
    )]
    IncompleteChecklist {
        missing_status: Vec<ChecklistItem>,
        missing_model: Vec<ChecklistItem>,
    },

    #[error("A submission is already in progress for this session")]
    SubmissionInProgress,

    #[error("No user is logged in")]
    NotAuthenticated,

    #[error("A user is already logged in")]
    AlreadyLoggedIn,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Cannot log out while a submission is in progress")]
    SubmissionPending,

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
