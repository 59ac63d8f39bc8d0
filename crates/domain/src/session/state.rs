use std::sync::{Arc, Mutex};

use crate::error::{DomainError, Result};
use crate::session::CredentialTable;

/// Login state machine for one operator terminal.
///
/// Two things are tracked: whether an operator is logged in, and whether a
/// checklist submission is currently in flight. A submission can only start
/// while logged in, and logout is refused until the in-flight submission
/// finishes.
#[derive(Debug)]
pub struct Session {
    state: Mutex<State>,
}

#[derive(Debug)]
enum State {
    LoggedOut,
    LoggedIn { user: String, submitting: bool },
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::LoggedOut),
        }
    }

    pub fn login(
        &self,
        credentials: &CredentialTable,
        username: &str,
        password: &str,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let State::LoggedIn { .. } = *state {
            return Err(DomainError::AlreadyLoggedIn);
        }
        if !credentials.verify(username, password) {
            return Err(DomainError::InvalidCredentials);
        }
        *state = State::LoggedIn {
            user: username.to_string(),
            submitting: false,
        };
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match &*state {
            State::LoggedOut => Err(DomainError::NotAuthenticated),
            State::LoggedIn {
                submitting: true, ..
            } => Err(DomainError::SubmissionPending),
            State::LoggedIn { .. } => {
                *state = State::LoggedOut;
                Ok(())
            }
        }
    }

    pub fn current_user(&self) -> Option<String> {
        match &*self.state.lock().unwrap() {
            State::LoggedOut => None,
            State::LoggedIn { user, .. } => Some(user.clone()),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(
            &*self.state.lock().unwrap(),
            State::LoggedIn {
                submitting: true, ..
            }
        )
    }

    /// Claim the session's single submission slot.
    ///
    /// At most one permit exists per session at a time; a second call while
    /// the first permit is alive reports the submission already in progress
    /// instead of duplicating rows.
    pub fn begin_submission(self: &Arc<Self>) -> Result<SubmissionPermit> {
        let mut state = self.state.lock().unwrap();
        match &mut *state {
            State::LoggedOut => Err(DomainError::NotAuthenticated),
            State::LoggedIn {
                submitting: true, ..
            } => Err(DomainError::SubmissionInProgress),
            State::LoggedIn { user, submitting } => {
                *submitting = true;
                Ok(SubmissionPermit {
                    session: Arc::clone(self),
                    inspector: user.clone(),
                })
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive right to run one submission for a session.
///
/// Dropping the permit frees the slot, whether the submission succeeded or
/// bailed out partway through.
#[derive(Debug)]
pub struct SubmissionPermit {
    session: Arc<Session>,
    inspector: String,
}

impl SubmissionPermit {
    /// Operator who owns this submission, captured when the slot was claimed.
    pub fn inspector(&self) -> &str {
        &self.inspector
    }
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        if let Ok(mut state) = self.session.state.lock() {
            if let State::LoggedIn { submitting, .. } = &mut *state {
                *submitting = false;
            }
        }
    }
}
