use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use application::{ChecklistLoader, InspectionService, ReinspectionService};
use domain::{
    ChecklistRepository, CredentialTable, DomainError, ProductionLogRepository, Session,
};
use uuid::Uuid;

/// Shared server state: the credential table, the open sessions keyed by
/// bearer token, and the workflow services wired to one row store.
pub struct AppState {
    pub credentials: CredentialTable,
    pub sessions: RwLock<HashMap<String, Arc<Session>>>,
    pub loader: ChecklistLoader,
    pub inspections: InspectionService,
    pub reinspections: ReinspectionService,
}

impl AppState {
    pub fn new(
        checklists: Arc<dyn ChecklistRepository>,
        production: Arc<dyn ProductionLogRepository>,
    ) -> Self {
        Self {
            credentials: CredentialTable::builtin(),
            sessions: RwLock::new(HashMap::new()),
            loader: ChecklistLoader::new(checklists.clone(), production),
            inspections: InspectionService::new(checklists.clone()),
            reinspections: ReinspectionService::new(checklists),
        }
    }

    /// Authenticate and open a fresh session. Returns the bearer token.
    pub fn open_session(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let session = Arc::new(Session::new());
        session.login(&self.credentials, username, password)?;

        let token = Uuid::new_v4().to_string();
        self.sessions.write().unwrap().insert(token.clone(), session);
        Ok(token)
    }

    /// Log the session out and drop it from the registry. Fails while a
    /// submission is in flight so the permit is never orphaned.
    pub fn close_session(&self, token: &str) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions.get(token).ok_or(DomainError::NotAuthenticated)?;
        session.logout()?;
        sessions.remove(token);
        Ok(())
    }

    pub fn session(&self, token: &str) -> Result<Arc<Session>, DomainError> {
        self.sessions
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(DomainError::NotAuthenticated)
    }
}
