mod credentials;
mod state;

pub use credentials::CredentialTable;
pub use state::{Session, SubmissionPermit};
