use std::collections::HashMap;

/// Username/password table for operator login.
///
/// Credentials are plain text and ship with the binary, mirroring the
/// deployed user list. This is not a production-grade credential store and
/// is kept only for parity with the terminal it replaces.
#[derive(Debug, Clone)]
pub struct CredentialTable {
    users: HashMap<String, String>,
}

impl CredentialTable {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            users: pairs
                .into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        }
    }

    /// The fixed inspector accounts.
    pub fn builtin() -> Self {
        Self::from_pairs([
            ("admin", "admin"),
            ("Maria", "maria"),
            ("Catia", "catia"),
            ("Vera", "vera"),
            ("Bruno", "bruno"),
        ])
    }

    /// Check a username/password pair. Username is case-sensitive.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users.get(username).is_some_and(|p| p == password)
    }
}
