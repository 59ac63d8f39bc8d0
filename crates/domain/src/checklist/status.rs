use serde::{Deserialize, Serialize};

/// Conformity verdict for one checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    /// Item passed inspection
    Conforme,
    /// Item failed inspection; any one of these rejects the whole unit
    NaoConforme,
    /// Item does not apply to this unit
    NaoAplicavel,
}

impl ItemStatus {
    /// String stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conforme => "Conforme",
            Self::NaoConforme => "Não Conforme",
            Self::NaoAplicavel => "N/A",
        }
    }

    /// Parse a stored status string; unknown values yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Conforme" => Some(Self::Conforme),
            "Não Conforme" => Some(Self::NaoConforme),
            "N/A" => Some(Self::NaoAplicavel),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::NaoConforme)
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
