use serde::{Deserialize, Serialize};

/// Account identifiers are opaque strings supplied by the caller.
pub type AccountId = String;

/// A bank account. Its balance is never stored here; it is derived from the
/// account's operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
}

impl Account {
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self { id: id.into() }
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
