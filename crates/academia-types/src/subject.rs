//! Subject identity types

use serde::{Deserialize, Serialize};

/// Unique identifier of an authenticable principal (staff user or student).
///
/// Assigned by the credential store; never minted by the auth core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub i64);

impl SubjectId {
    /// Parse a subject ID from its decimal string form (the token `sub` claim)
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        Ok(Self(s.parse()?))
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SubjectId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
