//! Roles and role groups
//!
//! Roles form a closed set checked exhaustively at compile time; the wire
//! and database representation is the uppercase string form.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Principal category governing endpoint access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Administrator; implicitly allowed through every gate
    Administrador,
    /// Instructor
    Profesor,
    /// Student
    Alumno,
    /// Administrative staff
    Secretaria,
    /// Finance staff
    Finanzas,
    /// Basic user with no department affiliation
    User,
}

impl Role {
    /// Roles with access to academic management endpoints
    pub const ACADEMIC: &'static [Role] = &[Role::Administrador, Role::Profesor, Role::Secretaria];

    /// Roles with access to financial information
    pub const FINANCE: &'static [Role] = &[Role::Administrador, Role::Finanzas, Role::Secretaria];

    /// The universal-override role
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Administrador)
    }

    /// Wire string for this role
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrador => "ADMINISTRADOR",
            Role::Profesor => "PROFESOR",
            Role::Alumno => "ALUMNO",
            Role::Secretaria => "SECRETARIA",
            Role::Finanzas => "FINANZAS",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMINISTRADOR" => Ok(Role::Administrador),
            "PROFESOR" => Ok(Role::Profesor),
            "ALUMNO" => Ok(Role::Alumno),
            "SECRETARIA" => Ok(Role::Secretaria),
            "FINANZAS" => Ok(Role::Finanzas),
            "USER" => Ok(Role::User),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Error returned when a role string is outside the closed set
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
