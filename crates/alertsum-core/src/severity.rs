use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Report severity scale. Declaration order is ascending importance, so the
/// derived `Ord` matches the platform's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    P3,
    P2,
    P1,
    P0,
}

impl Severity {
    /// All severities in ascending code order (2, 3, 4, 5).
    pub const ALL: [Severity; 4] = [Severity::P3, Severity::P2, Severity::P1, Severity::P0];

    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            2 => Ok(Severity::P3),
            3 => Ok(Severity::P2),
            4 => Ok(Severity::P1),
            5 => Ok(Severity::P0),
            other => Err(DomainError::UnknownSeverity(other)),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Severity::P3 => 2,
            Severity::P2 => 3,
            Severity::P1 => 4,
            Severity::P0 => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Severity::P3 => "P3",
            Severity::P2 => "P2",
            Severity::P1 => "P1",
            Severity::P0 => "P0",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
