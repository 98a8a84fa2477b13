use serde::{Deserialize, Serialize};

use crate::error::DomainError;

// Monitoring platform ids are opaque numeric strings.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn parse(s: &str) -> Result<Self, DomainError> {
                let trimmed = s.trim();
                if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(DomainError::InvalidId {
                        kind: stringify!($name),
                        raw: s.to_string(),
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }
    };
}

define_id!(HostGroupId);
define_id!(MediaTypeId);
define_id!(EventId);
define_id!(TriggerId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_id_succeeds() {
        let id = EventId::parse(" 10452 ").unwrap();
        assert_eq!(id.as_str(), "10452");
        assert_eq!(id, EventId::new("10452"));
    }

    #[test]
    fn parse_non_numeric_id_fails() {
        let result = TriggerId::parse("abc");
        assert_eq!(
            result,
            Err(DomainError::InvalidId {
                kind: "TriggerId",
                raw: "abc".into(),
            })
        );
    }

    #[test]
    fn parse_empty_id_fails() {
        assert!(HostGroupId::parse("").is_err());
    }

    #[test]
    fn display_matches_raw_value() {
        let id = MediaTypeId::new("7");
        assert_eq!(id.to_string(), "7");
        assert_eq!(MediaTypeId::from("7"), id);
    }
}
