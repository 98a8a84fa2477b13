pub mod media;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{EventId, HostGroupId, MediaTypeId, TriggerId};

pub use media::{MediaChannel, MediaDirectory};

/// Placeholder used for missing descriptions and unresolved trigger conditions.
pub const MISSING_DESCRIPTION: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGroup {
    pub id: HostGroupId,
    pub name: String,
}

impl HostGroup {
    pub fn new(id: impl Into<HostGroupId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A trigger condition firing, as returned for a problem-state query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub trigger_id: TriggerId,
    pub clock: DateTime<Utc>,
}

/// One delivery attempt for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub event_id: EventId,
    pub media_type_id: Option<MediaTypeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCondition {
    pub id: TriggerId,
    pub description: String,
}
