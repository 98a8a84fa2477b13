use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::MISSING_DESCRIPTION;
use crate::ids::MediaTypeId;

/// Bucket for alerts whose media type is absent or not in the directory.
pub const UNKNOWN_CHANNEL_ID: &str = "-1";
pub const UNKNOWN_CHANNEL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaChannel {
    pub id: MediaTypeId,
    pub description: Option<String>,
}

impl MediaChannel {
    pub fn new(id: impl Into<MediaTypeId>, description: Option<&str>) -> Self {
        Self {
            id: id.into(),
            description: description.map(str::to_string),
        }
    }

    pub fn display_name(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => MISSING_DESCRIPTION,
        }
    }
}

/// Media type id to description lookup, built once per run.
#[derive(Debug, Clone, Default)]
pub struct MediaDirectory {
    names: HashMap<MediaTypeId, String>,
}

impl MediaDirectory {
    pub fn new(channels: impl IntoIterator<Item = MediaChannel>) -> Self {
        let names = channels
            .into_iter()
            .map(|c| {
                let name = c.display_name().to_string();
                (c.id, name)
            })
            .collect();
        Self { names }
    }

    pub fn resolve(&self, id: Option<&MediaTypeId>) -> &str {
        id.filter(|id| id.as_str() != UNKNOWN_CHANNEL_ID)
            .and_then(|id| self.names.get(id))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CHANNEL)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
