//! Wire rows returned by the platform API and the request parameters that
//! produce them. Numeric fields arrive as strings.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use alertsum_core::error::DomainError;
use alertsum_core::ids::{EventId, HostGroupId, MediaTypeId, TriggerId};
use alertsum_core::inventory::media::UNKNOWN_CHANNEL_ID;
use alertsum_core::inventory::{AlertRecord, Event, HostGroup, MediaChannel, TriggerCondition};
use alertsum_ports::error::MonitoringError;
use alertsum_ports::types::EventQuery;

use super::rpc::ApiVersion;

/// Problem state in `event.get`.
const EVENT_VALUE_PROBLEM: u8 = 1;

// `real_hosts` was replaced by `with_hosts` in 6.2.
const WITH_HOSTS_SINCE: ApiVersion = ApiVersion::new(6, 2);

#[derive(Debug, Deserialize)]
pub(crate) struct HostGroupRow {
    groupid: String,
    name: String,
}

impl TryFrom<HostGroupRow> for HostGroup {
    type Error = MonitoringError;

    fn try_from(row: HostGroupRow) -> Result<Self, Self::Error> {
        Ok(HostGroup {
            id: wire_id("hostgroup.get", HostGroupId::parse(&row.groupid))?,
            name: row.name,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaTypeRow {
    #[serde(default)]
    mediatypeid: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<MediaTypeRow> for MediaChannel {
    type Error = MonitoringError;

    // From 4.4 on the display name lives in `name` and `description` is free text.
    fn try_from(row: MediaTypeRow) -> Result<Self, Self::Error> {
        let label = row
            .name
            .filter(|n| !n.is_empty())
            .or(row.description.filter(|d| !d.is_empty()));
        let id = match row.mediatypeid {
            Some(raw) => wire_id("mediatype.get", MediaTypeId::parse(&raw))?,
            None => MediaTypeId::new(UNKNOWN_CHANNEL_ID),
        };
        Ok(MediaChannel {
            id,
            description: label,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventRow {
    eventid: String,
    objectid: String,
    clock: String,
}

impl TryFrom<EventRow> for Event {
    type Error = MonitoringError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let clock = row
            .clock
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .ok_or_else(|| {
                MonitoringError::upstream("event.get", format!("invalid clock {:?}", row.clock))
            })?;
        Ok(Event {
            id: wire_id("event.get", EventId::parse(&row.eventid))?,
            trigger_id: wire_id("event.get", TriggerId::parse(&row.objectid))?,
            clock,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlertRow {
    eventid: String,
    #[serde(default)]
    mediatypeid: Option<String>,
}

impl TryFrom<AlertRow> for AlertRecord {
    type Error = MonitoringError;

    fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
        let media_type_id = row
            .mediatypeid
            .map(|raw| wire_id("alert.get", MediaTypeId::parse(&raw)))
            .transpose()?;
        Ok(AlertRecord {
            event_id: wire_id("alert.get", EventId::parse(&row.eventid))?,
            media_type_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TriggerRow {
    triggerid: String,
    description: String,
}

impl TryFrom<TriggerRow> for TriggerCondition {
    type Error = MonitoringError;

    fn try_from(row: TriggerRow) -> Result<Self, Self::Error> {
        Ok(TriggerCondition {
            id: wire_id("trigger.get", TriggerId::parse(&row.triggerid))?,
            description: row.description,
        })
    }
}

fn wire_id<T>(method: &str, parsed: Result<T, DomainError>) -> Result<T, MonitoringError> {
    parsed.map_err(|e| MonitoringError::upstream(method, e))
}

pub(crate) fn host_group_params(version: Option<ApiVersion>) -> Value {
    let mut params = json!({
        "monitored_hosts": true,
        "output": ["groupid", "name"],
    });
    let key = match version {
        Some(v) if v >= WITH_HOSTS_SINCE => "with_hosts",
        _ => "real_hosts",
    };
    params[key] = Value::Bool(true);
    params
}

pub(crate) fn media_type_params() -> Value {
    json!({ "output": ["mediatypeid", "name", "description"] })
}

pub(crate) fn event_params(query: &EventQuery) -> Value {
    json!({
        "groupids": [query.group_id.as_str()],
        "value": EVENT_VALUE_PROBLEM,
        "severities": [query.severity.code()],
        "time_from": query.time_from,
        "time_till": query.time_till,
        "output": ["eventid", "objectid", "clock"],
    })
}

pub(crate) fn alert_params(event_ids: &[EventId]) -> Value {
    let ids: Vec<&str> = event_ids.iter().map(EventId::as_str).collect();
    json!({ "eventids": ids, "output": ["eventid", "mediatypeid"] })
}

pub(crate) fn trigger_params(trigger_ids: &[TriggerId]) -> Value {
    let ids: Vec<&str> = trigger_ids.iter().map(TriggerId::as_str).collect();
    json!({ "triggerids": ids, "output": ["triggerid", "description"] })
}
