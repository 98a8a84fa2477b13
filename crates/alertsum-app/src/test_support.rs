//! In-memory monitoring platform used by the service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use alertsum_core::ids::{EventId, HostGroupId, TriggerId};
use alertsum_core::inventory::{AlertRecord, Event, HostGroup, MediaChannel, TriggerCondition};
use alertsum_core::severity::Severity;
use alertsum_ports::error::MonitoringError;
use alertsum_ports::outbound::MonitoringClient;
use alertsum_ports::types::EventQuery;

pub fn ts(s: &str) -> DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

#[derive(Default)]
pub struct FixtureMonitoring {
    groups: Vec<HostGroup>,
    media: Vec<MediaChannel>,
    events: Vec<(HostGroupId, Severity, Event)>,
    alerts: Vec<AlertRecord>,
    triggers: Vec<TriggerCondition>,
    fail_on: Option<&'static str>,
    calls: Mutex<Vec<String>>,
    event_queries: Mutex<Vec<EventQuery>>,
    trigger_requests: Mutex<Vec<Vec<String>>>,
}

impl FixtureMonitoring {
    /// Two groups with alerts plus one idle group.
    ///
    /// web: P1 {Email 3, Slack 1}, P0 {Email 1, Slack 1, unknown 1} -> 7
    /// db:  P3 {"-" 2}, P1 {Slack 1}, P2 has events but no deliveries -> 3
    pub fn scenario(now: DateTime<Utc>) -> Self {
        let from = now - Duration::days(1);
        Self::default()
            .with_group("1", "web")
            .with_group("2", "db")
            .with_group("3", "idle")
            .with_media("1", Some("Email"))
            .with_media("2", Some("Slack"))
            .with_media("3", None)
            .with_trigger("t1", "CPU high")
            .with_trigger("t2", "Disk full")
            .with_trigger("t3", "Host down")
            .with_trigger("t4", "Slow query")
            .with_trigger("t5", "Replication lag")
            .with_trigger("t6", "Lag spike")
            .with_event("1", Severity::P1, "e1", "t1", now - Duration::hours(1))
            .with_event("1", Severity::P1, "e2", "t2", now - Duration::hours(2))
            .with_event("1", Severity::P1, "e3", "t1", now - Duration::hours(3))
            .with_event("1", Severity::P0, "e4", "t3", now - Duration::hours(4))
            .with_event("2", Severity::P3, "e5", "t4", now - Duration::hours(5))
            .with_event("2", Severity::P3, "e6", "t4", now - Duration::hours(5))
            .with_event("2", Severity::P2, "e7", "t6", now - Duration::hours(1))
            .with_event("2", Severity::P2, "e8", "t6", from - Duration::seconds(1))
            .with_event("2", Severity::P1, "e9", "t5", from)
            .with_alert("e1", Some("1"))
            .with_alert("e1", Some("2"))
            .with_alert("e2", Some("1"))
            .with_alert("e3", Some("1"))
            .with_alert("e4", Some("1"))
            .with_alert("e4", Some("2"))
            .with_alert("e4", Some("99"))
            .with_alert("e5", Some("3"))
            .with_alert("e6", Some("3"))
            .with_alert("e8", Some("1"))
            .with_alert("e9", Some("2"))
    }

    pub fn with_group(mut self, id: &str, name: &str) -> Self {
        self.groups.push(HostGroup::new(id, name));
        self
    }

    pub fn with_media(mut self, id: &str, description: Option<&str>) -> Self {
        self.media.push(MediaChannel::new(id, description));
        self
    }

    pub fn with_trigger(mut self, id: &str, description: &str) -> Self {
        self.triggers.push(TriggerCondition {
            id: TriggerId::new(id),
            description: description.to_string(),
        });
        self
    }

    pub fn with_event(
        mut self,
        group: &str,
        severity: Severity,
        id: &str,
        trigger: &str,
        clock: DateTime<Utc>,
    ) -> Self {
        self.events.push((
            HostGroupId::new(group),
            severity,
            Event {
                id: EventId::new(id),
                trigger_id: TriggerId::new(trigger),
                clock,
            },
        ));
        self
    }

    pub fn with_alert(mut self, event: &str, media: Option<&str>) -> Self {
        self.alerts.push(AlertRecord {
            event_id: EventId::new(event),
            media_type_id: media.map(Into::into),
        });
        self
    }

    pub fn failing_on(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn event_queries(&self) -> Vec<EventQuery> {
        self.event_queries.lock().unwrap().clone()
    }

    pub fn trigger_requests(&self) -> Vec<Vec<String>> {
        self.trigger_requests.lock().unwrap().clone()
    }

    fn enter(&self, call: &'static str, method: &str) -> Result<(), MonitoringError> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.fail_on == Some(call) {
            return Err(MonitoringError::upstream(method, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl MonitoringClient for FixtureMonitoring {
    async fn host_groups(&self) -> Result<Vec<HostGroup>, MonitoringError> {
        self.enter("host_groups", "hostgroup.get")?;
        Ok(self.groups.clone())
    }

    async fn media_types(&self) -> Result<Vec<MediaChannel>, MonitoringError> {
        self.enter("media_types", "mediatype.get")?;
        Ok(self.media.clone())
    }

    // Time bounds are deliberately ignored so the service's own window
    // filter is what the tests observe.
    async fn events(&self, query: &EventQuery) -> Result<Vec<Event>, MonitoringError> {
        self.enter("events", "event.get")?;
        self.event_queries.lock().unwrap().push(query.clone());
        Ok(self
            .events
            .iter()
            .filter(|(g, s, _)| *g == query.group_id && *s == query.severity)
            .map(|(_, _, e)| e.clone())
            .collect())
    }

    async fn alerts(&self, event_ids: &[EventId]) -> Result<Vec<AlertRecord>, MonitoringError> {
        self.enter("alerts", "alert.get")?;
        Ok(self
            .alerts
            .iter()
            .filter(|a| event_ids.contains(&a.event_id))
            .cloned()
            .collect())
    }

    async fn triggers(
        &self,
        trigger_ids: &[TriggerId],
    ) -> Result<Vec<TriggerCondition>, MonitoringError> {
        self.enter("triggers", "trigger.get")?;
        self.trigger_requests
            .lock()
            .unwrap()
            .push(trigger_ids.iter().map(|t| t.to_string()).collect());
        Ok(self
            .triggers
            .iter()
            .filter(|t| trigger_ids.contains(&t.id))
            .cloned()
            .collect())
    }
}
