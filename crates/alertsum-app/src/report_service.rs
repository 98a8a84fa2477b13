use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use alertsum_core::inventory::{Event, MediaDirectory, MISSING_DESCRIPTION};
use alertsum_core::report::{AggregationResult, ChannelUsage, ReportBuilder, TriggerFrequency};
use alertsum_core::severity::Severity;
use alertsum_core::window::TimeWindow;
use alertsum_ports::outbound::MonitoringClient;
use alertsum_ports::types::EventQuery;

use crate::error::AppError;

pub const DEFAULT_LOOKBACK_DAYS: f64 = 1.0;

/// Aggregates the alert history of every host group over a lookback window.
pub struct ReportService<M>
where
    M: MonitoringClient,
{
    client: M,
}

impl<M> ReportService<M>
where
    M: MonitoringClient,
{
    pub fn new(client: M) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &M {
        &self.client
    }

    pub fn into_client(self) -> M {
        self.client
    }

    pub async fn build_report(
        &self,
        days: f64,
        now: DateTime<Utc>,
    ) -> Result<AggregationResult, AppError> {
        let window = TimeWindow::lookback(now, days)?;
        let groups = self.client.host_groups().await?;
        let media = MediaDirectory::new(self.client.media_types().await?);
        let (time_from, time_till) = window.query_bounds();

        tracing::info!(
            groups = groups.len(),
            media_types = media.len(),
            from = %window.from(),
            till = %window.till(),
            "building alert report"
        );

        let mut builder = ReportBuilder::new(window);
        for group in &groups {
            builder.declare_group(&group.name);
            for severity in Severity::ALL {
                let query = EventQuery {
                    group_id: group.id.clone(),
                    severity,
                    time_from,
                    time_till,
                };
                let events = self.fired_events(&query, &window).await?;
                if events.is_empty() {
                    continue;
                }

                let usage = self.channel_usage(&events, &media).await?;
                let triggers = self.trigger_frequency(&events).await?;
                let deliveries = usage.total();
                let kept = builder.record(&group.name, severity, usage, triggers);
                tracing::debug!(
                    group = %group.name,
                    severity = %severity,
                    events = events.len(),
                    deliveries,
                    kept,
                    "tallied severity"
                );
            }
        }

        let report = builder.finish();
        tracing::info!(
            groups_with_alerts = report.groups().len(),
            deliveries = report.grand_total(),
            "alert report built"
        );
        Ok(report)
    }

    /// Events inside the window, de-duplicated by id, in upstream order.
    async fn fired_events(
        &self,
        query: &EventQuery,
        window: &TimeWindow,
    ) -> Result<Vec<Event>, AppError> {
        let mut seen = HashSet::new();
        let events = self
            .client
            .events(query)
            .await?
            .into_iter()
            .filter(|e| window.contains(e.clock))
            .filter(|e| seen.insert(e.id.clone()))
            .collect();
        Ok(events)
    }

    async fn channel_usage(
        &self,
        events: &[Event],
        media: &MediaDirectory,
    ) -> Result<ChannelUsage, AppError> {
        let event_ids: Vec<_> = events.iter().map(|e| e.id.clone()).collect();
        let alerts = self.client.alerts(&event_ids).await?;
        Ok(ChannelUsage::tally(
            alerts.iter().map(|a| media.resolve(a.media_type_id.as_ref())),
        ))
    }

    /// One occurrence per event, so a condition that fired twice counts twice.
    async fn trigger_frequency(&self, events: &[Event]) -> Result<TriggerFrequency, AppError> {
        let mut seen = HashSet::new();
        let trigger_ids: Vec<_> = events
            .iter()
            .map(|e| e.trigger_id.clone())
            .filter(|id| seen.insert(id.clone()))
            .collect();
        let descriptions: HashMap<_, _> = self
            .client
            .triggers(&trigger_ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t.description))
            .collect();

        Ok(TriggerFrequency::tally(events.iter().map(|e| {
            descriptions
                .get(&e.trigger_id)
                .map(String::as_str)
                .unwrap_or(MISSING_DESCRIPTION)
        })))
    }
}
