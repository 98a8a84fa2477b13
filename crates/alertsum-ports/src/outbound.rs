use async_trait::async_trait;

use alertsum_core::ids::{EventId, TriggerId};
use alertsum_core::inventory::{AlertRecord, Event, HostGroup, MediaChannel, TriggerCondition};
use alertsum_core::report::AggregationResult;

use crate::error::{DeliveryError, MonitoringError, RenderError};
use crate::types::{DeliveryReceipt, EventQuery, OutgoingMail, RenderedReport};

/// Read-only queries against the monitoring platform.
#[async_trait]
pub trait MonitoringClient: Send + Sync {
    /// Monitored, non-template host groups in platform order.
    async fn host_groups(&self) -> Result<Vec<HostGroup>, MonitoringError>;
    async fn media_types(&self) -> Result<Vec<MediaChannel>, MonitoringError>;
    async fn events(&self, query: &EventQuery) -> Result<Vec<Event>, MonitoringError>;
    async fn alerts(&self, event_ids: &[EventId]) -> Result<Vec<AlertRecord>, MonitoringError>;
    async fn triggers(
        &self,
        trigger_ids: &[TriggerId],
    ) -> Result<Vec<TriggerCondition>, MonitoringError>;
}

pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &AggregationResult) -> Result<RenderedReport, RenderError>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<DeliveryReceipt, DeliveryError>;
}
