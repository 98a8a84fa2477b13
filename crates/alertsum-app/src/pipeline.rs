use std::path::PathBuf;

use chrono::{DateTime, Utc};

use alertsum_ports::outbound::{Mailer, MonitoringClient, ReportRenderer};
use alertsum_ports::types::{DeliveryReceipt, OutgoingMail};

use crate::error::AppError;
use crate::report_service::ReportService;

/// Envelope settings applied to every report mail.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliverySettings {
    pub sender_name: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub attachments: Vec<PathBuf>,
}

/// Build, render and mail one report. Nothing is sent unless every earlier
/// step succeeded.
pub struct ReportPipeline<M, R, S>
where
    M: MonitoringClient,
    R: ReportRenderer,
    S: Mailer,
{
    reports: ReportService<M>,
    renderer: R,
    mailer: S,
    delivery: DeliverySettings,
}

impl<M, R, S> ReportPipeline<M, R, S>
where
    M: MonitoringClient,
    R: ReportRenderer,
    S: Mailer,
{
    pub fn new(reports: ReportService<M>, renderer: R, mailer: S, delivery: DeliverySettings) -> Self {
        Self {
            reports,
            renderer,
            mailer,
            delivery,
        }
    }

    pub fn reports(&self) -> &ReportService<M> {
        &self.reports
    }

    pub fn into_reports(self) -> ReportService<M> {
        self.reports
    }

    pub async fn run(&self, days: f64, now: DateTime<Utc>) -> Result<DeliveryReceipt, AppError> {
        let report = self.reports.build_report(days, now).await?;
        let body = self.renderer.render(&report)?;

        let mail = OutgoingMail {
            sender_name: self.delivery.sender_name.clone(),
            recipients: self.delivery.recipients.clone(),
            subject: self.delivery.subject.clone(),
            body,
            attachments: self.delivery.attachments.clone(),
        };
        let receipt = self.mailer.send(&mail).await?;
        tracing::info!(
            recipients = receipt.recipients,
            subject = %mail.subject,
            "alert report delivered"
        );
        Ok(receipt)
    }
}
