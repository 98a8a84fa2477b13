use std::path::PathBuf;

use alertsum_core::ids::HostGroupId;
use alertsum_core::severity::Severity;

/// Problem-state events of one host group and severity.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub group_id: HostGroupId,
    pub severity: Severity,
    /// Inclusive lower bound, unix seconds.
    pub time_from: i64,
    /// Inclusive upper bound, unix seconds.
    pub time_till: i64,
}

/// Rendered report document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub content_type: &'static str,
    pub body: String,
}

impl RenderedReport {
    pub fn html(body: String) -> Self {
        Self {
            content_type: "text/html",
            body,
        }
    }
}

/// Email ready to be handed to a mail transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub sender_name: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: RenderedReport,
    pub attachments: Vec<PathBuf>,
}

/// Delivery metadata returned by mailers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub recipients: usize,
    pub response: Option<String>,
}
