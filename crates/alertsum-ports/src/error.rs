use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitoringError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("client is not logged in")]
    NotAuthenticated,
    #[error("query {method} failed: {reason}")]
    UpstreamQuery { method: String, reason: String },
}

impl MonitoringError {
    pub fn upstream(method: &str, reason: impl ToString) -> Self {
        MonitoringError::UpstreamQuery {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(String),
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("no recipients")]
    NoRecipients,
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("attachment error: {0}")]
    Attachment(String),
    #[error("message build failed: {0}")]
    Message(String),
    #[error("smtp error: {0}")]
    Transport(String),
}
