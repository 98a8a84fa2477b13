use alertsum_core::error::DomainError;
use alertsum_ports::error::{DeliveryError, MonitoringError, RenderError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("monitoring error: {0}")]
    Monitoring(#[from] MonitoringError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}
