use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("lookback must be a positive number of days, got {0}")]
    InvalidLookback(f64),
    #[error("unknown severity code: {0}")]
    UnknownSeverity(u8),
    #[error("invalid {kind}: {raw:?}")]
    InvalidId { kind: &'static str, raw: String },
}
