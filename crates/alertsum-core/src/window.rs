use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const LABEL_FORMAT: &str = "%Y-%m-%d:%H";

/// Half-open reporting window `[from, till)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    from: DateTime<Utc>,
    till: DateTime<Utc>,
}

/// Window boundaries rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowLabels {
    pub from: String,
    pub till: String,
}

impl TimeWindow {
    /// Window ending at `now` and reaching `days` back. Fractional days are allowed.
    pub fn lookback(now: DateTime<Utc>, days: f64) -> Result<Self, DomainError> {
        if !days.is_finite() || days <= 0.0 {
            return Err(DomainError::InvalidLookback(days));
        }
        let span = std::time::Duration::try_from_secs_f64(days * SECONDS_PER_DAY)
            .ok()
            .and_then(|d| Duration::from_std(d).ok())
            .ok_or(DomainError::InvalidLookback(days))?;
        let from = now
            .checked_sub_signed(span)
            .ok_or(DomainError::InvalidLookback(days))?;
        Ok(Self { from, till: now })
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn till(&self) -> DateTime<Utc> {
        self.till
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at < self.till
    }

    /// Whole-second bounds that cover the window. Upstream filters are
    /// inclusive on both ends, so results still go through `contains`.
    pub fn query_bounds(&self) -> (i64, i64) {
        (self.from.timestamp(), self.till.timestamp())
    }

    pub fn labels_in<Tz>(&self, tz: &Tz) -> WindowLabels
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        WindowLabels {
            from: self.from.with_timezone(tz).format(LABEL_FORMAT).to_string(),
            till: self.till.with_timezone(tz).format(LABEL_FORMAT).to_string(),
        }
    }

    pub fn local_labels(&self) -> WindowLabels {
        self.labels_in(&Local)
    }
}
