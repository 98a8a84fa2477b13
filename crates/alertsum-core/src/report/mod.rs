pub mod builder;
pub mod tally;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::window::{TimeWindow, WindowLabels};

pub use builder::ReportBuilder;
pub use tally::{ChannelUsage, TriggerFrequency};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityEntry {
    pub channel_usage: ChannelUsage,
    pub triggers: TriggerFrequency,
}

pub type GroupEntries = IndexMap<Severity, SeverityEntry>;

/// Alert totals for one lookback window, keyed by host group name then
/// severity. Groups keep fetch order and severities ascend from P3 to P0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    window: TimeWindow,
    groups: IndexMap<String, GroupEntries>,
    totals: IndexMap<String, u64>,
}

impl AggregationResult {
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn labels(&self) -> WindowLabels {
        self.window.local_labels()
    }

    pub fn groups(&self) -> &IndexMap<String, GroupEntries> {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&GroupEntries> {
        self.groups.get(name)
    }

    pub fn entry(&self, group: &str, severity: Severity) -> Option<&SeverityEntry> {
        self.groups.get(group).and_then(|g| g.get(&severity))
    }

    pub fn totals(&self) -> &IndexMap<String, u64> {
        &self.totals
    }

    pub fn total(&self, group: &str) -> Option<u64> {
        self.totals.get(group).copied()
    }

    pub fn grand_total(&self) -> u64 {
        self.totals.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
