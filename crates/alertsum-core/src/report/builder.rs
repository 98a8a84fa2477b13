use indexmap::IndexMap;

use super::{AggregationResult, ChannelUsage, GroupEntries, SeverityEntry, TriggerFrequency};
use crate::severity::Severity;
use crate::window::TimeWindow;

/// Accumulates per (group, severity) entries and produces an
/// [`AggregationResult`].
///
/// Insertion rules:
/// - an entry with empty channel usage is dropped;
/// - a second entry for the same group name and severity is merged into the
///   first (counts summed, triggers re-sorted);
/// - groups appear in the order they were declared or first recorded, and
///   groups without any entry are left out of the result and the totals.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    window: TimeWindow,
    groups: IndexMap<String, GroupEntries>,
}

impl ReportBuilder {
    pub fn new(window: TimeWindow) -> Self {
        Self {
            window,
            groups: IndexMap::new(),
        }
    }

    /// Reserve the position of a group so that out-of-order recording keeps
    /// fetch order.
    pub fn declare_group(&mut self, name: &str) {
        if !self.groups.contains_key(name) {
            self.groups.insert(name.to_string(), IndexMap::new());
        }
    }

    /// Returns whether the entry was kept.
    pub fn record(
        &mut self,
        group: &str,
        severity: Severity,
        channel_usage: ChannelUsage,
        triggers: TriggerFrequency,
    ) -> bool {
        if channel_usage.is_empty() {
            return false;
        }
        let entries = self.groups.entry(group.to_string()).or_default();
        match entries.get_mut(&severity) {
            Some(existing) => {
                existing.channel_usage.merge(&channel_usage);
                existing.triggers.merge(&triggers);
            }
            None => {
                entries.insert(
                    severity,
                    SeverityEntry {
                        channel_usage,
                        triggers,
                    },
                );
            }
        }
        true
    }

    pub fn finish(self) -> AggregationResult {
        let mut groups = self.groups;
        groups.retain(|_, entries| !entries.is_empty());
        for entries in groups.values_mut() {
            entries.sort_keys();
        }
        let totals = groups
            .iter()
            .map(|(name, entries)| {
                let total = entries.values().map(|e| e.channel_usage.total()).sum();
                (name.clone(), total)
            })
            .collect();
        AggregationResult {
            window: self.window,
            groups,
            totals,
        }
    }
}
