use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Delivery counts per media channel description, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelUsage(IndexMap<String, u64>);

impl ChannelUsage {
    pub fn tally<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut usage = Self::default();
        for name in names {
            usage.add(name, 1);
        }
        usage
    }

    pub fn add(&mut self, name: impl Into<String>, count: u64) {
        *self.0.entry(name.into()).or_insert(0) += count;
    }

    pub fn merge(&mut self, other: &ChannelUsage) {
        for (name, count) in other.iter() {
            self.add(name, count);
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.0.get(name).copied()
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Trigger descriptions with occurrence counts, most frequent first.
/// Equal counts keep the order in which descriptions were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerFrequency(Vec<(String, u64)>);

impl TriggerFrequency {
    pub fn tally<I, S>(descriptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: IndexMap<String, u64> = IndexMap::new();
        for description in descriptions {
            *counts.entry(description.into()).or_insert(0) += 1;
        }
        Self::from_counts(counts)
    }

    fn from_counts(counts: IndexMap<String, u64>) -> Self {
        let mut pairs: Vec<(String, u64)> = counts.into_iter().collect();
        // sort_by is stable
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        Self(pairs)
    }

    pub fn merge(&mut self, other: &TriggerFrequency) {
        let mut counts: IndexMap<String, u64> = self.0.drain(..).collect();
        for (description, count) in other.iter() {
            *counts.entry(description.to_string()).or_insert(0) += count;
        }
        *self = Self::from_counts(counts);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(d, c)| (d.as_str(), *c))
    }
}
