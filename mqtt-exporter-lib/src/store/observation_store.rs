use super::observation::ObservationKey;
use super::{Observation, Observer, Sample};
use crate::catalog::{Catalog, Descriptor};
use chrono::{DateTime, Utc};
use core::time::Duration;
use dashmap::DashMap;
use std::sync::Arc;

const LOG_TARGET: &str = "     store";

/// Holds the latest value per metric and source topic until it expires.
#[derive(Debug)]
pub struct ObservationStore {
    catalog: Arc<Catalog>,
    entries: DashMap<ObservationKey, Observation>,
}

impl ObservationStore {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            entries: DashMap::new(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Record an observation as of `now`, replacing any previous one for the same key.
    pub fn observe_at(&self, metric: &str, topic: &str, value: f64, expiration: Duration, label_values: Vec<String>, now: DateTime<Utc>) {
        log::trace!(target: LOG_TARGET, "Storing {value} for metric '{metric}' from topic '{topic}'");
        let _ = self
            .entries
            .insert(ObservationKey::new(metric, topic), Observation::new(value, label_values, now, expiration));
    }

    /// Snapshot every live observation.
    ///
    /// Samples are ordered by the catalog order of their metric, then by label values, so two
    /// snapshots of the same state are identical. Observations whose metric is unknown to the
    /// catalog, or whose label count does not match its descriptor, are skipped.
    #[must_use]
    pub fn collect(&self) -> Vec<Sample> {
        self.collect_at(Utc::now())
    }

    /// Snapshot every observation still live at `now`.
    #[must_use]
    pub fn collect_at(&self, now: DateTime<Utc>) -> Vec<Sample> {
        let mut samples: Vec<(usize, Sample)> = self
            .entries
            .iter()
            .filter(|entry| entry.value().is_live(now))
            .filter_map(|entry| {
                let (key, observation) = entry.pair();
                let (position, descriptor) = self.lookup(&key.metric)?;
                if observation.label_values.len() != descriptor.label_count() {
                    log::debug!(
                        target: LOG_TARGET,
                        "Skipping metric '{}' from topic '{}': got {} label values, expected {}",
                        key.metric,
                        key.topic,
                        observation.label_values.len(),
                        descriptor.label_count()
                    );
                    return None;
                }

                let timestamp = if descriptor.synthetic_timestamp { now } else { observation.recorded_at };
                Some((
                    position,
                    Sample {
                        descriptor: Arc::clone(descriptor),
                        value: observation.value,
                        label_values: observation.label_values.clone(),
                        timestamp,
                    },
                ))
            })
            .collect();

        samples.sort_by(|(lp, ls), (rp, rs)| lp.cmp(rp).then_with(|| ls.label_values.cmp(&rs.label_values)));
        samples.into_iter().map(|(_, sample)| sample).collect()
    }

    /// Every descriptor the store can produce samples for, in catalog order.
    pub fn describe(&self) -> impl Iterator<Item = &Arc<Descriptor>> {
        self.catalog.descriptors()
    }

    /// Drop expired observations, returning how many were removed.
    #[must_use]
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    #[must_use]
    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, observation| observation.is_live(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            log::debug!(target: LOG_TARGET, "Swept {removed} expired observation(s)");
        }
        removed
    }

    /// Number of stored observations, expired ones included until the next sweep.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, metric: &str) -> Option<(usize, &Arc<Descriptor>)> {
        let position = self.catalog.position(metric);
        let descriptor = self.catalog.descriptor(metric);
        if let (Some(position), Some(descriptor)) = (position, descriptor) {
            Some((position, descriptor))
        } else {
            log::debug!(target: LOG_TARGET, "Metric '{metric}' is not in the catalog");
            None
        }
    }
}

impl Observer for ObservationStore {
    fn observe(&self, metric: &str, topic: &str, value: f64, expiration: Duration, label_values: Vec<String>) {
        self.observe_at(metric, topic, value, expiration, label_values, Utc::now());
    }
}
