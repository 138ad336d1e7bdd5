use chrono::{DateTime, TimeDelta, Utc};
use core::time::Duration;

/// Composite store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct ObservationKey {
    pub metric: Box<str>,
    pub topic: Box<str>,
}

impl ObservationKey {
    pub fn new(metric: &str, topic: &str) -> Self {
        Self {
            metric: Box::from(metric),
            topic: Box::from(topic),
        }
    }
}

/// The latest value seen for one metric on one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub value: f64,

    /// The source topic followed by one value per configured topic label.
    pub label_values: Vec<String>,

    pub recorded_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Observation {
    /// Create an observation recorded at `now` that expires after `expiration`.
    #[must_use]
    pub fn new(value: f64, label_values: Vec<String>, now: DateTime<Utc>, expiration: Duration) -> Self {
        let ttl = TimeDelta::from_std(expiration).unwrap_or(TimeDelta::MAX);
        Self {
            value,
            label_values,
            recorded_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
