//! Time-expiring observation store
//!
//! The store turns a stream of pushed values into a snapshot that can be pulled at any time.
//!
//! # Implementation Model
//!
//! [`ObservationStore`] keeps the latest [`Observation`] per `(export name, source topic)` in a
//! sharded concurrent map, so writers on unrelated keys never contend on a single lock and
//! a snapshot never waits on more than one shard at a time. Each observation records when it
//! was made and when it expires. Expired entries are filtered out by
//! [`collect`](ObservationStore::collect) and reclaimed by a periodic
//! [`sweep`](ObservationStore::sweep), which a [`Sweeper`] runs in the background.
//!
//! Handlers write through the [`Observer`] trait, so they can be exercised against a recording
//! double instead of a real store.

mod observation;
mod observation_store;
mod sample;
mod sweeper;

use core::time::Duration;

pub use observation::Observation;
pub use observation_store::ObservationStore;
pub use sample::Sample;
pub use sweeper::Sweeper;

/// A sink for resolved values.
pub trait Observer: Send + Sync {
    /// Record `value` for the metric exported as `metric`, observed on `topic`.
    ///
    /// The value replaces any previous one for the same metric and topic, and stays visible for
    /// `expiration` unless it is refreshed.
    fn observe(&self, metric: &str, topic: &str, value: f64, expiration: Duration, label_values: Vec<String>);
}
