//! Prometheus collector adapter and text exposition
//!
//! [`StoreCollector`] exposes an [`ObservationStore`](crate::store::ObservationStore) through
//! the `prometheus` crate's [`Collector`](prometheus::core::Collector) trait so it can be
//! registered next to any other collector. [`render_text`] gathers a one-off registry holding
//! just the store and encodes it in the text exposition format.

mod collector;
mod text;

pub use collector::StoreCollector;
pub use text::render_text;
