//! Static registry of configured metrics
//!
//! The catalog is built once at startup from the configuration file and is read-only
//! afterwards. It is shared as an `Arc<Catalog>` by the observation store, the dispatch
//! handlers, and the Prometheus export adapter.
//!
//! # Implementation Model
//!
//! Each configured metric becomes a [`MetricDefinition`], which describes how to turn an
//! inbound message into observations: the topic filter it listens on, the positional
//! [`LabelSpecs`] extracted from the topic, and the [`FieldPath`]s to read from a JSON
//! payload (none for plain scalar payloads).
//!
//! A definition exports one metric per field path (or a single metric for scalar payloads).
//! Each exported metric is described by a [`Descriptor`] carrying the static facts the
//! exporter needs: name, help text, label names, and [`ValueKind`]. Export names are derived
//! from the definition's base name, so the full set of descriptors is known before any
//! message arrives.

mod descriptor;
mod field_path;
mod label_specs;
mod metric_catalog;
mod metric_def;
mod value_kind;

pub use descriptor::{Descriptor, TOPIC_LABEL};
pub use field_path::FieldPath;
pub use label_specs::LabelSpecs;
pub use metric_catalog::Catalog;
pub use metric_def::MetricDefinition;
pub use value_kind::ValueKind;
