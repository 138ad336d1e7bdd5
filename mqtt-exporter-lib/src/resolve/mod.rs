//! Value and label extraction from inbound messages
//!
//! These are pure functions: they never fail past their boundary and never touch the
//! observation store.
//!
//! # Implementation Model
//!
//! [`resolve`] turns a raw payload into zero or more [`ResolvedValue`]s for a
//! [`MetricDefinition`](crate::catalog::MetricDefinition). Scalar metrics parse the whole
//! payload as a number. Field-path metrics parse the payload as JSON into the tagged
//! [`PayloadValue`] tree and walk it once per configured path, first literally and then with
//! dots flattened to underscores. A failure is logged and drops only the affected message or
//! field.
//!
//! [`extract`] picks label values out of the `/`-separated topic by position.

mod field_resolver;
mod payload;
mod topic_labels;

pub use field_resolver::{ResolvedValue, resolve};
pub use payload::PayloadValue;
pub use topic_labels::{extract, label_values, topic_part};
