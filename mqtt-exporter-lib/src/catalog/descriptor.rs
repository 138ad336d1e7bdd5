use super::ValueKind;
use indexmap::IndexMap;

/// Name of the label that always carries the full source topic.
pub const TOPIC_LABEL: &str = "topic";

/// Static description of one exported metric.
///
/// Descriptors do not depend on the observations currently held by the store, so they can be
/// handed to the exporter before any message has been received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub help: String,

    /// Variable label names; the first one is always [`TOPIC_LABEL`].
    pub label_names: Vec<String>,

    pub const_labels: IndexMap<String, String>,
    pub value_kind: ValueKind,

    /// Export the collection time instead of the time the value was observed.
    pub synthetic_timestamp: bool,
}

impl Descriptor {
    /// Number of variable labels, topic included.
    #[must_use]
    pub const fn label_count(&self) -> usize {
        self.label_names.len()
    }
}
