use super::{Descriptor, FieldPath, LabelSpecs, TOPIC_LABEL, ValueKind};
use core::time::Duration;
use indexmap::IndexMap;

/// How to derive observations for one configured metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDefinition {
    name: String,
    help: String,
    topic_pattern: String,
    label_specs: LabelSpecs,
    field_paths: Vec<FieldPath>,
    const_labels: IndexMap<String, String>,
    expiration: Duration,
    value_kind: ValueKind,
    synthetic_timestamp: bool,
}

impl MetricDefinition {
    /// Create a gauge definition for scalar payloads with no extra labels.
    #[must_use]
    pub fn new(name: impl Into<String>, topic_pattern: impl Into<String>, expiration: Duration) -> Self {
        let name = name.into();
        let topic_pattern = topic_pattern.into();
        Self {
            help: format!("Value published on MQTT topic '{topic_pattern}'"),
            name,
            topic_pattern,
            label_specs: LabelSpecs::default(),
            field_paths: Vec::new(),
            const_labels: IndexMap::new(),
            expiration,
            value_kind: ValueKind::Gauge,
            synthetic_timestamp: false,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    #[must_use]
    pub fn with_label_specs(mut self, label_specs: LabelSpecs) -> Self {
        self.label_specs = label_specs;
        self
    }

    /// Read values from the given JSON field paths instead of a scalar payload.
    #[must_use]
    pub fn with_field_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.field_paths = paths.into_iter().map(|path| FieldPath::new(&self.name, path)).collect();
        self
    }

    #[must_use]
    pub fn with_const_labels(mut self, const_labels: IndexMap<String, String>) -> Self {
        self.const_labels = const_labels;
        self
    }

    #[must_use]
    pub const fn with_value_kind(mut self, value_kind: ValueKind) -> Self {
        self.value_kind = value_kind;
        self
    }

    #[must_use]
    pub const fn with_synthetic_timestamp(mut self, synthetic_timestamp: bool) -> Self {
        self.synthetic_timestamp = synthetic_timestamp;
        self
    }

    /// The configured name, before any per-field suffix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    #[must_use]
    pub fn topic_pattern(&self) -> &str {
        &self.topic_pattern
    }

    #[must_use]
    pub const fn label_specs(&self) -> &LabelSpecs {
        &self.label_specs
    }

    #[must_use]
    pub fn field_paths(&self) -> &[FieldPath] {
        &self.field_paths
    }

    /// Whether payloads are plain numbers rather than JSON objects.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.field_paths.is_empty()
    }

    #[must_use]
    pub const fn expiration(&self) -> Duration {
        self.expiration
    }

    #[must_use]
    pub const fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    #[must_use]
    pub const fn synthetic_timestamp(&self) -> bool {
        self.synthetic_timestamp
    }

    /// Every name this definition exports, in field order.
    pub fn export_names(&self) -> impl Iterator<Item = &str> {
        let scalar = self.is_scalar().then_some(self.name.as_str());
        scalar.into_iter().chain(self.field_paths.iter().map(FieldPath::export_name))
    }

    /// Variable label names shared by every exported metric of this definition.
    #[must_use]
    pub fn label_names(&self) -> Vec<String> {
        core::iter::once(TOPIC_LABEL).chain(self.label_specs.names()).map(String::from).collect()
    }

    /// One descriptor per exported name.
    #[must_use]
    pub fn descriptors(&self) -> Vec<Descriptor> {
        let label_names = self.label_names();
        self.export_names()
            .map(|name| Descriptor {
                name: name.to_string(),
                help: self.help.clone(),
                label_names: label_names.clone(),
                const_labels: self.const_labels.clone(),
                value_kind: self.value_kind,
                synthetic_timestamp: self.synthetic_timestamp,
            })
            .collect()
    }
}
