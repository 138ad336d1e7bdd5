use crate::Result;
use crate::catalog::{LabelSpecs, MetricDefinition, TOPIC_LABEL, ValueKind};
use crate::dispatch::topic_filter;
use core::time::Duration;
use indexmap::IndexMap;
use ohno::app_err;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static METRIC_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[a-zA-Z_:][a-zA-Z0-9_:]*$").expect("invalid regex"));
static LABEL_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*$").expect("invalid regex"));

/// One configured metric.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetricConfig {
    /// Prometheus metric name; structured payloads export `<name>_<field suffix>` per field
    pub name: String,

    /// MQTT topic filter to listen on
    pub topic: String,

    /// Help text shown in the exposition; derived from the topic when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    #[serde(default)]
    pub kind: ValueKind,

    /// Extra labels taken from topic levels, by 1-based index (negative counts from the end)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub topic_labels: IndexMap<String, i32>,

    /// Dotted paths into a JSON object payload; empty means the payload is a single number
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub json_fields: Vec<String>,

    /// Labels with a fixed value on every exported series
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub const_labels: IndexMap<String, String>,

    /// How long a value stays visible after it was published; defaults to the cache setting
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Duration>,

    /// Export the collection time instead of the publish time
    #[serde(default)]
    pub synthetic_timestamp: bool,
}

impl MetricConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            topic: topic.into(),
            help: None,
            kind: ValueKind::default(),
            topic_labels: IndexMap::new(),
            json_fields: Vec::new(),
            const_labels: IndexMap::new(),
            expiration: None,
            synthetic_timestamp: false,
        }
    }

    pub(super) fn validate(&self) -> Result<()> {
        if !METRIC_NAME_REGEX.is_match(&self.name) {
            return Err(app_err!("'{}' is not a valid Prometheus metric name", self.name));
        }

        if let Err(e) = topic_filter::validate(&self.topic) {
            return Err(app_err!("metric '{}': {e}", self.name));
        }

        if self.expiration == Some(Duration::ZERO) {
            return Err(app_err!("metric '{}' has a zero expiration", self.name));
        }

        for label in self.topic_labels.keys().chain(self.const_labels.keys()) {
            if let Err(e) = validate_label_name(label) {
                return Err(app_err!("metric '{}': {e}", self.name));
            }
        }

        if let Some(label) = self.topic_labels.keys().find(|label| self.const_labels.contains_key(*label)) {
            return Err(app_err!(
                "metric '{}' declares label '{label}' both as a topic label and as a constant label",
                self.name
            ));
        }

        for field in &self.json_fields {
            if field.split('.').any(str::is_empty) {
                return Err(app_err!("metric '{}' has an invalid JSON field path '{field}'", self.name));
            }
        }

        Ok(())
    }

    pub(super) fn to_definition(&self, default_expiration: Duration) -> MetricDefinition {
        let mut def = MetricDefinition::new(&self.name, &self.topic, self.expiration.unwrap_or(default_expiration))
            .with_label_specs(self.topic_labels.iter().map(|(name, index)| (name.as_str(), *index)).collect::<LabelSpecs>())
            .with_field_paths(&self.json_fields)
            .with_const_labels(self.const_labels.clone())
            .with_value_kind(self.kind)
            .with_synthetic_timestamp(self.synthetic_timestamp);

        if let Some(help) = &self.help {
            def = def.with_help(help);
        }

        def
    }
}

fn validate_label_name(label: &str) -> Result<()> {
    if label == TOPIC_LABEL {
        return Err(app_err!("label name '{TOPIC_LABEL}' is reserved for the source topic"));
    }

    if !LABEL_NAME_REGEX.is_match(label) || label.starts_with("__") {
        return Err(app_err!("'{label}' is not a valid Prometheus label name"));
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn metric() -> MetricConfig {
        MetricConfig::new("temperature", "/home/+/temperature")
    }

    #[test]
    fn minimal_metric_is_valid() {
        metric().validate().unwrap();
    }

    #[test]
    fn invalid_metric_names() {
        for name in ["", "1abc", "with-dash", "with space"] {
            let config = MetricConfig { name: name.into(), ..metric() };
            assert!(config.validate().is_err(), "{name:?}");
        }

        let config = MetricConfig { name: "ns:metric_1".into(), ..metric() };
        config.validate().unwrap();
    }

    #[test]
    fn invalid_topic_filter() {
        let config = MetricConfig { topic: "/home/#/x".into(), ..metric() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_expiration() {
        let config = MetricConfig { expiration: Some(Duration::ZERO), ..metric() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn reserved_and_invalid_label_names() {
        for label in ["topic", "__meta", "room-name", "1room"] {
            let config = MetricConfig { topic_labels: IndexMap::from([(label.to_string(), 2)]), ..metric() };
            assert!(config.validate().is_err(), "{label}");

            let config = MetricConfig { const_labels: IndexMap::from([(label.to_string(), "x".to_string())]), ..metric() };
            assert!(config.validate().is_err(), "{label}");
        }
    }

    #[test]
    fn label_declared_twice() {
        let config = MetricConfig {
            topic_labels: IndexMap::from([("room".to_string(), 2)]),
            const_labels: IndexMap::from([("room".to_string(), "kitchen".to_string())]),
            ..metric()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_field_path_segments() {
        for field in ["", ".a", "a.", "a..b"] {
            let config = MetricConfig { json_fields: vec![field.into()], ..metric() };
            assert!(config.validate().is_err(), "{field:?}");
        }
    }

    #[test]
    fn definition_uses_metric_expiration_over_default() {
        let def = metric().to_definition(Duration::from_secs(60));
        assert_eq!(def.expiration(), Duration::from_secs(60));

        let config = MetricConfig { expiration: Some(Duration::from_secs(5)), ..metric() };
        assert_eq!(config.to_definition(Duration::from_secs(60)).expiration(), Duration::from_secs(5));
    }

    #[test]
    fn definition_carries_every_setting() {
        let config = MetricConfig {
            help: Some("Room temperature".into()),
            kind: ValueKind::Counter,
            topic_labels: IndexMap::from([("floor".to_string(), 2), ("room".to_string(), -2)]),
            json_fields: vec!["temperatures.out".into()],
            const_labels: IndexMap::from([("site".to_string(), "home".to_string())]),
            synthetic_timestamp: true,
            ..metric()
        };
        let def = config.to_definition(Duration::from_secs(60));

        assert_eq!(def.name(), "temperature");
        assert_eq!(def.help(), "Room temperature");
        assert_eq!(def.topic_pattern(), "/home/+/temperature");
        assert_eq!(def.value_kind(), ValueKind::Counter);
        assert!(def.synthetic_timestamp());
        assert_eq!(def.label_specs().names().collect::<Vec<_>>(), ["floor", "room"]);
        assert_eq!(def.export_names().collect::<Vec<_>>(), ["temperature_out"]);
    }

    #[test]
    fn default_help_is_derived_from_topic() {
        let def = metric().to_definition(Duration::from_secs(60));
        assert!(def.help().contains("/home/+/temperature"));
    }
}
