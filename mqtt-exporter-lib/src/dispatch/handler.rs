use crate::catalog::MetricDefinition;
use crate::resolve::{label_values, resolve};
use crate::store::Observer;
use std::sync::Arc;

const LOG_TARGET: &str = "  dispatch";

/// Turns messages for one metric definition into observations.
#[derive(Clone)]
pub struct DispatchHandler {
    definition: Arc<MetricDefinition>,
    observer: Arc<dyn Observer>,
}

impl core::fmt::Debug for DispatchHandler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DispatchHandler").field("definition", &self.definition).finish_non_exhaustive()
    }
}

impl DispatchHandler {
    #[must_use]
    pub fn new(definition: Arc<MetricDefinition>, observer: Arc<dyn Observer>) -> Self {
        Self { definition, observer }
    }

    #[must_use]
    pub fn definition(&self) -> &MetricDefinition {
        &self.definition
    }

    /// Resolve `payload` and record one observation per resolved value.
    ///
    /// Returns the number of observations made. Malformed payloads and unresolvable fields are
    /// logged and yield nothing.
    #[must_use]
    pub fn handle(&self, topic: &str, payload: &[u8]) -> usize {
        let def = &*self.definition;
        log::debug!(
            target: LOG_TARGET,
            "Received MQTT msg '{}' from '{topic}' topic. Listener for: '{}'",
            String::from_utf8_lossy(payload),
            def.topic_pattern()
        );

        let resolved = resolve(def, payload);
        if resolved.is_empty() {
            return 0;
        }

        let labels = label_values(topic, def.label_specs());
        for value in &resolved {
            log::trace!(target: LOG_TARGET, "Observing metric '{}' with value {}", value.export_name, value.value);
            self.observer
                .observe(value.export_name, topic, value.value, def.expiration(), labels.clone());
        }

        resolved.len()
    }
}
