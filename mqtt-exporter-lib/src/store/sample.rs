use crate::catalog::Descriptor;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// One exportable value from a store snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub descriptor: Arc<Descriptor>,
    pub value: f64,
    pub label_values: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    /// The source topic this sample was observed on.
    #[must_use]
    pub fn topic(&self) -> &str {
        self.label_values.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}
