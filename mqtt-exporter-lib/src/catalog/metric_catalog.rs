use super::{Descriptor, MetricDefinition};
use crate::Result;
use ohno::app_err;
use std::collections::HashMap;
use std::sync::Arc;

const LOG_TARGET: &str = "   catalog";

/// The immutable set of configured metrics and the descriptors they export.
#[derive(Debug, Default)]
pub struct Catalog {
    definitions: Vec<Arc<MetricDefinition>>,
    descriptors: Vec<Arc<Descriptor>>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from metric definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if two definitions export the same metric name.
    pub fn new(definitions: impl IntoIterator<Item = MetricDefinition>) -> Result<Self> {
        let definitions: Vec<_> = definitions.into_iter().map(Arc::new).collect();
        if definitions.is_empty() {
            log::warn!(target: LOG_TARGET, "No metrics are configured");
        }

        let mut descriptors = Vec::new();
        let mut by_name = HashMap::new();
        for def in &definitions {
            for descriptor in def.descriptors() {
                if by_name.insert(descriptor.name.clone(), descriptors.len()).is_some() {
                    return Err(app_err!(
                        "metric name '{}' is exported more than once (defined by metric '{}')",
                        descriptor.name,
                        def.name()
                    ));
                }
                descriptors.push(Arc::new(descriptor));
            }
        }

        log::debug!(
            target: LOG_TARGET,
            "Catalog holds {} definition(s) exporting {} metric(s)",
            definitions.len(),
            descriptors.len()
        );

        Ok(Self {
            definitions,
            descriptors,
            by_name,
        })
    }

    #[must_use]
    pub fn definitions(&self) -> &[Arc<MetricDefinition>] {
        &self.definitions
    }

    /// All exported descriptors in configuration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &Arc<Descriptor>> {
        self.descriptors.iter()
    }

    #[must_use]
    pub fn descriptor(&self, export_name: &str) -> Option<&Arc<Descriptor>> {
        let idx = self.position(export_name)?;
        self.descriptors.get(idx)
    }

    /// Configuration-order position of an exported metric.
    #[must_use]
    pub fn position(&self, export_name: &str) -> Option<usize> {
        self.by_name.get(export_name).copied()
    }

    /// Number of exported metrics.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
