use crate::Result;
use crate::catalog::{Descriptor, ValueKind};
use crate::store::{ObservationStore, Sample};
use ohno::IntoAppError;
use prometheus::core::{Collector, Desc};
use prometheus::proto::{Counter, Gauge, LabelPair, Metric, MetricFamily, MetricType};
use std::collections::HashMap;
use std::sync::Arc;

/// Adapts an [`ObservationStore`] to the `prometheus` collector protocol.
#[derive(Debug)]
pub struct StoreCollector {
    store: Arc<ObservationStore>,
    descs: Vec<Desc>,
}

impl StoreCollector {
    /// Fails if a catalog descriptor is not a valid Prometheus metric description.
    pub fn new(store: Arc<ObservationStore>) -> Result<Self> {
        let descs = store
            .describe()
            .map(|descriptor| {
                Desc::new(
                    descriptor.name.clone(),
                    descriptor.help.clone(),
                    descriptor.label_names.clone(),
                    descriptor.const_labels.iter().map(|(k, v)| (k.clone(), v.clone())).collect::<HashMap<_, _>>(),
                )
                .into_app_err_with(|| format!("describing metric '{}'", descriptor.name))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { store, descs })
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<ObservationStore> {
        &self.store
    }
}

impl Collector for StoreCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let samples = self.store.collect();

        // samples arrive grouped by descriptor
        let mut families: Vec<MetricFamily> = Vec::new();
        let mut current: Option<&Arc<Descriptor>> = None;
        for sample in &samples {
            if current.is_none_or(|d| !Arc::ptr_eq(d, &sample.descriptor)) {
                families.push(new_family(&sample.descriptor));
                current = Some(&sample.descriptor);
            }

            if let Some(family) = families.last_mut() {
                family.mut_metric().push(to_metric(sample));
            }
        }

        families
    }
}

fn new_family(descriptor: &Descriptor) -> MetricFamily {
    let mut family = MetricFamily::default();
    family.set_name(descriptor.name.clone());
    family.set_help(descriptor.help.clone());
    family.set_field_type(match descriptor.value_kind {
        ValueKind::Gauge => MetricType::GAUGE,
        ValueKind::Counter => MetricType::COUNTER,
    });
    family
}

fn to_metric(sample: &Sample) -> Metric {
    let descriptor = &sample.descriptor;

    let mut labels: Vec<LabelPair> = descriptor
        .label_names
        .iter()
        .zip(&sample.label_values)
        .chain(&descriptor.const_labels)
        .map(|(name, value)| {
            let mut pair = LabelPair::default();
            pair.set_name(name.clone());
            pair.set_value(value.clone());
            pair
        })
        .collect();
    labels.sort_by(|l, r| l.get_name().cmp(r.get_name()));

    let mut metric = Metric::default();
    metric.set_label(labels.into());
    metric.set_timestamp_ms(sample.timestamp.timestamp_millis());
    match descriptor.value_kind {
        ValueKind::Gauge => {
            let mut gauge = Gauge::default();
            gauge.set_value(sample.value);
            metric.set_gauge(gauge);
        }
        ValueKind::Counter => {
            let mut counter = Counter::default();
            counter.set_value(sample.value);
            metric.set_counter(counter);
        }
    }
    metric
}
