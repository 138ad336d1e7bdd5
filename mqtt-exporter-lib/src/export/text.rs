use super::StoreCollector;
use crate::Result;
use crate::store::ObservationStore;
use ohno::IntoAppError;
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::Arc;

/// Render the live contents of `store` in the Prometheus text exposition format.
pub fn render_text(store: &Arc<ObservationStore>) -> Result<String> {
    let registry = Registry::new();
    registry
        .register(Box::new(StoreCollector::new(Arc::clone(store))?))
        .into_app_err("registering the observation store collector")?;

    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&registry.gather(), &mut buffer)
        .into_app_err("encoding metrics")?;

    String::from_utf8(buffer).into_app_err("encoded metrics are not valid UTF-8")
}
