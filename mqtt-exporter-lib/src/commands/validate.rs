use super::Host;
use super::common::{ConfigArgs, report_failure};
use crate::Result;
use crate::catalog::Catalog;
use crate::config::{Config, ConfigSource};
use crate::export::StoreCollector;
use crate::store::ObservationStore;
use camino::Utf8Path;
use clap::Parser;
use std::io::Write;
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Load the configuration and build everything the exporter would build from it.
fn validate_config_inner(search_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<(Arc<Catalog>, ConfigSource)> {
    let (config, source) = Config::load(search_dir, config_path)?;
    let catalog = Arc::new(config.catalog()?);

    // metric and label names must also be acceptable to the Prometheus client
    let _ = StoreCollector::new(Arc::new(ObservationStore::new(Arc::clone(&catalog))))?;

    Ok((catalog, source))
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let (catalog, source) = report_failure(host, "Configuration validation", validate_config_inner(Utf8Path::new("."), args.config.path()))?;

    let mut out = host.output();
    let _ = writeln!(out, "Configuration file is valid");
    match source {
        ConfigSource::File(path) => {
            let _ = writeln!(out, "Config file: {path}");
        }
        ConfigSource::Embedded => {
            let _ = writeln!(out, "Using default configuration (no config file found)");
        }
    }

    let _ = writeln!(out, "Exported metrics: {}", catalog.len());
    for descriptor in catalog.descriptors() {
        let _ = writeln!(
            out,
            "  {} ({}) labels: {}",
            descriptor.name,
            descriptor.value_kind,
            descriptor.label_names.join(", ")
        );
    }

    Ok(())
}
