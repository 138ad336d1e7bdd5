//! Configuration file loading and validation
//!
//! Configuration can be written in YAML, TOML or JSON; the format is picked from the file
//! extension. When no file is given, `mqtt-exporter.yml` in the working directory is used if it
//! exists, otherwise the embedded default configuration.

mod format;
mod metric_config;

use crate::Result;
use crate::catalog::Catalog;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;

pub use format::ConfigFormat;
pub use metric_config::MetricConfig;

/// The default configuration content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

/// File name looked up in the working directory when no configuration path is given
pub const DEFAULT_CONFIG_FILE: &str = "mqtt-exporter.yml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
}

/// Observation retention settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Duration a value stays visible for metrics without their own expiration
    #[serde(default = "default_expiration", with = "humantime_serde")]
    pub expiration: Duration,

    /// Period of the background task that drops expired values
    #[serde(default = "default_sweep_interval", with = "humantime_serde")]
    pub sweep_interval: Duration,
}

const fn default_expiration() -> Duration {
    Duration::from_secs(60)
}

const fn default_sweep_interval() -> Duration {
    Duration::from_secs(10)
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expiration: default_expiration(),
            sweep_interval: default_sweep_interval(),
        }
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(Utf8PathBuf),
    Embedded,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit `config_path` must exist. Otherwise [`DEFAULT_CONFIG_FILE`] is looked up in
    /// `search_dir`, falling back to the embedded default configuration.
    pub fn load(search_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<(Self, ConfigSource)> {
        let (path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = search_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok((Self::embedded()?, ConfigSource::Embedded));
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config =
            Self::parse(&text, ConfigFormat::from_path(&path)).map_err(|e| app_err!("parsing configuration file '{path}': {e}"))?;
        Ok((config, ConfigSource::File(path)))
    }

    /// Parse and validate configuration text.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self> {
        let config: Self = format.parse(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded default configuration.
    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG_YAML, ConfigFormat::Yaml).map_err(|e| app_err!("parsing the embedded default configuration: {e}"))
    }

    /// Save the default configuration to a file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_YAML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.cache.expiration.is_zero() {
            return Err(app_err!("cache.expiration must be greater than zero"));
        }

        if self.cache.sweep_interval.is_zero() {
            return Err(app_err!("cache.sweep_interval must be greater than zero"));
        }

        let mut names = HashSet::new();
        for metric in &self.metrics {
            metric.validate()?;
            if !names.insert(metric.name.as_str()) {
                return Err(app_err!("metric '{}' is configured more than once", metric.name));
            }
        }

        Ok(())
    }

    /// Build the metric catalog described by this configuration.
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::new(self.metrics.iter().map(|metric| metric.to_definition(self.cache.expiration)))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::catalog::ValueKind;

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn embedded_config_is_valid() {
        let config = Config::embedded().unwrap();
        config.validate().unwrap();
        assert_eq!(config.cache, CacheConfig::default());
        assert_eq!(config.metrics.len(), 3);

        let catalog = config.catalog().unwrap();
        let names: Vec<_> = catalog.descriptors().map(|d| d.name.clone()).collect();
        assert_eq!(names, ["temperature", "weather_size", "weather_out", "energy_total"]);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse("{}", ConfigFormat::Yaml).unwrap();
        assert_eq!(config.cache, CacheConfig::default());
        assert!(config.metrics.is_empty());
    }

    #[test]
    fn parses_full_yaml() {
        let text = r"
cache:
  expiration: 2m
  sweep_interval: 1s
metrics:
  - name: temperature
    topic: /home/+/+/temperature
    help: Room temperature
    kind: counter
    topic_labels: { floor: 2, room: -2 }
    const_labels: { site: home }
    expiration: 5m
    synthetic_timestamp: true
  - name: weather
    topic: /weather/#
    json_fields: [size, temperatures.out]
";
        let config = Config::parse(text, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.cache.expiration, Duration::from_secs(120));
        assert_eq!(config.cache.sweep_interval, Duration::from_secs(1));

        let temperature = &config.metrics[0];
        assert_eq!(temperature.kind, ValueKind::Counter);
        assert_eq!(temperature.topic_labels.keys().collect::<Vec<_>>(), ["floor", "room"]);
        assert_eq!(temperature.expiration, Some(Duration::from_secs(300)));
        assert!(temperature.synthetic_timestamp);

        let catalog = config.catalog().unwrap();
        let weather = catalog.descriptor("weather_out").unwrap();
        assert_eq!(weather.label_names, ["topic"]);
        assert_eq!(catalog.definitions()[1].expiration(), Duration::from_secs(120));
    }

    #[test]
    fn parses_toml_and_json() {
        let toml = r#"
[cache]
expiration = "30s"

[[metrics]]
name = "temperature"
topic = "/t"
"#;
        let config = Config::parse(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.cache.expiration, Duration::from_secs(30));
        assert_eq!(config.metrics[0].name, "temperature");

        let json = r#"{"metrics": [{"name": "temperature", "topic": "/t", "json_fields": ["a.b"]}]}"#;
        let config = Config::parse(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.metrics[0].json_fields, ["a.b"]);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Config::parse("metrics: [{name: a, topic: /a, colour: red}]", ConfigFormat::Yaml).is_err());
        assert!(Config::parse("cache: {ttl: 5s}", ConfigFormat::Yaml).is_err());
    }

    #[test]
    fn rejects_zero_durations() {
        assert!(Config::parse("cache: {expiration: 0s}", ConfigFormat::Yaml).is_err());
        assert!(Config::parse("cache: {sweep_interval: 0s}", ConfigFormat::Yaml).is_err());
    }

    #[test]
    fn rejects_repeated_metric_names() {
        let text = "metrics: [{name: a, topic: /a}, {name: a, topic: /b}]";
        assert!(Config::parse(text, ConfigFormat::Yaml).is_err());
    }

    #[test]
    fn catalog_rejects_colliding_export_names() {
        let text = "metrics: [{name: a, topic: /a, json_fields: [x.count, y.count]}]";
        let config = Config::parse(text, ConfigFormat::Yaml).unwrap();
        assert!(config.catalog().is_err());
    }

    #[test]
    fn load_explicit_path() {
        let (_dir, dir) = temp_dir();
        let path = dir.join("custom.json");
        fs::write(&path, r#"{"metrics": [{"name": "a", "topic": "/a"}]}"#).unwrap();

        let (config, source) = Config::load(&dir, Some(path.as_path())).unwrap();
        assert_eq!(config.metrics.len(), 1);
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn load_missing_explicit_path_fails() {
        let (_dir, dir) = temp_dir();
        assert!(Config::load(&dir, Some(dir.join("missing.yml").as_path())).is_err());
    }

    #[test]
    fn load_finds_file_in_search_dir() {
        let (_dir, dir) = temp_dir();
        fs::write(dir.join(DEFAULT_CONFIG_FILE), "metrics: [{name: a, topic: /a}]").unwrap();

        let (config, source) = Config::load(&dir, None).unwrap();
        assert_eq!(config.metrics[0].name, "a");
        assert_eq!(source, ConfigSource::File(dir.join(DEFAULT_CONFIG_FILE)));
    }

    #[test]
    fn load_falls_back_to_embedded() {
        let (_dir, dir) = temp_dir();
        let (config, source) = Config::load(&dir, None).unwrap();
        assert_eq!(source, ConfigSource::Embedded);
        assert_eq!(config, Config::embedded().unwrap());
    }

    #[test]
    fn load_reports_invalid_file() {
        let (_dir, dir) = temp_dir();
        let path = dir.join("bad.yml");
        fs::write(&path, "metrics: [{name: 'bad name', topic: /a}]").unwrap();
        assert!(Config::load(&dir, Some(path.as_path())).is_err());
    }

    #[test]
    fn saved_default_round_trips() {
        let (_dir, dir) = temp_dir();
        let path = dir.join("out.yml");
        Config::save_default(&path).unwrap();

        let (config, _) = Config::load(&dir, Some(path.as_path())).unwrap();
        assert_eq!(config, Config::embedded().unwrap());
    }
}
