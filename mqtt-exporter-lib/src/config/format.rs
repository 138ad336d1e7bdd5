use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::de::DeserializeOwned;

/// Serialization format of a configuration file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Files without a recognized extension are treated as YAML.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T> {
        match self {
            Self::Yaml => serde_yaml::from_str(text).into_app_err("invalid YAML"),
            Self::Toml => toml::from_str(text).into_app_err("invalid TOML"),
            Self::Json => serde_json::from_str(text).into_app_err("invalid JSON"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("a.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("a.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("dir/a.TOML")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("config")), ConfigFormat::Yaml);
    }

    #[test]
    fn parses_each_format() {
        let expected = BTreeMap::from([("a".to_string(), 1)]);
        assert_eq!(ConfigFormat::Yaml.parse::<BTreeMap<String, i32>>("a: 1").unwrap(), expected);
        assert_eq!(ConfigFormat::Toml.parse::<BTreeMap<String, i32>>("a = 1").unwrap(), expected);
        assert_eq!(ConfigFormat::Json.parse::<BTreeMap<String, i32>>(r#"{"a": 1}"#).unwrap(), expected);
    }

    #[test]
    fn reports_parse_errors() {
        assert!(ConfigFormat::Yaml.parse::<BTreeMap<String, i32>>("a: [").is_err());
        assert!(ConfigFormat::Toml.parse::<BTreeMap<String, i32>>("a = ").is_err());
        assert!(ConfigFormat::Json.parse::<BTreeMap<String, i32>>("{").is_err());
    }
}
