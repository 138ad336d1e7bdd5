use core::fmt::{Display, Formatter, Result as FmtResult};

/// A dotted address into a JSON payload, such as `temperatures.out`.
///
/// The suffix appended to the metric's base name is the last segment of the path, so
/// `temperatures.out` on metric `climate` is exported as `climate_out`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    path: Box<str>,
    export_name: Box<str>,
}

impl FieldPath {
    /// Create a field path for the metric with the given base name.
    #[must_use]
    pub fn new(base_name: &str, path: impl AsRef<str>) -> Self {
        let path = path.as_ref();
        let suffix = Self::suffix_of(path);
        Self {
            path: Box::from(path),
            export_name: format!("{base_name}_{suffix}").into_boxed_str(),
        }
    }

    /// The path exactly as configured.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The last segment of the path.
    #[must_use]
    pub fn suffix(&self) -> &str {
        Self::suffix_of(&self.path)
    }

    /// The name under which values resolved from this path are exported.
    #[must_use]
    pub fn export_name(&self) -> &str {
        &self.export_name
    }

    /// The path segments for a literal walk.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }

    /// The path with every `.` replaced by `_`, for payloads that flatten nested names.
    #[must_use]
    pub fn flattened(&self) -> String {
        self.path.replace('.', "_")
    }

    fn suffix_of(path: &str) -> &str {
        path.rsplit('.').next().unwrap_or(path)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.path)
    }
}
