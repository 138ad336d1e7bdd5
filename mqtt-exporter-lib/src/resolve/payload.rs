use indexmap::IndexMap;

/// A parsed structured payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Object(IndexMap<String, Self>),
    Array(Vec<Self>),
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl PayloadValue {
    /// Parse a JSON document.
    pub fn parse(payload: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice::<serde_json::Value>(payload).map(Self::from)
    }

    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Whether this is a leaf rather than an object or array.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Follow `segments` through nested objects.
    ///
    /// Returns `None` if a key is absent or an intermediate value is not an object.
    #[must_use]
    pub fn walk<'a, 's>(&'a self, segments: impl IntoIterator<Item = &'s str>) -> Option<&'a Self> {
        segments.into_iter().try_fold(self, |current, segment| match current {
            Self::Object(fields) => fields.get(segment),
            _ => None,
        })
    }

    /// Numeric interpretation of a leaf.
    ///
    /// Numbers convert directly and text converts when it holds a number. Every other variant
    /// has no numeric value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Object(_) | Self::Array(_) | Self::Bool(_) | Self::Null => None,
        }
    }
}

impl From<serde_json::Value> for PayloadValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(fields) => Self::Object(fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
            serde_json::Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Null => Self::Null,
        }
    }
}
