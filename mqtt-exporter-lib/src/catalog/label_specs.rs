use indexmap::IndexMap;

/// Ordered label name to topic segment index pairs.
///
/// Positive indices count from the start of the `/`-split topic, negative indices from the
/// end. Declaration order defines the label column order of exported metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSpecs {
    specs: IndexMap<String, i32>,
}

impl LabelSpecs {
    #[must_use]
    pub const fn new(specs: IndexMap<String, i32>) -> Self {
        Self { specs }
    }

    /// Label names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Topic indices in declaration order.
    pub fn indices(&self) -> impl Iterator<Item = i32> + '_ {
        self.specs.values().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i32)> for LabelSpecs {
    fn from_iter<T: IntoIterator<Item = (S, i32)>>(iter: T) -> Self {
        Self {
            specs: iter.into_iter().map(|(name, idx)| (name.into(), idx)).collect(),
        }
    }
}
