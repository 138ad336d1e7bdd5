use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Export semantics of a metric's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, Display, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    /// A value that can go up and down, such as a temperature.
    #[default]
    Gauge,

    /// A monotonically increasing value, such as a message count.
    Counter,
}
