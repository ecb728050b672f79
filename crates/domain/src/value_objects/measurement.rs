//! A reported value together with the unit the reporting service used

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value as rendered by the upstream service, paired with its unit
///
/// The value is kept as text so that `21.5` stays `21.5` and `75` stays `75`,
/// exactly as the provider sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Rendered numeric value
    pub value: String,
    /// Unit string, e.g. `°C`, `%`, `km/h`
    pub unit: String,
}

impl Measurement {
    /// Create a new measurement
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }

    /// Value and unit without separator, e.g. `21.5°C`
    #[must_use]
    pub fn compact(&self) -> String {
        format!("{}{}", self.value, self.unit)
    }

    /// Value and unit separated by a space, e.g. `12.5 km/h`
    #[must_use]
    pub fn spaced(&self) -> String {
        format!("{} {}", self.value, self.unit)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}
