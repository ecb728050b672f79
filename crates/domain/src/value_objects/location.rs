//! Resolved place value object

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// A named place resolved by geocoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Place name as reported by the geocoder (e.g. "Springfield")
    pub name: String,
    /// Country name (e.g. "United States")
    pub country: String,
    /// First-level administrative region (state, province); empty when unknown
    pub region: String,
    /// Position of the place
    pub coordinates: Coordinates,
}

impl Location {
    /// Create a new location
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        region: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            region: region.into(),
            coordinates,
        }
    }

    /// Short label used in weather headings, e.g. `Paris, France`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}
