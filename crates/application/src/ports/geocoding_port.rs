//! Geocoding service port
//!
//! Defines the interface for turning a place name into candidate locations.

use async_trait::async_trait;
use domain::value_objects::{Coordinates, Location};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// One place returned by a geocoding search
///
/// Fields are kept as the service reported them. Only the candidate that is
/// eventually picked gets checked, see [`PlaceCandidate::to_location`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Place name
    pub name: Option<String>,
    /// Country name
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: Option<String>,
    /// First-level administrative area
    pub region: Option<String>,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
}

impl PlaceCandidate {
    /// Whether this candidate lies in the country with the given ISO code
    ///
    /// Comparison ignores ASCII case. Candidates without a code never match.
    #[must_use]
    pub fn in_country(&self, code: &str) -> bool {
        self.country_code
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(code))
    }

    /// Convert into a resolved location
    ///
    /// A missing region becomes the empty string.
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the name, country or position is
    /// missing, or the position is out of range.
    pub fn to_location(&self) -> Result<Location, ApplicationError> {
        let name = required(self.name.as_deref(), "name")?;
        let country = required(self.country.as_deref(), "country")?;
        let latitude = required(self.latitude, "latitude")?;
        let longitude = required(self.longitude, "longitude")?;

        let coordinates = Coordinates::new(latitude, longitude).map_err(|e| {
            ApplicationError::MalformedResponse(format!("candidate '{name}': {e}"))
        })?;

        Ok(Location::new(
            name,
            country,
            self.region.clone().unwrap_or_default(),
            coordinates,
        ))
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApplicationError> {
    value.ok_or_else(|| {
        ApplicationError::MalformedResponse(format!("geocoding candidate without `{field}`"))
    })
}

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search for places by name, best match first
    ///
    /// Returns an empty vector when nothing matched.
    async fn search_places(&self, name: &str) -> Result<Vec<PlaceCandidate>, ApplicationError>;
}
