//! Weather use cases
//!
//! Resolves place names into locations and fetches display-ready current
//! conditions. Both operations work against a caller-supplied
//! [`LocationContext`], so one service instance can serve many sessions.

use std::{fmt, sync::Arc};

use domain::{Coordinates, CurrentWeatherReport, Location, ReportParts};
use tracing::{debug, info, instrument, warn};

use super::LocationContext;
use crate::{
    error::ApplicationError,
    ports::{GeocodingPort, PlaceCandidate, WeatherPort},
};

/// Service combining geocoding and current weather lookups
pub struct WeatherService {
    geocoding: Arc<dyn GeocodingPort>,
    weather: Arc<dyn WeatherPort>,
}

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherService").finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a new weather service
    pub fn new(geocoding: Arc<dyn GeocodingPort>, weather: Arc<dyn WeatherPort>) -> Self {
        Self { geocoding, weather }
    }

    /// Resolve a city name into a location and remember it in `ctx`
    ///
    /// With a country hint the first candidate in that country wins;
    /// otherwise, or if no candidate matches the hint, the first candidate does.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a blank city name (no upstream call is made)
    /// - `NotFound` when the search yields no candidates
    /// - `MalformedResponse` when the chosen candidate is incomplete; other
    ///   candidates are never inspected
    /// - `Upstream` as reported by the geocoding port
    #[instrument(skip(self, ctx))]
    pub async fn resolve_city(
        &self,
        ctx: &LocationContext,
        city: &str,
        country_hint: Option<&str>,
    ) -> Result<Location, ApplicationError> {
        let query = city.trim();
        if query.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "city name must not be empty".to_string(),
            ));
        }

        let candidates = self.geocoding.search_places(query).await?;
        let hint = country_hint.map(str::trim).filter(|h| !h.is_empty());

        let Some(chosen) = select_candidate(&candidates, hint) else {
            return Err(ApplicationError::NotFound(format!(
                "City '{city}' not found. Please check the spelling or try a different city name."
            )));
        };

        let location = chosen.to_location()?;
        info!(
            name = %location.name,
            country = %location.country,
            coords = %location.coordinates,
            "Resolved city"
        );

        ctx.set(location.clone());
        Ok(location)
    }

    /// Fetch current conditions for the session
    ///
    /// A location stored in `ctx` takes precedence over `explicit`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if neither a stored location nor explicit coordinates exist
    /// - `Upstream` / `MalformedResponse` as reported by the weather port
    #[instrument(skip(self, ctx))]
    pub async fn fetch_current(
        &self,
        ctx: &LocationContext,
        explicit: Option<Coordinates>,
    ) -> Result<CurrentWeatherReport, ApplicationError> {
        let (coordinates, label) = match (ctx.get(), explicit) {
            (Some(location), _) => {
                let label = format!("Current Weather at {}", location.label());
                (location.coordinates, label)
            },
            (None, Some(coords)) => (
                coords,
                format!(
                    "Current Weather at your location ({:.2}, {:.2})",
                    coords.latitude(),
                    coords.longitude()
                ),
            ),
            (None, None) => {
                return Err(ApplicationError::InvalidInput(
                    "no location available: resolve a city first or provide coordinates"
                        .to_string(),
                ));
            },
        };
        debug!(%coordinates, %label, "Fetching current weather");

        let conditions = self.weather.get_current_conditions(&coordinates).await?;
        if !conditions.weather_code.is_known() {
            warn!(code = conditions.weather_code.code(), "Unknown WMO weather code");
        }

        Ok(CurrentWeatherReport::assemble(&ReportParts {
            label: &label,
            weather_code: conditions.weather_code,
            temperature: &conditions.temperature,
            apparent_temperature: &conditions.apparent_temperature,
            humidity: &conditions.humidity,
            wind_speed: &conditions.wind_speed,
            wind_direction: &conditions.wind_direction,
            precipitation: &conditions.precipitation,
            time: &conditions.time,
            timezone: &conditions.timezone,
        }))
    }
}

/// Pick a candidate: the first one in the hinted country, else the first one
///
/// Returns `None` only for an empty list.
pub fn select_candidate<'a>(
    candidates: &'a [PlaceCandidate],
    country_hint: Option<&str>,
) -> Option<&'a PlaceCandidate> {
    let hinted = country_hint.and_then(|code| candidates.iter().find(|c| c.in_country(code)));
    if let Some(code) = country_hint {
        debug!(%code, matched = hinted.is_some(), "Applied country hint");
    }
    hinted.or_else(|| candidates.first())
}

#[cfg(test)]
mod tests {
    use domain::{Measurement, WeatherCode};

    use super::*;
    use crate::ports::{CurrentConditions, MockGeocodingPort, MockWeatherPort};

    fn candidate(name: &str, country: &str, code: &str, lat: f64, lon: f64) -> PlaceCandidate {
        PlaceCandidate {
            name: Some(name.to_string()),
            country: Some(country.to_string()),
            country_code: Some(code.to_string()),
            region: Some(format!("{name} Region")),
            latitude: Some(lat),
            longitude: Some(lon),
        }
    }

    fn springfields() -> Vec<PlaceCandidate> {
        vec![
            candidate("Springfield", "New Zealand", "NZ", -43.3, 172.0),
            candidate("Springfield", "United States", "US", 39.8, -89.64),
            candidate("Springfield", "United States", "US", 37.2, -93.29),
        ]
    }

    fn sample_conditions() -> CurrentConditions {
        CurrentConditions {
            time: "2024-01-15T12:00".to_string(),
            timezone: "Europe/Paris".to_string(),
            weather_code: WeatherCode::new(0),
            temperature: Measurement::new("21.5", "°C"),
            apparent_temperature: Measurement::new("19.8", "°C"),
            humidity: Measurement::new("65", "%"),
            wind_speed: Measurement::new("12.5", "km/h"),
            wind_direction: Measurement::new("225", "°"),
            precipitation: Measurement::new("0.0", "mm"),
        }
    }

    fn service(geocoding: MockGeocodingPort, weather: MockWeatherPort) -> WeatherService {
        WeatherService::new(Arc::new(geocoding), Arc::new(weather))
    }

    // ------------------------------------------------------------------
    // select_candidate
    // ------------------------------------------------------------------

    #[test]
    fn select_without_hint_takes_first() {
        let list = springfields();
        let chosen = select_candidate(&list, None).expect("non-empty");
        assert_eq!(chosen.country.as_deref(), Some("New Zealand"));
    }

    #[test]
    fn select_with_hint_takes_first_match() {
        let list = springfields();
        let chosen = select_candidate(&list, Some("us")).expect("non-empty");
        assert_eq!(chosen.country_code.as_deref(), Some("US"));
        assert_eq!(chosen.latitude, Some(39.8));
    }

    #[test]
    fn select_with_unmatched_hint_falls_back_to_first() {
        let list = springfields();
        let chosen = select_candidate(&list, Some("FR")).expect("non-empty");
        assert_eq!(chosen.country.as_deref(), Some("New Zealand"));
    }

    #[test]
    fn select_empty_list() {
        assert!(select_candidate(&[], Some("US")).is_none());
    }

    // ------------------------------------------------------------------
    // resolve_city
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn resolve_with_hint_stores_location() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_search_places()
            .withf(|name| name == "Springfield")
            .times(1)
            .returning(|_| Ok(springfields()));

        let svc = service(geocoding, MockWeatherPort::new());
        let ctx = LocationContext::new();

        let location = svc
            .resolve_city(&ctx, "Springfield", Some("US"))
            .await
            .expect("resolved");

        assert_eq!(location.country, "United States");
        assert_eq!(location.region, "Springfield Region");
        assert_eq!(ctx.get(), Some(location));
    }

    #[tokio::test]
    async fn resolve_blank_hint_is_no_hint() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_search_places()
            .returning(|_| Ok(springfields()));

        let svc = service(geocoding, MockWeatherPort::new());
        let ctx = LocationContext::new();
        let location = svc
            .resolve_city(&ctx, "Springfield", Some("  "))
            .await
            .expect("resolved");
        assert_eq!(location.country, "New Zealand");
    }

    #[tokio::test]
    async fn resolve_missing_region_is_empty() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_search_places().returning(|_| {
            Ok(vec![PlaceCandidate {
                region: None,
                ..candidate("Monaco", "Monaco", "MC", 43.73, 7.42)
            }])
        });

        let svc = service(geocoding, MockWeatherPort::new());
        let location = svc
            .resolve_city(&LocationContext::new(), "Monaco", None)
            .await
            .expect("resolved");
        assert_eq!(location.region, "");
    }

    #[tokio::test]
    async fn resolve_ignores_incomplete_candidates_it_does_not_pick() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_search_places().returning(|_| {
            Ok(vec![
                candidate("Kingston", "Jamaica", "JM", 17.99, -76.79),
                PlaceCandidate {
                    country: None,
                    latitude: Some(444.0),
                    ..candidate("Kingston", "", "CA", 0.0, -76.48)
                },
            ])
        });

        let svc = service(geocoding, MockWeatherPort::new());
        let ctx = LocationContext::new();
        let location = svc
            .resolve_city(&ctx, "Kingston", None)
            .await
            .expect("resolved");
        assert_eq!(location.country, "Jamaica");
        assert_eq!(ctx.get(), Some(location));
    }

    #[tokio::test]
    async fn resolve_incomplete_chosen_candidate_is_malformed() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_search_places().returning(|_| {
            Ok(vec![
                candidate("Kingston", "Jamaica", "JM", 17.99, -76.79),
                PlaceCandidate {
                    country: None,
                    ..candidate("Kingston", "", "CA", 44.23, -76.48)
                },
            ])
        });

        let svc = service(geocoding, MockWeatherPort::new());
        let ctx = LocationContext::new();
        let err = svc
            .resolve_city(&ctx, "Kingston", Some("CA"))
            .await
            .expect_err("incomplete");
        assert!(matches!(err, ApplicationError::MalformedResponse(_)));
        assert!(ctx.get().is_none());
    }

    #[tokio::test]
    async fn resolve_not_found_mentions_city() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_search_places().returning(|_| Ok(vec![]));

        let svc = service(geocoding, MockWeatherPort::new());
        let ctx = LocationContext::new();
        let err = svc
            .resolve_city(&ctx, "Nonexistent City Name", None)
            .await
            .expect_err("not found");

        assert!(matches!(err, ApplicationError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            "City 'Nonexistent City Name' not found. Please check the spelling or try a different city name."
        );
        assert!(ctx.get().is_none());
    }

    #[tokio::test]
    async fn resolve_blank_city_skips_upstream() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_search_places().never();

        let svc = service(geocoding, MockWeatherPort::new());
        let err = svc
            .resolve_city(&LocationContext::new(), "   ", None)
            .await
            .expect_err("invalid");
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn resolve_upstream_failure_keeps_previous_location() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_search_places()
            .returning(|_| Err(ApplicationError::Upstream("HTTP 503".to_string())));

        let svc = service(geocoding, MockWeatherPort::new());
        let ctx = LocationContext::new();
        let previous = Location::new(
            "Oslo",
            "Norway",
            "Oslo",
            Coordinates::new(59.91, 10.75).expect("valid"),
        );
        ctx.set(previous.clone());

        let err = svc
            .resolve_city(&ctx, "Bergen", None)
            .await
            .expect_err("upstream");
        assert!(matches!(err, ApplicationError::Upstream(_)));
        assert_eq!(ctx.get(), Some(previous));
    }

    // ------------------------------------------------------------------
    // fetch_current
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn fetch_with_explicit_coordinates() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_get_current_conditions()
            .withf(|c| (c.latitude() - 48.8566).abs() < 1e-9)
            .times(1)
            .returning(|_| Ok(sample_conditions()));

        let svc = service(MockGeocodingPort::new(), weather);
        let coords = Coordinates::new(48.8566, 2.3522).expect("valid");
        let report = svc
            .fetch_current(&LocationContext::new(), Some(coords))
            .await
            .expect("report");

        assert_eq!(report.location, "Current Weather at your location (48.86, 2.35)");
        assert_eq!(report.conditions, "Clear sky");
        assert_eq!(report.temperature, "21.5°C");
        assert_eq!(report.feels_like, "19.8°C");
        assert_eq!(report.humidity, "65%");
        assert_eq!(report.wind, "12.5 km/h from 225°");
        assert_eq!(report.precipitation, "0.0mm");
        assert_eq!(report.data_time, "2024-01-15T12:00 (Europe/Paris)");
    }

    #[tokio::test]
    async fn fetch_prefers_stored_location() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_search_places()
            .returning(|_| Ok(springfields()));

        let mut weather = MockWeatherPort::new();
        weather
            .expect_get_current_conditions()
            .withf(|c| (c.latitude() - 39.8).abs() < 1e-9)
            .times(2)
            .returning(|_| Ok(sample_conditions()));

        let svc = service(geocoding, weather);
        let ctx = LocationContext::new();
        svc.resolve_city(&ctx, "Springfield", Some("US"))
            .await
            .expect("resolved");

        let report = svc.fetch_current(&ctx, None).await.expect("report");
        assert_eq!(report.location, "Current Weather at Springfield, United States");

        let elsewhere = Coordinates::new(-33.87, 151.21).expect("valid");
        let report = svc
            .fetch_current(&ctx, Some(elsewhere))
            .await
            .expect("report");
        assert!(report.location.contains("Springfield"));
        assert!(report.location.contains("United States"));
    }

    #[tokio::test]
    async fn fetch_without_any_location_is_invalid_input() {
        let mut weather = MockWeatherPort::new();
        weather.expect_get_current_conditions().never();

        let svc = service(MockGeocodingPort::new(), weather);
        let err = svc
            .fetch_current(&LocationContext::new(), None)
            .await
            .expect_err("no location");
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn fetch_propagates_malformed_response() {
        let mut weather = MockWeatherPort::new();
        weather.expect_get_current_conditions().returning(|_| {
            Err(ApplicationError::MalformedResponse(
                "missing field `current_units`".to_string(),
            ))
        });

        let svc = service(MockGeocodingPort::new(), weather);
        let coords = Coordinates::new(0.0, 0.0).expect("valid");
        let err = svc
            .fetch_current(&LocationContext::new(), Some(coords))
            .await
            .expect_err("malformed");
        assert!(matches!(err, ApplicationError::MalformedResponse(_)));
    }
}
