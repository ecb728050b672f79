//! Agent tool boundary
//!
//! Exposes the weather use cases as two named tools with JSON arguments and
//! JSON output. Inside this module errors stay typed; [`WeatherTools::call`]
//! turns them into the caller-facing text an agent can read back.

use std::sync::Arc;

use domain::{Coordinates, DomainError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use super::{LocationContext, WeatherService};
use crate::error::ApplicationError;

/// Tool name for city geocoding
pub const GET_COORDS_BY_CITY: &str = "get_coords_by_city";

/// Tool name for the current weather lookup
pub const GET_CURRENT_WEATHER_BY_COORDS: &str = "get_current_weather_by_coords";

/// Metadata describing one tool to an agent runtime
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    /// Tool name used for invocation
    pub name: &'static str,
    /// When the model should call this tool
    pub description: &'static str,
    /// JSON schema of the arguments object
    pub parameters: Value,
}

/// Result of a tool invocation as handed back to the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Whether the tool succeeded
    pub success: bool,
    /// JSON payload on success, descriptive failure otherwise
    pub output: Value,
}

impl ToolOutput {
    /// Successful output
    pub const fn ok(output: Value) -> Self {
        Self {
            success: true,
            output,
        }
    }

    /// Render an error the way the named tool reports failures
    pub fn render_error(tool: &str, err: &ApplicationError) -> Self {
        let output = match tool {
            GET_COORDS_BY_CITY => Value::String(match err {
                ApplicationError::NotFound(msg) => msg.clone(),
                ApplicationError::Upstream(msg) => format!("Error fetching coordinates: {msg}"),
                other => format!("Unexpected error: {other}"),
            }),
            GET_CURRENT_WEATHER_BY_COORDS => {
                let message = match err {
                    ApplicationError::Upstream(msg) => {
                        format!("Error fetching weather data: {msg}")
                    },
                    other => format!("Unexpected error: {other}"),
                };
                json!({ "error": message })
            },
            _ => Value::String(format!("Unexpected error: {err}")),
        };
        Self {
            success: false,
            output,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CoordsByCityArgs {
    city: String,
    #[serde(default)]
    country: String,
}

/// Explicit position as sent by the caller, range-checked only when used
#[derive(Debug, Clone, Copy, Deserialize)]
struct CoordinateArgs {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentWeatherArgs {
    #[serde(default)]
    coords: Option<CoordinateArgs>,
}

/// The weather tools bound to a [`WeatherService`]
#[derive(Debug, Clone)]
pub struct WeatherTools {
    service: Arc<WeatherService>,
}

impl WeatherTools {
    /// Create the tool set
    pub fn new(service: Arc<WeatherService>) -> Self {
        Self { service }
    }

    /// Tool metadata for registration with an agent runtime
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: GET_COORDS_BY_CITY,
                description: "Get latitude and longitude for a city (and optional country). \
                    Use when you need coordinates for a place name, e.g. to pass to other \
                    tools or to confirm a location.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "The city name (e.g., 'London', 'New York', 'Tokyo')"
                        },
                        "country": {
                            "type": "string",
                            "description": "Optional country code to disambiguate (e.g., 'US', 'UK')",
                            "default": ""
                        }
                    },
                    "required": ["city"]
                }),
            },
            ToolDefinition {
                name: GET_CURRENT_WEATHER_BY_COORDS,
                description: "Get the current weather at a location given its latitude and \
                    longitude. Use this when you have coordinates (e.g. from getUserLocation). \
                    Returns temperature, humidity, wind, and conditions.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "coords": {
                            "type": "object",
                            "description": "The coordinates of the location",
                            "properties": {
                                "latitude": {
                                    "type": "number",
                                    "minimum": -90,
                                    "maximum": 90
                                },
                                "longitude": {
                                    "type": "number",
                                    "minimum": -180,
                                    "maximum": 180
                                }
                            },
                            "required": ["latitude", "longitude"]
                        }
                    }
                }),
            },
        ]
    }

    /// Invoke a tool by name with typed errors
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an unknown tool, malformed arguments, or explicit
    /// coordinates out of range while no location is stored; otherwise
    /// whatever the underlying use case reports.
    #[instrument(skip(self, ctx, args))]
    pub async fn invoke(
        &self,
        ctx: &LocationContext,
        name: &str,
        args: Value,
    ) -> Result<ToolOutput, ApplicationError> {
        match name {
            GET_COORDS_BY_CITY => {
                let args: CoordsByCityArgs = parse_args(args)?;
                let hint = Some(args.country.as_str()).filter(|c| !c.trim().is_empty());
                let location = self.service.resolve_city(ctx, &args.city, hint).await?;
                let output = serde_json::to_value(location.coordinates)
                    .map_err(|e| ApplicationError::Internal(e.to_string()))?;
                Ok(ToolOutput::ok(output))
            },
            GET_CURRENT_WEATHER_BY_COORDS => {
                let args: CurrentWeatherArgs = if args.is_null() {
                    CurrentWeatherArgs::default()
                } else {
                    parse_args(args)?
                };
                // A stored location wins, and unused coordinates are not checked.
                let explicit = match args.coords {
                    Some(_) if ctx.is_set() => None,
                    Some(raw) => Some(
                        Coordinates::new(raw.latitude, raw.longitude).map_err(DomainError::from)?,
                    ),
                    None => None,
                };
                let report = self.service.fetch_current(ctx, explicit).await?;
                let output = serde_json::to_value(report)
                    .map_err(|e| ApplicationError::Internal(e.to_string()))?;
                Ok(ToolOutput::ok(output))
            },
            other => Err(ApplicationError::InvalidInput(format!(
                "unknown tool '{other}'"
            ))),
        }
    }

    /// Invoke a tool and always produce an output
    ///
    /// Failures are rendered into the tool's failure format instead of
    /// being returned as errors.
    pub async fn call(&self, ctx: &LocationContext, name: &str, args: Value) -> ToolOutput {
        match self.invoke(ctx, name, args).await {
            Ok(output) => {
                debug!(tool = %name, "Tool succeeded");
                output
            },
            Err(e) => {
                warn!(
                    tool = %name,
                    error = %e,
                    upstream = e.is_upstream(),
                    client_error = e.is_client_error(),
                    "Tool failed"
                );
                ToolOutput::render_error(name, &e)
            },
        }
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(args: Value) -> Result<T, ApplicationError> {
    serde_json::from_value(args)
        .map_err(|e| ApplicationError::InvalidInput(format!("invalid arguments: {e}")))
}

#[cfg(test)]
mod tests {
    use domain::{Measurement, WeatherCode};

    use super::*;
    use crate::ports::{CurrentConditions, MockGeocodingPort, MockWeatherPort, PlaceCandidate};

    fn london() -> PlaceCandidate {
        PlaceCandidate {
            name: Some("London".to_string()),
            country: Some("United Kingdom".to_string()),
            country_code: Some("GB".to_string()),
            region: Some("England".to_string()),
            latitude: Some(51.50853),
            longitude: Some(-0.12574),
        }
    }

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            time: "2024-06-01T09:15".to_string(),
            timezone: "Europe/London".to_string(),
            weather_code: WeatherCode::new(61),
            temperature: Measurement::new("14.2", "°C"),
            apparent_temperature: Measurement::new("12.9", "°C"),
            humidity: Measurement::new("88", "%"),
            wind_speed: Measurement::new("18.4", "km/h"),
            wind_direction: Measurement::new("240", "°"),
            precipitation: Measurement::new("0.6", "mm"),
        }
    }

    fn tools(geocoding: MockGeocodingPort, weather: MockWeatherPort) -> WeatherTools {
        WeatherTools::new(Arc::new(WeatherService::new(
            Arc::new(geocoding),
            Arc::new(weather),
        )))
    }

    #[test]
    fn definitions_name_both_tools() {
        let defs = WeatherTools::definitions();
        let names: Vec<_> = defs.iter().map(|d| d.name).collect();
        assert_eq!(names, [GET_COORDS_BY_CITY, GET_CURRENT_WEATHER_BY_COORDS]);
        assert_eq!(defs[0].parameters["required"], json!(["city"]));
    }

    #[tokio::test]
    async fn coords_tool_returns_coordinates_json() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_search_places()
            .returning(|_| Ok(vec![london()]));

        let tools = tools(geocoding, MockWeatherPort::new());
        let ctx = LocationContext::new();
        let out = tools
            .call(&ctx, GET_COORDS_BY_CITY, json!({"city": "London"}))
            .await;

        assert!(out.success);
        assert_eq!(
            out.output,
            json!({"latitude": 51.50853, "longitude": -0.12574})
        );
        assert!(ctx.is_set());
    }

    #[tokio::test]
    async fn coords_tool_not_found_is_plain_message() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_search_places().returning(|_| Ok(vec![]));

        let tools = tools(geocoding, MockWeatherPort::new());
        let out = tools
            .call(
                &LocationContext::new(),
                GET_COORDS_BY_CITY,
                json!({"city": "Atlantis", "country": ""}),
            )
            .await;

        assert!(!out.success);
        assert_eq!(
            out.output,
            json!(
                "City 'Atlantis' not found. Please check the spelling or try a different city name."
            )
        );
    }

    #[tokio::test]
    async fn coords_tool_upstream_failure() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_search_places()
            .returning(|_| Err(ApplicationError::Upstream("HTTP 502 Bad Gateway".to_string())));

        let tools = tools(geocoding, MockWeatherPort::new());
        let out = tools
            .call(&LocationContext::new(), GET_COORDS_BY_CITY, json!({"city": "Paris"}))
            .await;

        assert_eq!(
            out.output,
            json!("Error fetching coordinates: HTTP 502 Bad Gateway")
        );
    }

    #[tokio::test]
    async fn coords_tool_missing_city_argument() {
        let tools = tools(MockGeocodingPort::new(), MockWeatherPort::new());
        let out = tools
            .call(&LocationContext::new(), GET_COORDS_BY_CITY, json!({"country": "US"}))
            .await;

        assert!(!out.success);
        let text = out.output.as_str().expect("string output");
        assert!(text.starts_with("Unexpected error: Invalid input"));
    }

    #[tokio::test]
    async fn weather_tool_uses_resolved_location() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_search_places()
            .returning(|_| Ok(vec![london()]));
        let mut weather = MockWeatherPort::new();
        weather
            .expect_get_current_conditions()
            .returning(|_| Ok(conditions()));

        let tools = tools(geocoding, weather);
        let ctx = LocationContext::new();
        tools
            .invoke(&ctx, GET_COORDS_BY_CITY, json!({"city": "London", "country": "GB"}))
            .await
            .expect("resolved");

        let out = tools
            .call(&ctx, GET_CURRENT_WEATHER_BY_COORDS, Value::Null)
            .await;
        assert!(out.success);
        assert_eq!(out.output["location"], "Current Weather at London, United Kingdom");
        assert_eq!(out.output["conditions"], "Slight rain");
        assert_eq!(out.output["feelsLike"], "12.9°C");
        assert_eq!(out.output["wind"], "18.4 km/h from 240°");
    }

    #[tokio::test]
    async fn weather_tool_upstream_failure_is_error_object() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_get_current_conditions()
            .returning(|_| Err(ApplicationError::Upstream("request timed out".to_string())));

        let tools = tools(MockGeocodingPort::new(), weather);
        let out = tools
            .call(
                &LocationContext::new(),
                GET_CURRENT_WEATHER_BY_COORDS,
                json!({"coords": {"latitude": 10.0, "longitude": 20.0}}),
            )
            .await;

        assert!(!out.success);
        assert_eq!(
            out.output,
            json!({"error": "Error fetching weather data: request timed out"})
        );
    }

    #[tokio::test]
    async fn weather_tool_out_of_range_coordinates() {
        let mut weather = MockWeatherPort::new();
        weather.expect_get_current_conditions().never();

        let tools = tools(MockGeocodingPort::new(), weather);
        let result = tools
            .invoke(
                &LocationContext::new(),
                GET_CURRENT_WEATHER_BY_COORDS,
                json!({"coords": {"latitude": 95.0, "longitude": 0.0}}),
            )
            .await;
        match result {
            Err(ApplicationError::InvalidInput(msg)) => assert!(msg.contains("latitude")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stored_location_wins_over_out_of_range_coordinates() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_search_places()
            .returning(|_| Ok(vec![london()]));
        let mut weather = MockWeatherPort::new();
        weather
            .expect_get_current_conditions()
            .withf(|c| (c.latitude() - 51.50853).abs() < 1e-9)
            .times(1)
            .returning(|_| Ok(conditions()));

        let tools = tools(geocoding, weather);
        let ctx = LocationContext::new();
        tools
            .invoke(&ctx, GET_COORDS_BY_CITY, json!({"city": "London"}))
            .await
            .expect("resolved");

        let out = tools
            .call(
                &ctx,
                GET_CURRENT_WEATHER_BY_COORDS,
                json!({"coords": {"latitude": 95.0, "longitude": 500.0}}),
            )
            .await;
        assert!(out.success);
        assert_eq!(out.output["location"], "Current Weather at London, United Kingdom");
    }

    #[tokio::test]
    async fn weather_tool_without_location() {
        let tools = tools(MockGeocodingPort::new(), MockWeatherPort::new());
        let out = tools
            .call(&LocationContext::new(), GET_CURRENT_WEATHER_BY_COORDS, json!({}))
            .await;
        let message = out.output["error"].as_str().expect("error text");
        assert!(message.starts_with("Unexpected error: Invalid input: no location available"));
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let tools = tools(MockGeocodingPort::new(), MockWeatherPort::new());
        let result = tools
            .invoke(&LocationContext::new(), "get_forecast", json!({}))
            .await;
        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
    }
}
