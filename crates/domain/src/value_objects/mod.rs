//! Value Objects - Immutable, identity-less domain primitives

mod coordinates;
mod location;
mod measurement;
mod session_id;
mod weather_code;

pub use coordinates::{Coordinates, InvalidCoordinates};
pub use location::Location;
pub use measurement::Measurement;
pub use session_id::SessionId;
pub use weather_code::{WeatherCode, describe};
