//! Waypoint entity and great-circle geodesy.
//!
//! A [`Waypoint`] is a named point on the earth's surface with an elevation
//! and a free-form address. Distances and bearings are computed on a sphere
//! of radius [`EARTH_RADIUS_KM`] using the haversine formula.
//!
//! On the wire a waypoint is the JSON document
//! `{"lat": f64, "lon": f64, "ele": f64, "name": str, "address": str}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::protocol::error::{Result, WaypointError};

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Statute miles per kilometer.
pub const STATUTE_MILES_PER_KM: f64 = 0.62137119;

/// Nautical miles per kilometer.
pub const NAUTICAL_MILES_PER_KM: f64 = 0.5399568;

/// Name and address of the placeholder returned when a lookup fails.
pub const UNKNOWN: &str = "unknown";

/// Output scale for distance computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    /// Statute miles
    #[default]
    Statute,
    /// Nautical miles
    Nautical,
    /// Kilometers
    Kilometer,
}

impl DistanceUnit {
    /// Converts a distance in kilometers into this unit.
    pub fn from_kilometers(self, km: f64) -> f64 {
        match self {
            DistanceUnit::Kilometer => km,
            DistanceUnit::Statute => km * STATUTE_MILES_PER_KM,
            DistanceUnit::Nautical => km * NAUTICAL_MILES_PER_KM,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DistanceUnit::Statute => "miles",
            DistanceUnit::Nautical => "nautical miles",
            DistanceUnit::Kilometer => "km",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "statute" | "mi" | "miles" => Ok(DistanceUnit::Statute),
            "nautical" | "nm" => Ok(DistanceUnit::Nautical),
            "kilometer" | "km" | "kilometers" => Ok(DistanceUnit::Kilometer),
            other => Err(format!(
                "unknown distance unit '{}' (expected statute, nautical or km)",
                other
            )),
        }
    }
}

/// A named geographic location.
///
/// Latitude and longitude are degrees (+ north, + east). Ranges are not
/// enforced; out-of-range inputs still produce well-defined numbers.
/// Elevation is feet above mean sea level by convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(rename = "lat")]
    latitude: f64,
    #[serde(rename = "lon")]
    longitude: f64,
    #[serde(rename = "ele")]
    elevation: f64,
    name: String,
    address: String,
}

impl Waypoint {
    pub fn new(
        latitude: f64,
        longitude: f64,
        elevation: f64,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
            name: name.into(),
            address: address.into(),
        }
    }

    /// Builds a waypoint from user-entered text.
    ///
    /// Fails with [`WaypointError::InvalidNumber`] if any of the three
    /// numeric fields does not parse as a decimal number.
    pub fn parse(
        latitude: &str,
        longitude: &str,
        elevation: &str,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(
            parse_number(latitude)?,
            parse_number(longitude)?,
            parse_number(elevation)?,
            name,
            address,
        ))
    }

    /// The placeholder `{0, 0, 0, "unknown", "unknown"}`.
    pub fn unknown() -> Self {
        Self::new(0.0, 0.0, 0.0, UNKNOWN, UNKNOWN)
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::unknown()
    }

    /// Strictly decodes a waypoint document.
    ///
    /// Every one of `lat`, `lon`, `ele`, `name` and `address` must be present
    /// with the right JSON type.
    pub fn from_document(document: &Value) -> Result<Self> {
        Ok(Self::deserialize(document)?)
    }

    pub fn to_document(&self) -> Value {
        json!({
            "lat": self.latitude,
            "lon": self.longitude,
            "ele": self.elevation,
            "name": self.name,
            "address": self.address,
        })
    }

    /// Fails with [`WaypointError::NonFinite`] on the first NaN or infinite
    /// coordinate or elevation. JSON has no representation for either.
    pub fn check_finite(&self) -> Result<()> {
        for (field, value) in [
            ("lat", self.latitude),
            ("lon", self.longitude),
            ("ele", self.elevation),
        ] {
            if !value.is_finite() {
                return Err(WaypointError::NonFinite { field, value });
            }
        }
        Ok(())
    }

    /// Serializes the waypoint document to text.
    ///
    /// Never fails: a non-finite field or a serialization error is logged
    /// and yields an empty string.
    pub fn to_json_string(&self) -> String {
        if let Err(e) = self.check_finite() {
            tracing::error!(name = %self.name, error = %e, "Failed to serialize waypoint");
            return String::new();
        }
        match serde_json::to_string(self) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(name = %self.name, error = %e, "Failed to serialize waypoint");
                String::new()
            }
        }
    }

    /// Great-circle distance to `other` in the requested unit.
    pub fn distance_great_circle(&self, other: &Waypoint, unit: DistanceUnit) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        unit.from_kilometers(EARTH_RADIUS_KM * c)
    }

    /// Initial great-circle bearing to `other`, in degrees within (-180, 180].
    ///
    /// The result is not normalized to [0, 360); west of north is negative.
    /// `unit` has no effect on a bearing and is accepted so the signature
    /// mirrors [`distance_great_circle`](Self::distance_great_circle).
    pub fn initial_bearing_great_circle(&self, other: &Waypoint, _unit: DistanceUnit) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        // Δlat, not Δlon, in the last cosine term.
        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lat.cos();

        y.atan2(x).to_degrees()
    }

    /// Distance in statute miles and initial bearing, as text, e.g.
    /// `"12.34 miles at 45.67 degrees "`.
    pub fn describe_route_to(&self, other: &Waypoint) -> String {
        let distance = self.distance_great_circle(other, DistanceUnit::Statute);
        let bearing = self.initial_bearing_great_circle(other, DistanceUnit::Statute);
        format!("{:.2} miles at {:.2} degrees ", distance, bearing)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn set_latitude(&mut self, latitude: f64) {
        self.latitude = latitude;
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn set_longitude(&mut self, longitude: f64) {
        self.longitude = longitude;
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn set_elevation(&mut self, elevation: f64) {
        self.elevation = elevation;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Waypoint {}: lat->{} lon->{} elevation->{}",
            self.name, self.latitude, self.longitude, self.elevation
        )
    }
}

impl TryFrom<&Value> for Waypoint {
    type Error = WaypointError;

    fn try_from(document: &Value) -> Result<Self> {
        Self::from_document(document)
    }
}

impl From<&Waypoint> for Value {
    fn from(waypoint: &Waypoint) -> Self {
        waypoint.to_document()
    }
}

fn parse_number(input: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|source| WaypointError::InvalidNumber {
            input: input.to_string(),
            source,
        })
}
