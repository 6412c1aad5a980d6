//! # Geolocation
//!
//! GPS coordinates captured at attendance time. The constraint validator
//! consumes locations as JSON data URIs (the capture device encodes
//! `{"latitude": .., "longitude": ..}` inline), so [`GeoLocation`]
//! provides both directions of that encoding.

use serde::{Deserialize, Serialize};

use crate::data_uri::DataUri;
use crate::error::ValidationError;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Degrees north, in [-90, 90].
    pub latitude: f64,
    /// Degrees east, in [-180, 180].
    pub longitude: f64,
}

impl GeoLocation {
    /// Create a location, validating coordinate ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) || latitude.is_nan() {
            return Err(ValidationError::CoordinateOutOfRange {
                field: "latitude",
                value: latitude,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) || longitude.is_nan() {
            return Err(ValidationError::CoordinateOutOfRange {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Encode as the JSON data URI the constraint validator expects.
    pub fn to_data_uri(&self) -> Result<DataUri, ValidationError> {
        DataUri::from_json(&serde_json::json!({
            "latitude": self.latitude,
            "longitude": self.longitude,
        }))
    }

    /// Decode a location from a JSON data URI.
    pub fn from_data_uri(uri: &DataUri) -> Result<Self, ValidationError> {
        let bytes = uri.decode()?;
        let raw: GeoLocation = serde_json::from_slice(&bytes)?;
        Self::new(raw.latitude, raw.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_data_uri() {
        let loc = GeoLocation::new(24.8607, 67.0011).unwrap();
        let uri = loc.to_data_uri().unwrap();
        assert_eq!(uri.media_type(), "application/json;charset=utf-8");
        let back = GeoLocation::from_data_uri(&uri).unwrap();
        assert_eq!(back, loc);
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(-90.5, 0.0).is_err());
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert!(GeoLocation::new(0.0, 180.1).is_err());
        assert!(GeoLocation::new(0.0, f64::NAN).is_err());
    }
}
