//! Altitude references and conversion between them.
//!
//! Survey geometry is naturally expressed relative to the origin's ground
//! elevation, while the autopilot commands altitudes relative to the launch
//! point or as AMSL. `AltitudeFrame` is the only place those are converted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeReference {
    /// Height above the survey origin's ground elevation
    OriginRelative,
    /// Height above the launch/home elevation
    LaunchRelative,
    /// Above mean sea level
    Absolute,
}

/// An altitude tagged with the reference it is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Altitude {
    pub value: f64,
    pub reference: AltitudeReference,
}

impl Altitude {
    pub fn origin_relative(value: f64) -> Self {
        Self {
            value,
            reference: AltitudeReference::OriginRelative,
        }
    }

    pub fn launch_relative(value: f64) -> Self {
        Self {
            value,
            reference: AltitudeReference::LaunchRelative,
        }
    }

    pub fn absolute(value: f64) -> Self {
        Self {
            value,
            reference: AltitudeReference::Absolute,
        }
    }

    /// Same reference, shifted by `delta_m`.
    pub fn offset(self, delta_m: f64) -> Self {
        Self {
            value: self.value + delta_m,
            ..self
        }
    }
}

/// Convert a height relative to the origin's elevation into a height relative
/// to the takeoff elevation.
pub fn origin_alt_to_takeoff_alt(
    altitude_m: f64,
    origin_elevation_m: f64,
    takeoff_elevation_m: f64,
) -> f64 {
    altitude_m - (takeoff_elevation_m - origin_elevation_m)
}

/// Ground elevations (AMSL) of the survey origin and the launch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeFrame {
    pub origin_elevation_m: f64,
    pub launch_elevation_m: f64,
}

impl AltitudeFrame {
    pub fn new(origin_elevation_m: f64, launch_elevation_m: f64) -> Self {
        Self {
            origin_elevation_m,
            launch_elevation_m,
        }
    }

    pub fn to_absolute(&self, altitude: Altitude) -> Altitude {
        let value = match altitude.reference {
            AltitudeReference::OriginRelative => altitude.value + self.origin_elevation_m,
            AltitudeReference::LaunchRelative => altitude.value + self.launch_elevation_m,
            AltitudeReference::Absolute => altitude.value,
        };
        Altitude::absolute(value)
    }

    pub fn to_launch_relative(&self, altitude: Altitude) -> Altitude {
        let value = match altitude.reference {
            AltitudeReference::OriginRelative => origin_alt_to_takeoff_alt(
                altitude.value,
                self.origin_elevation_m,
                self.launch_elevation_m,
            ),
            AltitudeReference::LaunchRelative => altitude.value,
            AltitudeReference::Absolute => altitude.value - self.launch_elevation_m,
        };
        Altitude::launch_relative(value)
    }
}
