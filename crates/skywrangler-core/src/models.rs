//! Core data models for survey mission planning.

use crate::altitude::Altitude;
use crate::error::{PlanError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A geographic point with a ground elevation in meters AMSL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(alias = "elevation")]
    pub altitude: f64,
}

impl GeodeticPoint {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    pub fn coordinate(&self) -> Coordinate2D {
        Coordinate2D::new(self.latitude, self.longitude)
    }
}

/// A latitude/longitude pair where altitude does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate2D {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A derived point whose altitude carries its reference explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyPoint {
    pub coordinate: Coordinate2D,
    pub altitude: Altitude,
}

/// The transect line flown past the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transect {
    /// Degrees clockwise from north
    pub azimuth: f64,
    /// Length in meters
    pub length: f64,
}

/// The experiment parameters (variables).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Survey speed along the transect in m/s
    pub speed: f64,
    /// Slant distance from the origin to the transect midpoint in meters
    pub distance: f64,
    /// Angle of the slant distance above the horizontal in degrees
    pub angle: f64,
}

/// Everything needed to plan one survey mission.
///
/// Deserializing goes through [`MissionRequest::from_value`], so every parse
/// path is validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionRequest {
    #[serde(rename = "home")]
    pub launch: GeodeticPoint,
    pub origin: GeodeticPoint,
    pub transect: Transect,
    pub parameters: Parameters,
    pub return_point: Coordinate2D,
}

impl MissionRequest {
    /// Parse and validate a mission parameters record.
    ///
    /// Every missing or non-numeric field is reported by its dotted path before
    /// any planning happens.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| PlanError::malformed("$", "expected an object"))?;

        let launch = section(root, &["home", "launch"])?;
        let origin = section(root, &["origin"])?;
        let transect = section(root, &["transect"])?;
        let parameters = section(root, &["parameters"])?;
        let return_point = section(root, &["returnPoint"])?;

        let request = Self {
            launch: GeodeticPoint {
                latitude: number(&launch, &["latitude"])?,
                longitude: number(&launch, &["longitude"])?,
                altitude: number(&launch, &["altitude", "elevation"])?,
            },
            origin: GeodeticPoint {
                latitude: number(&origin, &["latitude"])?,
                longitude: number(&origin, &["longitude"])?,
                altitude: number(&origin, &["altitude", "elevation"])?,
            },
            transect: Transect {
                azimuth: number(&transect, &["azimuth"])?,
                length: number(&transect, &["length"])?,
            },
            parameters: Parameters {
                speed: number(&parameters, &["speed"])?,
                distance: number(&parameters, &["distance"])?,
                angle: number(&parameters, &["angle"])?,
            },
            return_point: Coordinate2D {
                latitude: number(&return_point, &["latitude"])?,
                longitude: number(&return_point, &["longitude"])?,
            },
        };

        request.validate()?;
        Ok(request)
    }

    /// Range checks on an already structurally complete request.
    pub fn validate(&self) -> Result<()> {
        check_point("home", self.launch.latitude, self.launch.longitude)?;
        check_finite("home.altitude", self.launch.altitude)?;
        check_point("origin", self.origin.latitude, self.origin.longitude)?;
        check_finite("origin.altitude", self.origin.altitude)?;
        check_point(
            "returnPoint",
            self.return_point.latitude,
            self.return_point.longitude,
        )?;

        check_finite("transect.azimuth", self.transect.azimuth)?;
        check_finite("transect.length", self.transect.length)?;
        if self.transect.length < 0.0 {
            return Err(PlanError::malformed("transect.length", "must not be negative"));
        }

        check_finite("parameters.speed", self.parameters.speed)?;
        if self.parameters.speed <= 0.0 {
            return Err(PlanError::malformed("parameters.speed", "must be positive"));
        }
        check_finite("parameters.distance", self.parameters.distance)?;
        if self.parameters.distance < 0.0 {
            return Err(PlanError::malformed(
                "parameters.distance",
                "must not be negative",
            ));
        }
        check_finite("parameters.angle", self.parameters.angle)?;
        if !(0.0..=180.0).contains(&self.parameters.angle) {
            return Err(PlanError::malformed(
                "parameters.angle",
                "must be between 0 and 180 degrees",
            ));
        }

        Ok(())
    }
}

impl<'de> Deserialize<'de> for MissionRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// A named sub-object of the request, remembered with the key it was found under.
struct Section<'a> {
    name: &'a str,
    fields: &'a Map<String, Value>,
}

fn section<'a>(root: &'a Map<String, Value>, names: &[&'a str]) -> Result<Section<'a>> {
    let Some((name, value)) = names
        .iter()
        .find_map(|name| root.get(*name).map(|value| (*name, value)))
    else {
        return Err(PlanError::malformed(names[0], "missing field"));
    };

    let fields = value
        .as_object()
        .ok_or_else(|| PlanError::malformed(name, "expected an object"))?;
    Ok(Section { name, fields })
}

fn number(section: &Section<'_>, keys: &[&str]) -> Result<f64> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|key| section.fields.get(*key).map(|value| (*key, value)))
    else {
        return Err(PlanError::malformed(
            format!("{}.{}", section.name, keys[0]),
            "missing field",
        ));
    };

    value.as_f64().ok_or_else(|| {
        PlanError::malformed(
            format!("{}.{}", section.name, key),
            format!("expected a number, found {value}"),
        )
    })
}

fn check_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PlanError::malformed(field, "must be a finite number"))
    }
}

fn check_point(name: &str, latitude: f64, longitude: f64) -> Result<()> {
    let lat_field = format!("{name}.latitude");
    let lon_field = format!("{name}.longitude");
    check_finite(&lat_field, latitude)?;
    check_finite(&lon_field, longitude)?;
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(PlanError::malformed(lat_field, "must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(PlanError::malformed(lon_field, "must be between -180 and 180"));
    }
    Ok(())
}
