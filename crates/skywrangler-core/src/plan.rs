//! QGroundControl `.plan` document.
//!
//! Field names and per-section version numbers are fixed by the file format.

use crate::error::Result;
use crate::mission::{Mission, MissionItem};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

const PLAN_FILE_TYPE: &str = "Plan";
const PLAN_VERSION: u32 = 1;
const MISSION_VERSION: u32 = 2;
const GEOFENCE_VERSION: u32 = 2;
const RALLY_POINTS_VERSION: u32 = 2;
const FENCE_SHAPE_VERSION: u32 = 1;
const SIMPLE_ITEM_TYPE: &str = "SimpleItem";

/// Circular geofence.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleGeoFence {
    /// (latitude, longitude)
    pub center: [f64; 2],
    /// Radius in meters
    pub radius: f64,
    pub inclusion: bool,
}

impl CircleGeoFence {
    pub fn new(center: [f64; 2], radius: f64) -> Self {
        Self {
            center,
            radius,
            inclusion: true,
        }
    }
}

/// Polygon geofence; points are (latitude, longitude) in clockwise winding.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonGeoFence {
    pub points: Vec<[f64; 2]>,
    pub inclusion: bool,
}

impl PolygonGeoFence {
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        Self {
            points,
            inclusion: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoFence {
    pub circles: Vec<CircleGeoFence>,
    pub polygons: Vec<PolygonGeoFence>,
}

/// Rally/safe points as (latitude, longitude, altitude).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RallyPoints {
    pub points: Vec<[f64; 3]>,
}

/// A complete flight plan as written to disk or returned over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDocument {
    /// The ground station which created this plan
    pub ground_station: String,
    pub mission: Mission,
    pub geo_fence: GeoFence,
    pub rally_points: RallyPoints,
}

impl PlanDocument {
    pub fn new(ground_station: impl Into<String>, mission: Mission) -> Self {
        Self {
            ground_station: ground_station.into(),
            mission,
            geo_fence: GeoFence::default(),
            rally_points: RallyPoints::default(),
        }
    }

    pub fn with_geofence(mut self, geo_fence: GeoFence) -> Self {
        self.geo_fence = geo_fence;
        self
    }

    pub fn with_rally_points(mut self, rally_points: RallyPoints) -> Self {
        self.rally_points = rally_points;
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for PlanDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PlanDocument", 6)?;
        state.serialize_field("fileType", PLAN_FILE_TYPE)?;
        state.serialize_field("geoFence", &self.geo_fence)?;
        state.serialize_field("groundStation", &self.ground_station)?;
        state.serialize_field("mission", &self.mission)?;
        state.serialize_field("rallyPoints", &self.rally_points)?;
        state.serialize_field("version", &PLAN_VERSION)?;
        state.end()
    }
}

impl Serialize for Mission {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let home = &self.planned_home_position;
        let items: Vec<SimpleItemRecord> = self
            .sequenced_items()
            .map(|(do_jump_id, item)| SimpleItemRecord { do_jump_id, item })
            .collect();

        let mut state = serializer.serialize_struct("Mission", 8)?;
        state.serialize_field("cruiseSpeed", &self.cruise_speed)?;
        state.serialize_field("firmwareType", &self.firmware_type)?;
        state.serialize_field("globalPlanAltitudeMode", &self.global_plan_altitude_mode)?;
        state.serialize_field("hoverSpeed", &self.hover_speed)?;
        state.serialize_field("items", &items)?;
        state.serialize_field(
            "plannedHomePosition",
            &[home.latitude, home.longitude, home.altitude],
        )?;
        state.serialize_field("vehicleType", &self.vehicle_type)?;
        state.serialize_field("version", &MISSION_VERSION)?;
        state.end()
    }
}

struct SimpleItemRecord<'a> {
    do_jump_id: u32,
    item: &'a MissionItem,
}

impl Serialize for SimpleItemRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let item = self.item;
        let mut state = serializer.serialize_struct("SimpleItem", 9)?;
        state.serialize_field("AMSLAltAboveTerrain", &Option::<f64>::None)?;
        state.serialize_field("Altitude", &item.altitude().value)?;
        state.serialize_field("AltitudeMode", &item.altitude_mode())?;
        state.serialize_field("autoContinue", &item.auto_continue())?;
        state.serialize_field("command", &item.command())?;
        state.serialize_field("doJumpId", &self.do_jump_id)?;
        state.serialize_field("frame", &item.frame())?;
        state.serialize_field("params", &item.params())?;
        state.serialize_field("type", SIMPLE_ITEM_TYPE)?;
        state.end()
    }
}

impl Serialize for GeoFence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GeoFence", 3)?;
        state.serialize_field("circles", &self.circles)?;
        state.serialize_field("polygons", &self.polygons)?;
        state.serialize_field("version", &GEOFENCE_VERSION)?;
        state.end()
    }
}

#[derive(Serialize)]
struct CircleShape<'a> {
    center: &'a [f64; 2],
    radius: f64,
}

impl Serialize for CircleGeoFence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CircleGeoFence", 3)?;
        state.serialize_field(
            "circle",
            &CircleShape {
                center: &self.center,
                radius: self.radius,
            },
        )?;
        state.serialize_field("inclusion", &self.inclusion)?;
        state.serialize_field("version", &FENCE_SHAPE_VERSION)?;
        state.end()
    }
}

impl Serialize for PolygonGeoFence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PolygonGeoFence", 3)?;
        state.serialize_field("inclusion", &self.inclusion)?;
        state.serialize_field("polygon", &self.points)?;
        state.serialize_field("version", &FENCE_SHAPE_VERSION)?;
        state.end()
    }
}

impl Serialize for RallyPoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RallyPoints", 2)?;
        state.serialize_field("points", &self.points)?;
        state.serialize_field("version", &RALLY_POINTS_VERSION)?;
        state.end()
    }
}
