//! SkyWrangler survey mission planning.
//!
//! Turns a launch point, a survey origin, a transect and the experiment
//! parameters into a fixed seven-item flight (ascent, transect pass, climb
//! out, return to launch) and renders it as a QGroundControl `.plan` document.

pub mod altitude;
pub mod config;
pub mod error;
pub mod mission;
pub mod models;
pub mod plan;
pub mod planner;
pub mod projection;
pub mod spatial;
pub mod transect;

pub use altitude::{origin_alt_to_takeoff_alt, Altitude, AltitudeFrame, AltitudeReference};
pub use config::PlannerConfig;
pub use error::{PlanError, Result};
pub use mission::{
    AltitudeMode, Command, FirmwareType, Frame, ItemParams, Mission, MissionItem, VehicleType,
};
pub use models::{Coordinate2D, GeodeticPoint, MissionRequest, Parameters, SurveyPoint, Transect};
pub use plan::{CircleGeoFence, GeoFence, PlanDocument, PolygonGeoFence, RallyPoints};
pub use planner::{assemble_mission, create_mission, create_mission_with_config};
pub use projection::{to_geodetic, to_planar, Hemisphere, ProjectedPoint, UtmZone};
pub use spatial::{
    angle_and_height_to_run, diagonal_point, dist_ang_to_horiz_vert, relative_point,
    DIAGONAL_GLIDE_ANGLE_DEG,
};
pub use transect::transect_points;
