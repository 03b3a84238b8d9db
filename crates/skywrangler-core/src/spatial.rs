//! Polar offset math and geodetic point derivation.
//!
//! Every derived point goes through the same path: project the reference
//! point into its UTM zone, add a planar delta, unproject with the same zone.

use crate::error::{PlanError, Result};
use crate::projection::to_planar;

/// Climb/descent angle used for the transitions between safe altitude and
/// survey altitude.
pub const DIAGONAL_GLIDE_ANGLE_DEG: f64 = 60.0;

/// Split a distance along an angle above the horizontal into
/// (horizontal, vertical) components.
pub fn dist_ang_to_horiz_vert(distance_m: f64, angle_deg: f64) -> (f64, f64) {
    let angle_rad = angle_deg.to_radians();
    (distance_m * angle_rad.cos(), distance_m * angle_rad.sin())
}

/// Horizontal run needed to change height by `height_m` at `angle_deg` above the horizontal.
///
/// Angles that are a multiple of 180 degrees have no finite run.
pub fn angle_and_height_to_run(angle_deg: f64, height_m: f64) -> Result<f64> {
    if !angle_deg.is_finite() || angle_deg % 180.0 == 0.0 {
        return Err(PlanError::InvalidGeometry(format!(
            "glide angle of {angle_deg} degrees has no horizontal run"
        )));
    }

    let run = height_m / angle_deg.to_radians().tan();
    if !run.is_finite() {
        return Err(PlanError::InvalidGeometry(format!(
            "horizontal run for {height_m}m at {angle_deg} degrees is not finite"
        )));
    }
    Ok(run)
}

/// Convert a compass azimuth (0 = north, clockwise) to a math angle (0 = east, counter-clockwise).
pub fn azimuth_to_math_angle(azimuth_deg: f64) -> f64 {
    -azimuth_deg + 90.0
}

/// Move `distance_m` from a point along a compass azimuth.
///
/// The azimuth is applied on the UTM grid, so "north" is grid north of the
/// point's zone.
///
/// # Returns
/// (new_lat, new_lon) in degrees
pub fn relative_point(lat: f64, lon: f64, distance_m: f64, azimuth_deg: f64) -> Result<(f64, f64)> {
    let origin = to_planar(lat, lon)?;
    let (east_m, north_m) = dist_ang_to_horiz_vert(distance_m, azimuth_to_math_angle(azimuth_deg));
    Ok(origin.offset(east_m, north_m).to_geodetic())
}

/// Point reached by climbing or descending `height_m` at the fixed glide
/// angle, heading along a compass azimuth.
pub fn diagonal_point(lat: f64, lon: f64, height_m: f64, azimuth_deg: f64) -> Result<(f64, f64)> {
    let run_m = angle_and_height_to_run(DIAGONAL_GLIDE_ANGLE_DEG, height_m)?;
    let point = relative_point(lat, lon, run_m, azimuth_deg)?;
    tracing::debug!(
        lat,
        lon,
        height_m,
        azimuth_deg,
        run_m,
        "derived diagonal point {:.7}, {:.7}",
        point.0,
        point.1
    );
    Ok(point)
}
