//! Transect endpoint geometry.

use crate::altitude::Altitude;
use crate::error::Result;
use crate::models::{Coordinate2D, GeodeticPoint, Parameters, SurveyPoint, Transect};
use crate::spatial::{dist_ang_to_horiz_vert, relative_point};

/// Calculate the transect start and end points for the experiment parameters.
///
/// The midpoint sits `distance * cos(angle)` meters from the origin along the
/// transect azimuth; the endpoints lie `length / 2` meters either side of it,
/// perpendicular to the azimuth. Both endpoints are `distance * sin(angle)`
/// meters above the origin's elevation and are returned as absolute altitudes.
pub fn transect_points(
    origin: &GeodeticPoint,
    transect: &Transect,
    parameters: &Parameters,
) -> Result<(SurveyPoint, SurveyPoint)> {
    let (horizontal, vertical) = dist_ang_to_horiz_vert(parameters.distance, parameters.angle);

    let (mid_lat, mid_lon) =
        relative_point(origin.latitude, origin.longitude, horizontal, transect.azimuth)?;

    let half_length = transect.length / 2.0;
    let (start_lat, start_lon) =
        relative_point(mid_lat, mid_lon, half_length, transect.azimuth - 90.0)?;
    let (end_lat, end_lon) =
        relative_point(mid_lat, mid_lon, half_length, transect.azimuth + 90.0)?;

    let altitude = Altitude::absolute(origin.altitude).offset(vertical);
    let start = SurveyPoint {
        coordinate: Coordinate2D::new(start_lat, start_lon),
        altitude,
    };
    let end = SurveyPoint {
        coordinate: Coordinate2D::new(end_lat, end_lon),
        altitude,
    };

    tracing::debug!(
        mid_lat,
        mid_lon,
        altitude_m = altitude.value,
        "transect from {:.7}, {:.7} to {:.7}, {:.7}",
        start_lat,
        start_lon,
        end_lat,
        end_lon
    );

    Ok((start, end))
}
