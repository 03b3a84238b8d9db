//! Survey mission assembly.
//!
//! The mission always has the same seven items, flown in this order:
//!
//! 1. take off at launch to the safe altitude
//! 2. B: fly at safe altitude to the point where the descent toward the transect starts
//! 3. C: descend at the glide angle to the start of the transect
//! 4. D: fly the transect at survey altitude
//! 5. E: climb at the glide angle back to safe altitude
//! 6. F: fly at safe altitude to the return point
//! 7. return to launch

use crate::altitude::{Altitude, AltitudeFrame};
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::mission::{AltitudeMode, Mission, MissionItem};
use crate::models::{Coordinate2D, MissionRequest};
use crate::plan::PlanDocument;
use crate::spatial::{diagonal_point, dist_ang_to_horiz_vert};
use crate::transect::transect_points;

/// Plan a survey mission with the default planner configuration.
pub fn create_mission(request: &MissionRequest) -> Result<PlanDocument> {
    create_mission_with_config(request, &PlannerConfig::default())
}

/// Plan a survey mission and wrap it in a plan document.
pub fn create_mission_with_config(
    request: &MissionRequest,
    config: &PlannerConfig,
) -> Result<PlanDocument> {
    let mission = assemble_mission(request, config)?;
    Ok(PlanDocument::new(config.ground_station.clone(), mission))
}

/// Build the ordered mission items for a request.
pub fn assemble_mission(request: &MissionRequest, config: &PlannerConfig) -> Result<Mission> {
    request.validate()?;
    config.validate()?;

    let MissionRequest {
        launch,
        origin,
        transect,
        parameters,
        return_point,
    } = *request;

    tracing::info!(
        ?origin,
        ?transect,
        ?parameters,
        ?return_point,
        "planning survey mission"
    );

    let frame = AltitudeFrame::new(origin.altitude, launch.altitude);
    let safe_altitude = Altitude::launch_relative(config.safe_altitude_m);
    let safe_altitude_amsl = frame.to_absolute(safe_altitude);

    let (_horizontal, vertical) = dist_ang_to_horiz_vert(parameters.distance, parameters.angle);
    let (c, d) = transect_points(&origin, &transect, &parameters)?;

    // mission items need altitudes relative to takeoff altitude
    let survey_height = frame.to_launch_relative(Altitude::origin_relative(vertical));
    let descent_m = safe_altitude.value - survey_height.value;

    let (b_lat, b_lon) = diagonal_point(
        c.coordinate.latitude,
        c.coordinate.longitude,
        descent_m,
        transect.azimuth - 90.0,
    )?;
    let (e_lat, e_lon) = diagonal_point(
        d.coordinate.latitude,
        d.coordinate.longitude,
        descent_m,
        transect.azimuth + 90.0,
    )?;

    let items = vec![
        // A: straight up above launch
        MissionItem::takeoff(launch.coordinate(), safe_altitude)?,
        // B: in line with the transect, still at safe altitude
        MissionItem::waypoint(Coordinate2D::new(b_lat, b_lon), safe_altitude_amsl)?,
        // C: start of the transect
        MissionItem::waypoint(c.coordinate, frame.to_absolute(c.altitude))?,
        // D: end of the transect
        MissionItem::waypoint(d.coordinate, frame.to_absolute(d.altitude))?,
        // E: back at safe altitude
        MissionItem::waypoint(Coordinate2D::new(e_lat, e_lon), safe_altitude_amsl)?,
        // F: over the return point
        MissionItem::waypoint(return_point, safe_altitude_amsl)?,
        MissionItem::return_to_launch(safe_altitude)?,
    ];

    let mission = Mission::new(
        config.firmware_type,
        config.vehicle_type,
        AltitudeMode::Mixed,
        launch,
        config.cruise_speed_mps,
        config.hover_speed_mps,
        items,
    )?;

    tracing::info!(
        items = mission.items().len(),
        survey_height_m = survey_height.value,
        descent_m,
        "assembled survey mission"
    );

    Ok(mission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::mission::{Command, Frame};
    use crate::models::{GeodeticPoint, Parameters, Transect};
    use crate::spatial::{angle_and_height_to_run, DIAGONAL_GLIDE_ANGLE_DEG};

    fn request() -> MissionRequest {
        MissionRequest {
            launch: GeodeticPoint::new(35.9301904295499, -97.26450295241108, 307.0),
            origin: GeodeticPoint::new(35.932121645130756, -97.2631249266781, 304.0),
            transect: Transect {
                azimuth: -85.0,
                length: 100.0,
            },
            parameters: Parameters {
                speed: 5.0,
                angle: 90.0,
                distance: 30.0,
            },
            return_point: Coordinate2D::new(35.934456813161006, -97.2646272318608),
        }
    }

    fn planar_distance(a: Coordinate2D, b: Coordinate2D) -> f64 {
        let pa = crate::projection::to_planar(a.latitude, a.longitude).unwrap();
        let pb = crate::projection::to_planar_in_zone(b.latitude, b.longitude, pa.zone);
        (pb.easting - pa.easting).hypot(pb.northing - pa.northing)
    }

    #[test]
    fn test_mission_has_fixed_topology() {
        let mission = assemble_mission(&request(), &PlannerConfig::default()).unwrap();
        let commands: Vec<Command> = mission.items().iter().map(|item| item.command()).collect();
        assert_eq!(
            commands,
            vec![
                Command::NavTakeoff,
                Command::NavWaypoint,
                Command::NavWaypoint,
                Command::NavWaypoint,
                Command::NavWaypoint,
                Command::NavWaypoint,
                Command::NavReturnToLaunch,
            ]
        );
        let ids: Vec<u32> = mission.sequenced_items().map(|(id, _)| id).collect();
        assert_eq!(ids, (1..=7).collect::<Vec<u32>>());
    }

    #[test]
    fn test_altitudes_and_frames() {
        let mission = assemble_mission(&request(), &PlannerConfig::default()).unwrap();
        let items = mission.items();

        assert_eq!(items[0].altitude(), Altitude::launch_relative(100.0));
        assert_eq!(items[0].frame(), Frame::GlobalRelativeAlt);

        // safe altitude legs are 100m above the 307m launch
        for index in [1, 4, 5] {
            assert_eq!(items[index].altitude(), Altitude::absolute(407.0));
            assert_eq!(items[index].frame(), Frame::Global);
        }

        // the transect is 30m above the 304m origin
        for index in [2, 3] {
            assert_eq!(items[index].altitude(), Altitude::absolute(334.0));
            assert_eq!(items[index].params()[6], Some(334.0));
        }

        assert_eq!(items[6].frame(), Frame::Mission);
        assert_eq!(items[6].altitude(), Altitude::launch_relative(100.0));
    }

    #[test]
    fn test_descent_legs_follow_glide_angle() {
        let mission = assemble_mission(&request(), &PlannerConfig::default()).unwrap();
        let items = mission.items();
        let coordinate = |index: usize| items[index].coordinate().unwrap();

        // survey height is 30 - (307 - 304) = 27m above launch, so 73m of descent
        let expected_run = angle_and_height_to_run(DIAGONAL_GLIDE_ANGLE_DEG, 73.0).unwrap();
        assert!((planar_distance(coordinate(1), coordinate(2)) - expected_run).abs() < 1e-3);
        assert!((planar_distance(coordinate(3), coordinate(4)) - expected_run).abs() < 1e-3);
        assert!((planar_distance(coordinate(2), coordinate(3)) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_return_point_and_home() {
        let req = request();
        let mission = assemble_mission(&req, &PlannerConfig::default()).unwrap();
        assert_eq!(mission.items()[5].coordinate(), Some(req.return_point));
        assert_eq!(mission.items()[0].coordinate(), Some(req.launch.coordinate()));
        assert_eq!(mission.planned_home_position, req.launch);
        assert_eq!(mission.global_plan_altitude_mode, AltitudeMode::Mixed);
    }

    #[test]
    fn test_custom_config() {
        let config = PlannerConfig {
            safe_altitude_m: 60.0,
            cruise_speed_mps: 12.0,
            ground_station: "QGroundControl".to_string(),
            ..PlannerConfig::default()
        };
        let plan = create_mission_with_config(&request(), &config).unwrap();
        assert_eq!(plan.ground_station, "QGroundControl");
        assert_eq!(plan.mission.cruise_speed, 12.0);
        assert_eq!(plan.mission.items()[1].altitude(), Altitude::absolute(367.0));
    }

    #[test]
    fn test_survey_across_antimeridian() {
        let req = MissionRequest {
            launch: GeodeticPoint::new(-17.0005, 179.9995, 10.0),
            origin: GeodeticPoint::new(-17.0, 179.9999, 12.0),
            transect: Transect {
                azimuth: 0.0,
                length: 100.0,
            },
            parameters: Parameters {
                speed: 5.0,
                distance: 30.0,
                angle: 90.0,
            },
            return_point: Coordinate2D::new(-16.999, 179.9995),
        };

        let mission = assemble_mission(&req, &PlannerConfig::default()).unwrap();
        let coordinates: Vec<Coordinate2D> = mission
            .items()
            .iter()
            .filter_map(|item| item.coordinate())
            .collect();
        assert_eq!(coordinates.len(), 6);
        for coordinate in &coordinates {
            assert!((-180.0..=180.0).contains(&coordinate.longitude));
        }

        // C stays west of 180, D and E land on the far side
        assert!((coordinates[2].longitude - 179.999_430_913).abs() < 1e-8);
        assert!((coordinates[3].longitude + 179.999_630_914).abs() < 1e-8);
        assert!((coordinates[4].longitude + 179.999_262_588).abs() < 1e-8);
        assert_eq!(mission.items()[3].altitude(), Altitude::absolute(42.0));
    }

    #[test]
    fn test_invalid_request_is_rejected_before_planning() {
        let mut req = request();
        req.parameters.speed = -1.0;
        assert!(matches!(
            create_mission(&req),
            Err(PlanError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_polar_origin_is_unsupported() {
        let mut req = request();
        req.origin.latitude = 86.0;
        assert!(matches!(
            create_mission(&req),
            Err(PlanError::UnsupportedLocation { .. })
        ));
    }
}
