//! Mission items and the MAVLink enumerations used by QGroundControl plans.

use crate::altitude::{Altitude, AltitudeReference};
use crate::error::{PlanError, Result};
use crate::models::{Coordinate2D, GeodeticPoint};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declares a fieldless enum that serializes as its integer code.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub fn code(self) -> u16 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_u16(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let code = u16::deserialize(deserializer)?;
                $name::from_code(code).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} code {}",
                        stringify!($name),
                        code
                    ))
                })
            }
        }
    };
}

coded_enum! {
    /// MAVLink navigation command IDs (MAV_CMD).
    pub enum Command {
        /// Navigate to waypoint
        NavWaypoint = 16,
        /// Loiter around this waypoint an unlimited amount of time
        NavLoiterUnlim = 17,
        /// Loiter around this waypoint for X turns
        NavLoiterTurns = 18,
        /// Loiter at the waypoint for a certain amount of time
        NavLoiterTime = 19,
        /// Return to launch location
        NavReturnToLaunch = 20,
        /// Land at location
        NavLand = 21,
        /// Takeoff from ground / hand
        NavTakeoff = 22,
        /// Land at local position (local frame only)
        NavLandLocal = 23,
        /// Takeoff from local position (local frame only)
        NavTakeoffLocal = 24,
        /// Follow a moving vehicle
        NavFollow = 25,
        /// Continue on the current course and climb/descend to specified altitude
        NavContinueAndChangeAlt = 30,
        /// Loiter until the altitude has been reached
        NavLoiterToAlt = 31,
    }
}

coded_enum! {
    /// MAVLink coordinate frames (MAV_FRAME).
    pub enum Frame {
        /// WGS84 + altitude above mean sea level
        Global = 0,
        /// NED local tangent frame fixed relative to earth
        LocalNed = 1,
        /// Not a coordinate frame, indicates a mission command
        Mission = 2,
        /// WGS84 + altitude relative to the home position
        GlobalRelativeAlt = 3,
        /// ENU local tangent frame fixed relative to earth
        LocalEnu = 4,
        /// NED local tangent frame that travels with the vehicle
        LocalOffsetNed = 7,
        /// FRD frame aligned to the vehicle's attitude
        BodyFrd = 12,
        /// FRD local tangent frame fixed relative to earth
        LocalFrd = 20,
        /// FLU local tangent frame fixed relative to earth
        LocalFlu = 21,
    }
}

coded_enum! {
    /// Autopilot firmware (MAV_AUTOPILOT).
    pub enum FirmwareType {
        Generic = 0,
        Reserved = 1,
        Slugs = 2,
        ArduPilotMega = 3,
        OpenPilot = 4,
        GenericWaypointsOnly = 5,
        GenericWaypointsAndSimpleNavigationOnly = 6,
        GenericMissionFull = 7,
        Invalid = 8,
        Ppz = 9,
        Udb = 10,
        Fp = 11,
        Px4 = 12,
        SmaccmPilot = 13,
        AutoQuad = 14,
        Armazila = 15,
        Aerob = 16,
        Asluav = 17,
        SmartAp = 18,
        AirRails = 19,
        Reflex = 20,
    }
}

coded_enum! {
    /// Vehicle type (MAV_TYPE).
    pub enum VehicleType {
        Generic = 0,
        FixedWing = 1,
        Quadrotor = 2,
        Coaxial = 3,
        Helicopter = 4,
        Airship = 7,
        FreeBalloon = 8,
        GroundRover = 10,
        SurfaceBoat = 11,
        Hexarotor = 13,
        Octorotor = 14,
        Tricopter = 15,
        FlappingWing = 16,
        Kite = 17,
        VtolTailsitterDuorotor = 19,
        VtolTailsitterQuadrotor = 20,
        VtolTiltrotor = 21,
        VtolFixedrotor = 22,
        VtolTailsitter = 23,
        VtolTiltwing = 24,
        Parafoil = 28,
        Dodecarotor = 29,
        Decarotor = 35,
        GenericMultirotor = 43,
    }
}

coded_enum! {
    /// QGroundControl altitude modes.
    pub enum AltitudeMode {
        /// Altitude mode can differ for each item
        Mixed = 0,
        /// Relative to the launch position
        Launch = 1,
        /// Above mean sea level
        Amsl = 2,
        /// Relative to the terrain
        Terrain = 3,
    }
}

impl AltitudeMode {
    fn for_reference(reference: AltitudeReference) -> Result<Self> {
        match reference {
            AltitudeReference::LaunchRelative => Ok(AltitudeMode::Launch),
            AltitudeReference::Absolute => Ok(AltitudeMode::Amsl),
            AltitudeReference::OriginRelative => Err(PlanError::InvalidGeometry(
                "origin-relative altitude must be converted before it is commanded".to_string(),
            )),
        }
    }
}

/// The seven command parameters of a mission item; `None` means "use current/default".
pub type ItemParams = [Option<f64>; 7];

/// One simple mission item.
///
/// Items carry no sequence number: a `Mission` numbers them by position.
/// Built only through the constructors, so every item holds an altitude the
/// vehicle can fly (launch-relative or absolute).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionItem {
    kind: ItemKind,
    altitude: Altitude,
    altitude_mode: AltitudeMode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ItemKind {
    /// Climb vertically at the coordinate
    Takeoff(Coordinate2D),
    Waypoint(Coordinate2D),
    /// The altitude is only shown to the operator
    ReturnToLaunch,
}

impl MissionItem {
    fn new(kind: ItemKind, altitude: Altitude) -> Result<Self> {
        let altitude_mode = AltitudeMode::for_reference(altitude.reference)?;
        Ok(Self {
            kind,
            altitude,
            altitude_mode,
        })
    }

    pub fn takeoff(coordinate: Coordinate2D, altitude: Altitude) -> Result<Self> {
        if altitude.reference != AltitudeReference::LaunchRelative {
            return Err(PlanError::InvalidGeometry(
                "takeoff altitude must be relative to launch".to_string(),
            ));
        }
        Self::new(ItemKind::Takeoff(coordinate), altitude)
    }

    /// Fly to a coordinate at a launch-relative or absolute altitude.
    pub fn waypoint(coordinate: Coordinate2D, altitude: Altitude) -> Result<Self> {
        Self::new(ItemKind::Waypoint(coordinate), altitude)
    }

    pub fn return_to_launch(altitude: Altitude) -> Result<Self> {
        Self::new(ItemKind::ReturnToLaunch, altitude)
    }

    pub fn command(&self) -> Command {
        match self.kind {
            ItemKind::Takeoff(_) => Command::NavTakeoff,
            ItemKind::Waypoint(_) => Command::NavWaypoint,
            ItemKind::ReturnToLaunch => Command::NavReturnToLaunch,
        }
    }

    pub fn altitude(&self) -> Altitude {
        self.altitude
    }

    pub fn coordinate(&self) -> Option<Coordinate2D> {
        match self.kind {
            ItemKind::Takeoff(coordinate) | ItemKind::Waypoint(coordinate) => Some(coordinate),
            ItemKind::ReturnToLaunch => None,
        }
    }

    pub fn altitude_mode(&self) -> AltitudeMode {
        self.altitude_mode
    }

    pub fn frame(&self) -> Frame {
        match (self.kind, self.altitude_mode) {
            (ItemKind::ReturnToLaunch, _) => Frame::Mission,
            (_, AltitudeMode::Amsl) => Frame::Global,
            _ => Frame::GlobalRelativeAlt,
        }
    }

    pub fn auto_continue(&self) -> bool {
        true
    }

    pub fn params(&self) -> ItemParams {
        match self.coordinate() {
            // takeoff: pitch, unused, unused, yaw, latitude, longitude, altitude
            // waypoint: hold, acceptance radius, pass radius, yaw, latitude, longitude, altitude
            Some(coordinate) => [
                Some(0.0),
                Some(0.0),
                Some(0.0),
                None,
                Some(coordinate.latitude),
                Some(coordinate.longitude),
                Some(self.altitude.value),
            ],
            None => [Some(0.0); 7],
        }
    }
}

/// An ordered mission; an item's do-jump id is its position plus one.
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    pub firmware_type: FirmwareType,
    pub vehicle_type: VehicleType,
    pub global_plan_altitude_mode: AltitudeMode,
    /// Shown on the map when no vehicle is connected
    pub planned_home_position: GeodeticPoint,
    /// Default forward speed for fixed wing or VTOL vehicles
    pub cruise_speed: f64,
    /// Default forward speed for multi-rotor vehicles
    pub hover_speed: f64,
    items: Vec<MissionItem>,
}

/// Smallest flyable mission: an ascent and a return.
pub const MIN_MISSION_ITEMS: usize = 2;

impl Mission {
    pub fn new(
        firmware_type: FirmwareType,
        vehicle_type: VehicleType,
        global_plan_altitude_mode: AltitudeMode,
        planned_home_position: GeodeticPoint,
        cruise_speed: f64,
        hover_speed: f64,
        items: Vec<MissionItem>,
    ) -> Result<Self> {
        if items.len() < MIN_MISSION_ITEMS {
            return Err(PlanError::InvalidGeometry(format!(
                "a mission needs at least {MIN_MISSION_ITEMS} items, got {}",
                items.len()
            )));
        }

        Ok(Self {
            firmware_type,
            vehicle_type,
            global_plan_altitude_mode,
            planned_home_position,
            cruise_speed,
            hover_speed,
            items,
        })
    }

    pub fn items(&self) -> &[MissionItem] {
        &self.items
    }

    /// Items paired with their 1-based do-jump id, in flight order.
    pub fn sequenced_items(&self) -> impl Iterator<Item = (u32, &MissionItem)> + '_ {
        (1u32..).zip(self.items.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch() -> Coordinate2D {
        Coordinate2D::new(47.3985099, 8.5451002)
    }

    #[test]
    fn test_codes_round_trip() {
        assert_eq!(Command::NavTakeoff.code(), 22);
        assert_eq!(Command::from_code(20), Some(Command::NavReturnToLaunch));
        assert_eq!(Frame::GlobalRelativeAlt.code(), 3);
        assert_eq!(FirmwareType::Px4.code(), 12);
        assert_eq!(VehicleType::Quadrotor.code(), 2);
        assert_eq!(AltitudeMode::from_code(4), None);
    }

    #[test]
    fn test_enums_serialize_as_codes() {
        assert_eq!(serde_json::to_string(&Command::NavWaypoint).unwrap(), "16");
        assert_eq!(serde_json::to_string(&AltitudeMode::Amsl).unwrap(), "2");
        let frame: Frame = serde_json::from_str("2").unwrap();
        assert_eq!(frame, Frame::Mission);
        assert!(serde_json::from_str::<Frame>("5").is_err());
    }

    #[test]
    fn test_takeoff_item() {
        let item = MissionItem::takeoff(launch(), Altitude::launch_relative(50.0)).unwrap();
        assert_eq!(item.command(), Command::NavTakeoff);
        assert_eq!(item.frame(), Frame::GlobalRelativeAlt);
        assert_eq!(item.altitude_mode(), AltitudeMode::Launch);
        assert_eq!(
            item.params(),
            [
                Some(0.0),
                Some(0.0),
                Some(0.0),
                None,
                Some(47.3985099),
                Some(8.5451002),
                Some(50.0)
            ]
        );
    }

    #[test]
    fn test_takeoff_requires_launch_relative_altitude() {
        assert!(MissionItem::takeoff(launch(), Altitude::absolute(500.0)).is_err());
    }

    #[test]
    fn test_absolute_waypoint_uses_global_frame() {
        let item = MissionItem::waypoint(launch(), Altitude::absolute(587.9)).unwrap();
        assert_eq!(item.command(), Command::NavWaypoint);
        assert_eq!(item.frame(), Frame::Global);
        assert_eq!(item.altitude_mode(), AltitudeMode::Amsl);
        assert_eq!(item.params()[6], Some(587.9));
    }

    #[test]
    fn test_origin_relative_altitude_is_rejected() {
        let survey = Altitude::origin_relative(30.0);
        for result in [
            MissionItem::takeoff(launch(), survey),
            MissionItem::waypoint(launch(), survey),
            MissionItem::return_to_launch(survey),
        ] {
            assert!(matches!(result, Err(PlanError::InvalidGeometry(_))));
        }
    }

    #[test]
    fn test_altitude_mode_matches_altitude_reference() {
        let relative = MissionItem::waypoint(launch(), Altitude::launch_relative(30.0)).unwrap();
        assert_eq!(relative.altitude_mode(), AltitudeMode::Launch);
        assert_eq!(relative.frame(), Frame::GlobalRelativeAlt);

        let absolute = MissionItem::waypoint(launch(), Altitude::absolute(330.0)).unwrap();
        assert_eq!(absolute.altitude_mode(), AltitudeMode::Amsl);
        assert_eq!(absolute.frame(), Frame::Global);
    }

    #[test]
    fn test_return_to_launch_item() {
        let item = MissionItem::return_to_launch(Altitude::launch_relative(100.0)).unwrap();
        assert_eq!(item.command(), Command::NavReturnToLaunch);
        assert_eq!(item.frame(), Frame::Mission);
        assert_eq!(item.altitude_mode(), AltitudeMode::Launch);
        assert_eq!(item.coordinate(), None);
        assert_eq!(item.params(), [Some(0.0); 7]);
    }

    #[test]
    fn test_mission_requires_two_items() {
        let takeoff = MissionItem::takeoff(launch(), Altitude::launch_relative(50.0)).unwrap();
        let home = GeodeticPoint::new(47.3977419, 8.545594, 487.989);
        let result = Mission::new(
            FirmwareType::Px4,
            VehicleType::Quadrotor,
            AltitudeMode::Launch,
            home,
            15.0,
            5.0,
            vec![takeoff],
        );
        assert!(matches!(result, Err(PlanError::InvalidGeometry(_))));
    }

    #[test]
    fn test_sequence_ids_follow_position() {
        let takeoff = MissionItem::takeoff(launch(), Altitude::launch_relative(50.0)).unwrap();
        let rtl = MissionItem::return_to_launch(Altitude::launch_relative(50.0)).unwrap();
        let home = GeodeticPoint::new(47.3977419, 8.545594, 487.989);
        let mission = Mission::new(
            FirmwareType::Px4,
            VehicleType::Quadrotor,
            AltitudeMode::Mixed,
            home,
            15.0,
            5.0,
            vec![takeoff, rtl],
        )
        .unwrap();

        let ids: Vec<u32> = mission.sequenced_items().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(mission.items().len(), 2);
    }
}
