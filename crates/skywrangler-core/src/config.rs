//! Planner configuration.

use crate::error::{PlanError, Result};
use crate::mission::{FirmwareType, VehicleType};
use serde::{Deserialize, Serialize};

/// Mission-wide settings applied to every generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Transit altitude above launch in meters
    pub safe_altitude_m: f64,
    /// Default forward speed for fixed wing or VTOL vehicles in m/s
    pub cruise_speed_mps: f64,
    /// Default forward speed for multi-rotor vehicles in m/s
    pub hover_speed_mps: f64,
    /// Name written into the plan's `groundStation` field
    pub ground_station: String,
    pub firmware_type: FirmwareType,
    pub vehicle_type: VehicleType,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            safe_altitude_m: 100.0,
            cruise_speed_mps: 10.0,
            hover_speed_mps: 10.0,
            ground_station: "SkyWrangler".to_string(),
            firmware_type: FirmwareType::Px4,
            vehicle_type: VehicleType::Quadrotor,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("safe_altitude_m", self.safe_altitude_m),
            ("cruise_speed_mps", self.cruise_speed_mps),
            ("hover_speed_mps", self.hover_speed_mps),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::malformed(
                    format!("config.{field}"),
                    "must be a positive number",
                ));
            }
        }
        Ok(())
    }
}
