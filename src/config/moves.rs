//! Named move presets from TOML.

use serde::Deserialize;

use crate::trajectory::{CurveRequest, MoveIntent};

/// A named move from configuration.
///
/// Boundary velocities and accelerations default to zero, the intent to
/// `run`. Accelerations are signed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MoveConfig {
    /// Requested motion.
    #[serde(default)]
    pub intent: MoveIntent,

    /// Velocity at the start of the move.
    #[serde(default)]
    pub start_velocity: f64,

    /// Velocity at the end of the move.
    #[serde(default)]
    pub end_velocity: f64,

    /// Acceleration at the start of the move.
    #[serde(default)]
    pub start_acceleration: f64,

    /// Acceleration at the end of the move.
    #[serde(default)]
    pub end_acceleration: f64,

    /// Displacement to cover.
    pub displacement: f64,

    /// Cruise velocity ceiling.
    pub cruise_velocity: f64,
}

impl MoveConfig {
    /// Planning request for this preset.
    pub fn request(&self) -> CurveRequest {
        CurveRequest {
            intent: self.intent,
            vo: self.start_velocity,
            ve: self.end_velocity,
            acs: self.start_acceleration,
            ace: self.end_acceleration,
            ncs: self.displacement,
            vm: self.cruise_velocity,
        }
    }
}
