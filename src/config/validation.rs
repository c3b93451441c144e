//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::moves::MoveConfig;
use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Acceleration and delta velocity are finite and positive
/// - Every move has a positive cruise velocity
/// - Every move has non-negative boundary velocities
/// - All move values are finite
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    config.kinematics.limits()?;

    for (name, preset) in config.moves.iter() {
        validate_move(name.as_str(), preset)?;
    }

    Ok(())
}

fn validate_move(name: &str, preset: &MoveConfig) -> Result<()> {
    preset.request().validate().map_err(|reason| {
        log::warn!("scurve: move '{}' rejected: {}", name, reason);
        Error::Config(ConfigError::InvalidMove {
            name: heapless::String::try_from(name).unwrap_or_default(),
            reason,
        })
    })
}
