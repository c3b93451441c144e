//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::error::{ConfigError, Error, Result};
use crate::motion::{process_curve, PeriodSequence};
use crate::trajectory::CurveRequest;

use super::kinematics::{KinematicLimits, KinematicsConfig};
use super::moves::MoveConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Kinematic limits shared by every move.
    pub kinematics: KinematicsConfig,

    /// Named move presets.
    #[serde(default)]
    pub moves: FnvIndexMap<String<32>, MoveConfig, 32>,
}

impl SystemConfig {
    /// Create a configuration without presets.
    pub fn new(kinematics: KinematicsConfig) -> Self {
        Self {
            kinematics,
            moves: FnvIndexMap::new(),
        }
    }

    /// Validated kinematic limits.
    pub fn limits(&self) -> core::result::Result<KinematicLimits, ConfigError> {
        self.kinematics.limits()
    }

    /// Get a move preset by name.
    pub fn move_config(&self, name: &str) -> Option<&MoveConfig> {
        self.moves
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all move names.
    pub fn move_names(&self) -> impl Iterator<Item = &str> {
        self.moves.keys().map(|s| s.as_str())
    }

    /// Planning request of a named preset.
    pub fn move_request(&self, name: &str) -> Result<CurveRequest> {
        self.move_config(name)
            .map(MoveConfig::request)
            .ok_or_else(|| Error::Config(ConfigError::MoveNotFound(String::try_from(name).unwrap_or_default())))
    }

    /// Plan a named preset with the configured limits.
    pub fn plan(&self, name: &str) -> Result<PeriodSequence> {
        let request = self.move_request(name)?;
        let limits = self.limits()?;
        Ok(process_curve(&limits, &request)?)
    }
}
