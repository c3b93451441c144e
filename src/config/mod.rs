//! Configuration module for scurve-planner.
//!
//! Provides the kinematic limits every curve is planned with and named move
//! presets, loaded from TOML files (with `std` feature) or pre-parsed data.

mod kinematics;
mod moves;
mod system;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use kinematics::{KinematicLimits, KinematicsConfig};
pub use moves::MoveConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
