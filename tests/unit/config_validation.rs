//! Unit tests for configuration validation.

use scurve_planner::config::{parse_config, validate_config, KinematicsConfig, SystemConfig};
use scurve_planner::error::{ConfigError, Error, PlanError};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[kinematics]
acceleration = 2.0
delta_velocity = 10.0

[moves.approach]
start_velocity = 1.0
displacement = 50.0
cruise_velocity = 10.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a non-positive acceleration.
#[test]
fn test_invalid_acceleration() {
    let toml_str = r#"
[kinematics]
acceleration = -2.0
delta_velocity = 10.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidAcceleration(_)))
    ));
}

/// Test validation fails for a zero delta velocity.
#[test]
fn test_invalid_delta_velocity() {
    let toml_str = r#"
[kinematics]
acceleration = 2.0
delta_velocity = 0.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidDeltaVelocity(_)))
    ));
}

/// Test validation fails for a negative boundary velocity.
#[test]
fn test_negative_start_velocity() {
    let toml_str = r#"
[kinematics]
acceleration = 2.0
delta_velocity = 10.0

[moves.backwards]
start_velocity = -1.0
displacement = 50.0
cruise_velocity = 10.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    match validate_config(&config) {
        Err(Error::Config(ConfigError::InvalidMove { name, reason })) => {
            assert_eq!(name.as_str(), "backwards");
            assert_eq!(reason, PlanError::InvalidVelocity(-1.0));
        }
        other => panic!("unexpected {:?}", other),
    }
}

/// Test that parse_config validates as it parses.
#[test]
fn test_parse_config_validates() {
    let toml_str = r#"
[kinematics]
acceleration = 2.0
delta_velocity = 10.0

[moves.stalled]
displacement = 50.0
cruise_velocity = 0.0
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::InvalidMove { .. }))
    ));
}

/// Test that a configuration without moves is valid.
#[test]
fn test_no_moves_is_valid() {
    let config = SystemConfig::new(KinematicsConfig {
        acceleration: 1.0,
        delta_velocity: 1.0,
    });
    assert!(validate_config(&config).is_ok());
}
