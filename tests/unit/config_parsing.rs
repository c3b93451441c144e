//! Unit tests for TOML configuration parsing.

use scurve_planner::config::SystemConfig;
use scurve_planner::trajectory::MoveIntent;

/// Test parsing the kinematic section from TOML.
#[test]
fn test_parse_kinematics() {
    let toml_str = r#"
[kinematics]
acceleration = 2.0
delta_velocity = 10.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let limits = config.limits().expect("Limits should be valid");

    assert_eq!(config.kinematics.acceleration, 2.0);
    assert_eq!(config.kinematics.delta_velocity, 10.0);
    assert_eq!(limits.inflection_acceleration(), 4.0);
    assert_eq!(limits.ramp_time(), 5.0);
    assert_eq!(config.move_names().count(), 0);
}

/// Test parsing a move with every field set.
#[test]
fn test_parse_full_move() {
    let toml_str = r#"
[kinematics]
acceleration = 2.0
delta_velocity = 10.0

[moves.blend]
intent = "run"
start_velocity = 3.0
end_velocity = 1.5
start_acceleration = -0.5
end_acceleration = 0.75
displacement = 120.0
cruise_velocity = 9.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let preset = config.move_config("blend").expect("Move not found");

    assert_eq!(preset.intent, MoveIntent::Run);
    assert_eq!(preset.start_velocity, 3.0);
    assert_eq!(preset.end_velocity, 1.5);
    assert_eq!(preset.start_acceleration, -0.5);
    assert_eq!(preset.end_acceleration, 0.75);
    assert_eq!(preset.displacement, 120.0);
    assert_eq!(preset.cruise_velocity, 9.0);
}

/// Test that omitted move fields take their defaults.
#[test]
fn test_parse_move_defaults() {
    let toml_str = r#"
[kinematics]
acceleration = 2.0
delta_velocity = 10.0

[moves.approach]
displacement = 50.0
cruise_velocity = 10.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let request = config.move_request("approach").expect("Move not found");

    assert_eq!(request.intent, MoveIntent::Run);
    assert_eq!(request.vo, 0.0);
    assert_eq!(request.ve, 0.0);
    assert_eq!(request.acs, 0.0);
    assert_eq!(request.ace, 0.0);
}

/// Test parsing each intent name.
#[test]
fn test_parse_intents() {
    let toml_str = r#"
[kinematics]
acceleration = 1.0
delta_velocity = 4.0

[moves.go]
intent = "run"
displacement = 10.0
cruise_velocity = 2.0

[moves.halt]
intent = "pause"
start_velocity = 2.0
displacement = 0.0
cruise_velocity = 2.0

[moves.again]
intent = "pause_resume"
end_velocity = 2.0
displacement = 0.0
cruise_velocity = 2.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.move_config("go").unwrap().intent, MoveIntent::Run);
    assert_eq!(config.move_config("halt").unwrap().intent, MoveIntent::Pause);
    assert_eq!(config.move_config("again").unwrap().intent, MoveIntent::PauseResume);
    assert_eq!(config.move_names().count(), 3);
}

/// Test that an unknown intent is rejected during parsing.
#[test]
fn test_unknown_intent_rejected() {
    let toml_str = r#"
[kinematics]
acceleration = 2.0
delta_velocity = 10.0

[moves.bad]
intent = "reverse"
displacement = 10.0
cruise_velocity = 2.0
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err(), "Should reject unknown intent");
}

/// Test that the kinematic section is required.
#[test]
fn test_missing_kinematics_rejected() {
    let toml_str = r#"
[moves.approach]
displacement = 50.0
cruise_velocity = 10.0
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err(), "Should require [kinematics]");
}
