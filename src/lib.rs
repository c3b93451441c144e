//! # scurve-planner
//!
//! Jerk-limited (S-curve) motion planning for real-time control loops.
//!
//! ## Features
//!
//! - **Closed-form periods**: seven period kinds (T1..T7) with exact
//!   velocity, displacement and acceleration at any instant
//! - **Bounded planning**: every search has a fixed iteration cap and plans
//!   live in fixed-capacity storage
//! - **Boundary accelerations**: moves may start and end mid-ramp
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: Define limits and named moves in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scurve_planner::{process_curve, interpolate_periods, CurveRequest, KinematicLimits};
//!
//! let limits = KinematicLimits::new(2.0, 10.0)?;
//! let periods = process_curve(&limits, &CurveRequest::run(0.0, 0.0, 50.0, 10.0))?;
//!
//! // Once per control cycle
//! let sample = interpolate_periods(&limits, elapsed, &periods)?;
//! if sample.finished {
//!     // move done
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt formatting for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod trajectory;

// Re-exports for ergonomic API
pub use config::{validate_config, KinematicLimits, KinematicsConfig, MoveConfig, SystemConfig};
pub use error::{ConfigError, Error, InterpolationError, PlanError, Result};
pub use motion::{
    curve_progress, interpolate_period, interpolate_periods, process_curve, ramp_displacement, to_stot_pvec,
    to_ttot_pvec, CurveExecutor, CurveProgress, CurveSample, Period, PeriodKind, PeriodSequence,
    Scenario, Vsa,
};
pub use trajectory::{CurveRequest, CurveRequestBuilder, MoveIntent};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
