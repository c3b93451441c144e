//! Error types for scurve-planner.
//!
//! Provides unified error handling across configuration, curve planning, and interpolation.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all scurve-planner operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Curve planning error
    Plan(PlanError),
    /// Interpolation / query error
    Interpolation(InterpolationError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid acceleration limit (must be finite and > 0)
    InvalidAcceleration(f64),
    /// Invalid delta velocity (must be finite and > 0)
    InvalidDeltaVelocity(f64),
    /// Derived limits (inflection acceleration, jerk, ramp time) are not usable
    InvalidDerivedLimits {
        /// Inflection acceleration `as = 2a`
        inflection: f64,
        /// Jerk limit
        jerk: f64,
        /// Full ramp time `dv / a`
        ramp_time: f64,
    },
    /// Move preset name not found in configuration
    MoveNotFound(heapless::String<32>),
    /// A move preset is not plannable
    InvalidMove {
        /// Preset name
        name: heapless::String<32>,
        /// Underlying request problem
        reason: PlanError,
    },
    /// Cycle time of an executor must be finite and > 0
    InvalidCycleTime(f64),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Curve planning errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Cruise velocity must be finite and > 0
    InvalidCruiseVelocity(f64),
    /// Boundary velocity must be finite and >= 0
    InvalidVelocity(f64),
    /// Boundary acceleration must be finite
    InvalidAcceleration(f64),
    /// Displacement must be finite
    InvalidDisplacement(f64),
    /// No sampled peak acceleration realizes the requested velocity change
    VelocityChangeUnreachable {
        /// Start velocity
        from: f64,
        /// Target velocity
        to: f64,
    },
    /// The shortest curve for this velocity change is longer than the requested displacement
    DisplacementTooShort {
        /// Requested displacement
        requested: f64,
        /// Displacement of the shortest curve found
        minimum: f64,
    },
    /// A boundary acceleration would drive the velocity below rest
    BoundaryAccelerationTooLarge {
        /// Boundary velocity
        velocity: f64,
        /// Signed boundary acceleration
        acceleration: f64,
    },
    /// Period sequence capacity exhausted
    SequenceFull,
}

impl PlanError {
    /// True when the request is kinematically infeasible with the configured limits.
    ///
    /// Callers should reject or re-parameterize the move (lower velocity,
    /// longer displacement) rather than retry it unchanged.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            PlanError::VelocityChangeUnreachable { .. }
                | PlanError::DisplacementTooShort { .. }
                | PlanError::BoundaryAccelerationTooLarge { .. }
        )
    }
}

/// Interpolation and progress query errors.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// The period sequence holds no periods
    EmptySequence,
    /// No period contains the requested time (sequence invariant broken)
    NoActivePeriod {
        /// Requested time
        at_time: f64,
    },
    /// Position lies outside the sequence's displacement range
    PositionOutOfRange {
        /// Requested position
        position: f64,
        /// Total displacement of the sequence
        total: f64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Plan(e) => write!(f, "Planning error: {}", e),
            Error::Interpolation(e) => write!(f, "Interpolation error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be > 0", v)
            }
            ConfigError::InvalidDeltaVelocity(v) => {
                write!(f, "Invalid delta velocity: {}. Must be > 0", v)
            }
            ConfigError::InvalidDerivedLimits { inflection, jerk, ramp_time } => write!(
                f,
                "Invalid derived limits: as={}, jm={}, ct={}",
                inflection, jerk, ramp_time
            ),
            ConfigError::MoveNotFound(name) => write!(f, "Move '{}' not found", name),
            ConfigError::InvalidMove { name, reason } => {
                write!(f, "Move '{}' is invalid: {}", name, reason)
            }
            ConfigError::InvalidCycleTime(v) => write!(f, "Invalid cycle time: {}. Must be > 0", v),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidCruiseVelocity(v) => {
                write!(f, "Invalid cruise velocity: {}. Must be > 0", v)
            }
            PlanError::InvalidVelocity(v) => write!(f, "Invalid boundary velocity: {}", v),
            PlanError::InvalidAcceleration(v) => write!(f, "Invalid boundary acceleration: {}", v),
            PlanError::InvalidDisplacement(v) => write!(f, "Invalid displacement: {}", v),
            PlanError::VelocityChangeUnreachable { from, to } => {
                write!(f, "Velocity change {} -> {} unreachable with sampled accelerations", from, to)
            }
            PlanError::DisplacementTooShort { requested, minimum } => write!(
                f,
                "Curve doesn't fit requested displacement {}, minimum is {}",
                requested, minimum
            ),
            PlanError::BoundaryAccelerationTooLarge { velocity, acceleration } => write!(
                f,
                "Boundary acceleration {} reverses motion at velocity {}",
                acceleration, velocity
            ),
            PlanError::SequenceFull => write!(f, "Period sequence capacity exhausted"),
        }
    }
}

impl fmt::Display for InterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolationError::EmptySequence => write!(f, "Period sequence is empty"),
            InterpolationError::NoActivePeriod { at_time } => {
                write!(f, "No period active at time {}", at_time)
            }
            InterpolationError::PositionOutOfRange { position, total } => {
                write!(f, "Position {} outside curve [0, {}]", position, total)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<PlanError> for Error {
    fn from(e: PlanError) -> Self {
        Error::Plan(e)
    }
}

impl From<InterpolationError> for Error {
    fn from(e: InterpolationError) -> Self {
        Error::Interpolation(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for PlanError {}

#[cfg(feature = "std")]
impl std::error::Error for InterpolationError {}
