//! Kinematic limits shared by every period and curve builder.

use libm::fabs;
use serde::Deserialize;

use crate::error::ConfigError;

/// Validated kinematic limits of the S-curve engine.
///
/// Built from the acceleration limit `a` and the delta velocity `dv` (the
/// velocity gained by one full jerk ramp up to the inflection acceleration and
/// back down to zero). All other quantities are derived:
///
/// - `as = 2a`, the acceleration at the inflection point
/// - `ct = dv / a`, the duration of a full ramp
/// - `jm = 2 * as / ct`, the jerk limit
///
/// A ramp from zero to `as` therefore lasts `ct / 2` and gains `dv / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KinematicLimits {
    a: f64,
    dv: f64,
    a_s: f64,
    jm: f64,
    ct: f64,
}

impl KinematicLimits {
    /// Create limits from an acceleration and a delta velocity.
    ///
    /// # Errors
    ///
    /// Returns an error if either input, or any derived value, is not finite
    /// and strictly positive.
    pub fn new(acceleration: f64, delta_velocity: f64) -> Result<Self, ConfigError> {
        if !acceleration.is_finite() || acceleration <= 0.0 {
            log::warn!("scurve: acceleration {} rejected", acceleration);
            return Err(ConfigError::InvalidAcceleration(acceleration));
        }
        if !delta_velocity.is_finite() || delta_velocity <= 0.0 {
            log::warn!("scurve: delta velocity {} rejected", delta_velocity);
            return Err(ConfigError::InvalidDeltaVelocity(delta_velocity));
        }

        let ct = delta_velocity / acceleration;
        let a_s = 2.0 * acceleration;
        let jm = 2.0 * a_s / ct;

        let limits = Self {
            a: acceleration,
            dv: delta_velocity,
            a_s,
            jm,
            ct,
        };
        limits.check()?;
        Ok(limits)
    }

    /// Check that every limit is finite and strictly positive.
    pub fn check(&self) -> Result<(), ConfigError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.a) && usable(self.a_s) && usable(self.jm) && usable(self.ct) && usable(self.dv) {
            Ok(())
        } else {
            log::warn!(
                "scurve: check values for a={}, as={}, jm={}, dv={}",
                self.a,
                self.a_s,
                self.jm,
                self.dv
            );
            Err(ConfigError::InvalidDerivedLimits {
                inflection: self.a_s,
                jerk: self.jm,
                ramp_time: self.ct,
            })
        }
    }

    /// Acceleration limit `a`.
    #[inline]
    pub fn acceleration(&self) -> f64 {
        self.a
    }

    /// Delta velocity `dv` covered by one full ramp.
    #[inline]
    pub fn delta_velocity(&self) -> f64 {
        self.dv
    }

    /// Inflection acceleration `as = 2a`, the peak of a jerk ramp.
    #[inline]
    pub fn inflection_acceleration(&self) -> f64 {
        self.a_s
    }

    /// Jerk limit `jm`.
    #[inline]
    pub fn jerk(&self) -> f64 {
        self.jm
    }

    /// Full ramp time `ct = dv / a`.
    #[inline]
    pub fn ramp_time(&self) -> f64 {
        self.ct
    }

    /// Time for the acceleration to swing between zero and `as`.
    #[inline]
    pub fn half_ramp_time(&self) -> f64 {
        0.5 * self.ct
    }

    /// Clamp an acceleration magnitude into `[0, as]`.
    #[inline]
    pub(crate) fn clamp_acceleration(&self, acc: f64) -> f64 {
        libm::fmin(self.a_s, fabs(acc))
    }
}

/// Kinematic section of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct KinematicsConfig {
    /// Acceleration limit.
    pub acceleration: f64,

    /// Velocity gained by one full jerk ramp.
    pub delta_velocity: f64,
}

impl KinematicsConfig {
    /// Build validated limits from this section.
    pub fn limits(&self) -> Result<KinematicLimits, ConfigError> {
        KinematicLimits::new(self.acceleration, self.delta_velocity)
    }
}
