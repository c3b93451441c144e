//! Curve planning requests.

use serde::Deserialize;

use crate::error::PlanError;

/// What the planner is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveIntent {
    /// Move from `vo` to `ve` over the requested displacement, bounded by `vm`.
    #[default]
    Run,
    /// Bring the motion to rest (`ve = 0`, `ace = 0`).
    Pause,
    /// Resume from rest (`vo = 0`, `acs = 0`) toward `ve`.
    PauseResume,
}

/// One planning request, the input of [`process_curve`](crate::motion::process_curve).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurveRequest {
    /// Requested motion.
    pub intent: MoveIntent,
    /// Start velocity.
    pub vo: f64,
    /// End velocity.
    pub ve: f64,
    /// Signed acceleration at the start.
    pub acs: f64,
    /// Signed acceleration at the end.
    pub ace: f64,
    /// Displacement to cover. The sign is ignored.
    pub ncs: f64,
    /// Cruise velocity ceiling.
    pub vm: f64,
}

impl CurveRequest {
    /// A run request with zero boundary accelerations.
    pub fn run(vo: f64, ve: f64, ncs: f64, vm: f64) -> Self {
        Self {
            intent: MoveIntent::Run,
            vo,
            ve,
            acs: 0.0,
            ace: 0.0,
            ncs,
            vm,
        }
    }

    /// Check the request preconditions.
    ///
    /// # Errors
    ///
    /// - cruise velocity not finite or not > 0
    /// - boundary velocity not finite or negative
    /// - boundary acceleration or displacement not finite
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.vm.is_finite() || self.vm <= 0.0 {
            return Err(PlanError::InvalidCruiseVelocity(self.vm));
        }
        for v in [self.vo, self.ve] {
            if !v.is_finite() || v < 0.0 {
                return Err(PlanError::InvalidVelocity(v));
            }
        }
        for acc in [self.acs, self.ace] {
            if !acc.is_finite() {
                return Err(PlanError::InvalidAcceleration(acc));
            }
        }
        if !self.ncs.is_finite() {
            return Err(PlanError::InvalidDisplacement(self.ncs));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_run() {
        assert!(CurveRequest::run(0.0, 0.0, 50.0, 10.0).validate().is_ok());
    }

    #[test]
    fn test_zero_cruise_velocity() {
        let result = CurveRequest::run(0.0, 0.0, 50.0, 0.0).validate();
        assert_eq!(result, Err(PlanError::InvalidCruiseVelocity(0.0)));
    }

    #[test]
    fn test_negative_velocity() {
        let result = CurveRequest::run(-1.0, 0.0, 50.0, 10.0).validate();
        assert_eq!(result, Err(PlanError::InvalidVelocity(-1.0)));
    }

    #[test]
    fn test_negative_displacement_is_accepted() {
        assert!(CurveRequest::run(0.0, 0.0, -50.0, 10.0).validate().is_ok());
    }

    #[test]
    fn test_non_finite_acceleration() {
        let mut request = CurveRequest::run(0.0, 0.0, 50.0, 10.0);
        request.ace = f64::INFINITY;
        assert!(matches!(request.validate(), Err(PlanError::InvalidAcceleration(_))));
    }
}
