//! Builder for programmatic request creation.

use crate::error::{Error, PlanError, Result};

use super::request::{CurveRequest, MoveIntent};

/// Builder for [`CurveRequest`].
///
/// Velocities and accelerations default to zero and the intent to
/// [`MoveIntent::Run`]; displacement and cruise velocity must be set.
#[derive(Debug, Clone)]
pub struct CurveRequestBuilder {
    intent: MoveIntent,
    start_velocity: f64,
    end_velocity: f64,
    start_acceleration: f64,
    end_acceleration: f64,
    displacement: Option<f64>,
    cruise_velocity: Option<f64>,
}

impl Default for CurveRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveRequestBuilder {
    /// Create a new request builder.
    pub fn new() -> Self {
        Self {
            intent: MoveIntent::Run,
            start_velocity: 0.0,
            end_velocity: 0.0,
            start_acceleration: 0.0,
            end_acceleration: 0.0,
            displacement: None,
            cruise_velocity: None,
        }
    }

    /// Set the move intent.
    pub fn intent(mut self, intent: MoveIntent) -> Self {
        self.intent = intent;
        self
    }

    /// Set the start velocity.
    pub fn start_velocity(mut self, velocity: f64) -> Self {
        self.start_velocity = velocity;
        self
    }

    /// Set the end velocity.
    pub fn end_velocity(mut self, velocity: f64) -> Self {
        self.end_velocity = velocity;
        self
    }

    /// Set the signed acceleration at the start.
    pub fn start_acceleration(mut self, acceleration: f64) -> Self {
        self.start_acceleration = acceleration;
        self
    }

    /// Set the signed acceleration at the end.
    pub fn end_acceleration(mut self, acceleration: f64) -> Self {
        self.end_acceleration = acceleration;
        self
    }

    /// Set the displacement to cover.
    pub fn displacement(mut self, displacement: f64) -> Self {
        self.displacement = Some(displacement);
        self
    }

    /// Set the cruise velocity ceiling.
    pub fn cruise_velocity(mut self, velocity: f64) -> Self {
        self.cruise_velocity = Some(velocity);
        self
    }

    /// Build and validate the request.
    ///
    /// # Errors
    ///
    /// Returns an error if displacement or cruise velocity is missing, or if
    /// the assembled request fails [`CurveRequest::validate`].
    pub fn build(self) -> Result<CurveRequest> {
        let ncs = self
            .displacement
            .ok_or(Error::Plan(PlanError::InvalidDisplacement(f64::NAN)))?;
        let vm = self
            .cruise_velocity
            .ok_or(Error::Plan(PlanError::InvalidCruiseVelocity(f64::NAN)))?;

        let request = CurveRequest {
            intent: self.intent,
            vo: self.start_velocity,
            ve: self.end_velocity,
            acs: self.start_acceleration,
            ace: self.end_acceleration,
            ncs,
            vm,
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_run() {
        let request = CurveRequestBuilder::new()
            .start_velocity(1.0)
            .end_velocity(2.0)
            .displacement(40.0)
            .cruise_velocity(8.0)
            .build()
            .unwrap();

        assert_eq!(request.intent, MoveIntent::Run);
        assert_eq!(request.vo, 1.0);
        assert_eq!(request.ve, 2.0);
        assert_eq!(request.acs, 0.0);
        assert_eq!(request.ncs, 40.0);
        assert_eq!(request.vm, 8.0);
    }

    #[test]
    fn test_missing_displacement() {
        let result = CurveRequestBuilder::new().cruise_velocity(8.0).build();
        assert!(matches!(
            result,
            Err(Error::Plan(PlanError::InvalidDisplacement(_)))
        ));
    }

    #[test]
    fn test_missing_cruise_velocity() {
        let result = CurveRequestBuilder::new().displacement(1.0).build();
        assert!(matches!(
            result,
            Err(Error::Plan(PlanError::InvalidCruiseVelocity(_)))
        ));
    }

    #[test]
    fn test_pause_with_accelerations() {
        let request = CurveRequestBuilder::new()
            .intent(MoveIntent::Pause)
            .start_velocity(6.0)
            .start_acceleration(-1.0)
            .end_acceleration(0.5)
            .displacement(0.0)
            .cruise_velocity(6.0)
            .build()
            .unwrap();

        assert_eq!(request.intent, MoveIntent::Pause);
        assert_eq!(request.acs, -1.0);
        assert_eq!(request.ace, 0.5);
    }
}
