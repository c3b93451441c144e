//! Curve execution at a fixed control-cycle rate.

use crate::config::KinematicLimits;
use crate::error::{ConfigError, InterpolationError, Result};
use crate::trajectory::CurveRequest;

use super::interpolate::{curve_progress, interpolate_periods, CurveProgress, CurveSample};
use super::period::PeriodKind;
use super::planner::process_curve;
use super::sequence::PeriodSequence;

/// Runtime state while a planned curve is played back.
///
/// The clock is kept as a cycle count, so the sampled time never drifts from
/// `cycles * cycle_time`.
#[derive(Debug, Clone)]
pub struct CurveExecutor {
    /// Limits the curve was planned with.
    limits: KinematicLimits,

    /// The planned periods.
    periods: PeriodSequence,

    /// Control-cycle duration in seconds.
    cycle_time: f64,

    /// Cycles elapsed since the curve start.
    cycles: u32,

    /// Most recent sample.
    last: CurveSample,
}

impl CurveExecutor {
    /// Create an executor for a planned sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCycleTime`] unless `cycle_time` is
    /// finite and positive.
    pub fn new(
        limits: KinematicLimits,
        periods: PeriodSequence,
        cycle_time: f64,
    ) -> core::result::Result<Self, ConfigError> {
        if !cycle_time.is_finite() || cycle_time <= 0.0 {
            return Err(ConfigError::InvalidCycleTime(cycle_time));
        }

        let mut executor = Self {
            limits,
            periods,
            cycle_time,
            cycles: 0,
            last: CurveSample::default(),
        };
        executor.reset();
        Ok(executor)
    }

    /// Plan `request` and create an executor for it.
    pub fn plan(limits: KinematicLimits, request: &CurveRequest, cycle_time: f64) -> Result<Self> {
        let periods = process_curve(&limits, request)?;
        Ok(Self::new(limits, periods, cycle_time)?)
    }

    /// Check if the curve has been played to its end.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.last.finished
    }

    /// Get the planned periods.
    #[inline]
    pub fn periods(&self) -> &PeriodSequence {
        &self.periods
    }

    /// Get the control-cycle duration.
    #[inline]
    pub fn cycle_time(&self) -> f64 {
        self.cycle_time
    }

    /// Get the number of cycles advanced.
    #[inline]
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Time since the curve start.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        f64::from(self.cycles) * self.cycle_time
    }

    /// Total duration of the curve.
    #[inline]
    pub fn total_time(&self) -> f64 {
        self.periods.total_time()
    }

    /// Time left until the end of the curve.
    #[inline]
    pub fn remaining_time(&self) -> f64 {
        libm::fmax(0.0, self.total_time() - self.elapsed())
    }

    /// Most recent sample.
    #[inline]
    pub fn sample(&self) -> CurveSample {
        self.last
    }

    /// Kind of the period active at the current time.
    pub fn current_kind(&self) -> Option<PeriodKind> {
        let now = self.elapsed();
        let mut t = 0.0;
        for p in &self.periods {
            if now < t + p.nct {
                return Some(p.kind);
            }
            t += p.nct;
        }
        None
    }

    /// Advance the clock by one cycle and sample the curve.
    ///
    /// Once complete the clock stops and the end sample is returned again.
    pub fn advance(&mut self) -> core::result::Result<CurveSample, InterpolationError> {
        if self.is_complete() {
            return Ok(self.last);
        }

        self.cycles = self.cycles.saturating_add(1);
        self.last = interpolate_periods(&self.limits, self.elapsed(), &self.periods)?;
        Ok(self.last)
    }

    /// Sample the curve at an arbitrary time without moving the clock.
    pub fn sample_at(&self, at: f64) -> core::result::Result<CurveSample, InterpolationError> {
        interpolate_periods(&self.limits, at, &self.periods)
    }

    /// Locate a displacement on the curve.
    pub fn position_progress(&self, position: f64) -> core::result::Result<CurveProgress, InterpolationError> {
        curve_progress(position, &self.periods)
    }

    /// Rewind to the curve start.
    pub fn reset(&mut self) {
        self.cycles = 0;
        self.last = interpolate_periods(&self.limits, 0.0, &self.periods).unwrap_or(CurveSample {
            vsa: Default::default(),
            finished: true,
        });
    }

    /// Get progress as a fraction of the total time (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f64 {
        let total = self.total_time();
        if total <= 0.0 {
            1.0
        } else {
            libm::fmin(1.0, self.elapsed() / total)
        }
    }
}
