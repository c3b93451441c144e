//! Motion module for scurve-planner.
//!
//! Provides the S-curve periods, the composites and planner that assemble
//! them, and the interpolation layer that plays them back.

mod composite;
mod executor;
mod interpolate;
mod period;
mod planner;
pub mod primitives;
mod sequence;

pub use composite::{
    ramp_displacement, t1_t2_t3, t3_t5_t6_t7_t1, t4_ace, t4_acs, t5_t6_t7, t7_t1_t2_t3_t5, ACCEL_SAMPLES,
};
pub use executor::CurveExecutor;
pub use interpolate::{curve_progress, interpolate_period, interpolate_periods, CurveProgress, CurveSample};
pub use period::{Period, PeriodKind, Vsa};
pub use planner::{process_curve, Scenario, CRUISE_SAMPLES};
pub use sequence::{to_stot_pvec, to_ttot_pvec, PeriodSequence, MAX_PERIODS};
