//! Composite curve builders.
//!
//! A composite moves the velocity from `vo` to `ve` with one sign of
//! acceleration, optionally shaping the acceleration at either end. The peak
//! acceleration is sampled down from `as` in tenths until the jerk ramps alone
//! no longer overshoot the target; a constant-acceleration period then closes
//! the remaining gap exactly.

use libm::{fabs, fmax};

use crate::config::KinematicLimits;
use crate::error::PlanError;

use super::primitives::{t1, t1_ve, t2, t3, t4, t5, t5_ve, t6, t7};
use super::sequence::PeriodSequence;

/// Number of peak accelerations tried, from `as` down to `as / 10`.
pub const ACCEL_SAMPLES: u32 = 10;

/// Relative tolerance on reached velocities.
const VELOCITY_TOLERANCE: f64 = 1e-9;

fn peak_at(l: &KinematicLimits, k: u32) -> f64 {
    l.inflection_acceleration() * f64::from(ACCEL_SAMPLES - k) / f64::from(ACCEL_SAMPLES)
}

fn slack(v: f64) -> f64 {
    VELOCITY_TOLERANCE * fmax(1.0, fabs(v))
}

/// Reject a sequence whose velocity drops below rest on the way.
fn forward(seq: PeriodSequence, velocity: f64, acceleration: f64) -> Result<PeriodSequence, PlanError> {
    match seq.lowest_velocity() {
        Some(lowest) if lowest < -slack(velocity) => {
            log::warn!(
                "scurve: acceleration {} at velocity {} reverses motion ({})",
                acceleration,
                velocity,
                lowest
            );
            Err(PlanError::BoundaryAccelerationTooLarge {
                velocity,
                acceleration,
            })
        }
        _ => Ok(seq),
    }
}

/// Release `peak` into the signed end acceleration `ace` while accelerating.
fn accel_tail(l: &KinematicLimits, vo: f64, peak: f64, ace: f64) -> Result<PeriodSequence, PlanError> {
    if ace >= 0.0 {
        return PeriodSequence::from_slice(&[t3(l, vo, peak, ace)]);
    }
    let p3 = t3(l, vo, peak, 0.0);
    let p5 = t5(l, p3.ve, 0.0, ace);
    PeriodSequence::from_slice(&[p3, p5])
}

/// Release `peak` into the signed end acceleration `ace` while decelerating.
fn decel_tail(l: &KinematicLimits, vo: f64, peak: f64, ace: f64) -> Result<PeriodSequence, PlanError> {
    if ace <= 0.0 {
        return PeriodSequence::from_slice(&[t7(l, vo, peak, ace)]);
    }
    let p7 = t7(l, vo, peak, 0.0);
    let p1 = t1(l, p7.ve, 0.0, ace);
    PeriodSequence::from_slice(&[p7, p1])
}

/// T1 (+T2) + tail, starting at acceleration magnitude `acs`.
fn accelerate(
    l: &KinematicLimits,
    vo: f64,
    ve: f64,
    acs: f64,
    ace: f64,
) -> Result<PeriodSequence, PlanError> {
    let acs = l.clamp_acceleration(acs);
    let floor = if ace > 0.0 {
        fmax(acs, l.clamp_acceleration(ace))
    } else {
        acs
    };
    let limit = ve + slack(ve);

    for k in 0..ACCEL_SAMPLES {
        let peak = peak_at(l, k);
        if peak < floor {
            break;
        }

        let p1 = t1(l, vo, acs, peak);
        let tail = accel_tail(l, p1.ve, peak, ace)?;
        let reached = tail.end_velocity().unwrap_or(p1.ve);
        if reached > limit {
            continue;
        }

        let mut seq = PeriodSequence::new();
        seq.push(p1)?;
        let gap = ve - reached;
        if gap > slack(ve) {
            let p2 = t2(p1.ve, p1.ve + gap, peak);
            seq.push(p2)?;
            seq.append(accel_tail(l, p2.ve, peak, ace)?)?;
        } else {
            seq.append(tail)?;
        }
        return Ok(seq);
    }

    log::warn!("scurve: no acceleration fits {} -> {}", vo, ve);
    Err(PlanError::VelocityChangeUnreachable { from: vo, to: ve })
}

/// T5 (+T6) + tail, starting at deceleration magnitude `acs`.
fn decelerate(
    l: &KinematicLimits,
    vo: f64,
    ve: f64,
    acs: f64,
    ace: f64,
) -> Result<PeriodSequence, PlanError> {
    let acs = l.clamp_acceleration(acs);
    let floor = if ace < 0.0 {
        fmax(acs, l.clamp_acceleration(ace))
    } else {
        acs
    };
    let limit = ve - slack(ve);
    let mut reversed = false;

    for k in 0..ACCEL_SAMPLES {
        let peak = peak_at(l, k);
        if peak < floor {
            break;
        }

        let p5 = t5(l, vo, acs, peak);
        let tail = decel_tail(l, p5.ve, peak, ace)?;
        let reached = tail.end_velocity().unwrap_or(p5.ve);
        if reached < limit {
            continue;
        }

        let mut seq = PeriodSequence::new();
        seq.push(p5)?;
        let gap = reached - ve;
        if gap > slack(ve) {
            let p6 = t6(p5.ve, p5.ve - gap, peak);
            seq.push(p6)?;
            seq.append(decel_tail(l, p6.ve, peak, ace)?)?;
        } else {
            seq.append(tail)?;
        }
        // A positive end acceleration dips below ve before rising into it.
        if seq.lowest_velocity().unwrap_or(ve) < -slack(ve) {
            reversed = true;
            continue;
        }
        return Ok(seq);
    }

    if reversed {
        log::warn!("scurve: end acceleration {} reverses motion before {}", ace, ve);
        return Err(PlanError::BoundaryAccelerationTooLarge {
            velocity: ve,
            acceleration: ace,
        });
    }
    log::warn!("scurve: no deceleration fits {} -> {}", vo, ve);
    Err(PlanError::VelocityChangeUnreachable { from: vo, to: ve })
}

/// Accelerate from `vo` to `ve` (`vo < ve`) starting and ending at zero
/// acceleration.
///
/// # Errors
///
/// [`PlanError::VelocityChangeUnreachable`] when even `as / 10` overshoots.
pub fn t1_t2_t3(l: &KinematicLimits, vo: f64, ve: f64) -> Result<PeriodSequence, PlanError> {
    accelerate(l, vo, ve, 0.0, 0.0)
}

/// Decelerate from `vo` to `ve` (`vo > ve`) starting and ending at zero
/// acceleration.
///
/// # Errors
///
/// [`PlanError::VelocityChangeUnreachable`] when even `as / 10` overshoots.
pub fn t5_t6_t7(l: &KinematicLimits, vo: f64, ve: f64) -> Result<PeriodSequence, PlanError> {
    decelerate(l, vo, ve, 0.0, 0.0)
}

/// Accelerate from `vo` to `ve` with signed boundary accelerations.
///
/// A negative `acs` is first released to zero by a T7. A negative `ace` is
/// reached through a T5 after the acceleration has been released.
///
/// # Errors
///
/// - [`PlanError::VelocityChangeUnreachable`] when no sampled peak fits
/// - [`PlanError::BoundaryAccelerationTooLarge`] when releasing `acs` drops
///   the velocity below zero
pub fn t7_t1_t2_t3_t5(
    l: &KinematicLimits,
    vo: f64,
    ve: f64,
    acs: f64,
    ace: f64,
) -> Result<PeriodSequence, PlanError> {
    if acs >= 0.0 {
        return accelerate(l, vo, ve, acs, ace);
    }

    let head = t7(l, vo, acs, 0.0);
    let mut seq = forward(PeriodSequence::from_slice(&[head])?, vo, acs)?;
    seq.append(accelerate(l, head.ve, ve, 0.0, ace)?)?;
    Ok(seq)
}

/// Decelerate from `vo` to `ve` with signed boundary accelerations.
///
/// Mirror of [`t7_t1_t2_t3_t5`]: a positive `acs` is released by a T3 and a
/// positive `ace` is reached through a T1.
///
/// # Errors
///
/// - [`PlanError::VelocityChangeUnreachable`] when no sampled peak fits
/// - [`PlanError::BoundaryAccelerationTooLarge`] when every fitting peak
///   dips below zero before rising into `ace`
pub fn t3_t5_t6_t7_t1(
    l: &KinematicLimits,
    vo: f64,
    ve: f64,
    acs: f64,
    ace: f64,
) -> Result<PeriodSequence, PlanError> {
    if acs <= 0.0 {
        return decelerate(l, vo, ve, acs, ace);
    }

    let head = t3(l, vo, acs, 0.0);
    let mut seq = PeriodSequence::new();
    seq.push(head)?;
    seq.append(decelerate(l, head.ve, ve, 0.0, ace)?)?;
    Ok(seq)
}

/// Cruise at `vo` after absorbing a start acceleration `acs`.
///
/// The start acceleration is released, the velocity swings back to `vo` and
/// a T4 covers whatever is left of `ncs`. Nothing is cruised when the shaping
/// alone exceeds `ncs`.
///
/// # Errors
///
/// [`PlanError::BoundaryAccelerationTooLarge`] when a negative `acs` drops
/// the velocity below zero.
pub fn t4_acs(l: &KinematicLimits, vo: f64, acs: f64, ncs: f64) -> Result<PeriodSequence, PlanError> {
    let mut seq = PeriodSequence::new();

    if acs > 0.0 {
        let p3 = t3(l, vo, acs, 0.0);
        let p5 = t5_ve(l, p3.ve, 0.5 * (vo + p3.ve), 0.0);
        let p7 = t7(l, p5.ve, p5.ace, 0.0);
        seq.push(p3)?;
        seq.push(p5)?;
        seq.push(p7)?;
    } else if acs < 0.0 {
        let p7 = t7(l, vo, acs, 0.0);
        let p1 = t1_ve(l, p7.ve, 0.5 * (vo + p7.ve), 0.0);
        let p3 = t3(l, p1.ve, p1.ace, 0.0);
        seq.push(p7)?;
        seq.push(p1)?;
        seq.push(p3)?;
    }

    let rest = ncs - seq.total_displacement();
    if seq.is_empty() || rest > 0.0 {
        seq.push(t4(vo, rest))?;
    }
    forward(seq, vo, acs)
}

/// Cruise at `vo`, then shape the velocity so the curve ends at `vo` with
/// acceleration `ace`.
///
/// A positive `ace` is approached from below (dip, then T1), a negative one
/// from above (bump, then T5). The T4 comes first and covers what the shaping
/// leaves of `ncs`.
///
/// # Errors
///
/// [`PlanError::BoundaryAccelerationTooLarge`] when the dip ahead of a
/// positive `ace` goes below zero.
pub fn t4_ace(l: &KinematicLimits, vo: f64, ace: f64, ncs: f64) -> Result<PeriodSequence, PlanError> {
    let mut shape = PeriodSequence::new();

    if ace > 0.0 {
        let gain = t1(l, 0.0, 0.0, ace).ve;
        let p5 = t5_ve(l, vo, vo - 0.5 * gain, 0.0);
        let p7 = t7(l, p5.ve, p5.ace, 0.0);
        let p1 = t1(l, p7.ve, 0.0, ace);
        shape.push(p5)?;
        shape.push(p7)?;
        shape.push(p1)?;
    } else if ace < 0.0 {
        let drop = -t5(l, 0.0, 0.0, ace).ve;
        let p1 = t1_ve(l, vo, vo + 0.5 * drop, 0.0);
        let p3 = t3(l, p1.ve, p1.ace, 0.0);
        let p5 = t5(l, p3.ve, 0.0, ace);
        shape.push(p1)?;
        shape.push(p3)?;
        shape.push(p5)?;
    }

    let shape = forward(shape, vo, ace)?;
    let rest = ncs - shape.total_displacement();
    let mut seq = PeriodSequence::new();
    if shape.is_empty() || rest > 0.0 {
        seq.push(t4(vo, rest))?;
    }
    seq.append(shape)?;
    Ok(seq)
}

/// Displacement of the quickest ramp from `vo` to `ve` at full jerk,
/// starting and ending at zero acceleration.
///
/// Changes of at least `dv` ramp through `as` and hold it for the excess.
/// Smaller changes turn over at the half velocity. Callers use it to size a
/// move before asking for a plan.
pub fn ramp_displacement(l: &KinematicLimits, vo: f64, ve: f64) -> f64 {
    let peak = l.inflection_acceleration();
    let excess = fabs(ve - vo) - l.delta_velocity();

    if ve > vo {
        if excess >= 0.0 {
            let p1 = t1(l, vo, 0.0, peak);
            let p2 = t2(p1.ve, p1.ve + excess, peak);
            let p3 = t3(l, p2.ve, peak, 0.0);
            p1.ncs + p2.ncs + p3.ncs
        } else {
            let p1 = t1_ve(l, vo, 0.5 * (vo + ve), 0.0);
            let p3 = t3(l, p1.ve, p1.ace, 0.0);
            p1.ncs + p3.ncs
        }
    } else if ve < vo {
        if excess >= 0.0 {
            let p5 = t5(l, vo, 0.0, peak);
            let p6 = t6(p5.ve, p5.ve - excess, peak);
            let p7 = t7(l, p6.ve, peak, 0.0);
            p5.ncs + p6.ncs + p7.ncs
        } else {
            let p5 = t5_ve(l, vo, 0.5 * (vo + ve), 0.0);
            let p7 = t7(l, p5.ve, p5.ace, 0.0);
            p5.ncs + p7.ncs
        }
    } else {
        0.0
    }
}
