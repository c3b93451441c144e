//! Curve planning.
//!
//! [`process_curve`] classifies a request by comparing both boundary
//! velocities against the cruise velocity, then assembles the composites
//! that move between them within the displacement budget.

use core::cmp::Ordering;

use libm::{fabs, fmax, fmin};

use crate::config::KinematicLimits;
use crate::error::PlanError;
use crate::trajectory::{CurveRequest, MoveIntent};

use super::composite::{t1_t2_t3, t3_t5_t6_t7_t1, t4_ace, t4_acs, t5_t6_t7, t7_t1_t2_t3_t5};
use super::primitives::t4;
use super::sequence::PeriodSequence;

/// Number of cruise velocities tried when a plan overshoots its displacement.
///
/// The plateau walks from `vm` toward the search bound in steps of one
/// hundredth of the distance between them.
pub const CRUISE_SAMPLES: u32 = 100;

/// Relative tolerance on displacement budgets.
const DISPLACEMENT_TOLERANCE: f64 = 1e-9;

/// Order two velocities, with `-0.0` equal to `0.0`.
fn compare(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Shape of a run, from the start and end velocities relative to `vm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scenario {
    /// `vo < vm`, `ve < vm`: up to the plateau, cruise, down.
    RiseCruiseFall,
    /// `vo > vm`, `ve > vm`: down to the plateau, cruise, up.
    FallCruiseRise,
    /// `vo < vm`, `ve == vm`: up, then cruise.
    RiseToCruise,
    /// `vo > vm`, `ve == vm`: down, then cruise.
    FallToCruise,
    /// `vo == vm`, `ve < vm`: cruise, then down.
    CruiseThenFall,
    /// `vo == vm`, `ve > vm`: cruise, then up.
    CruiseThenRise,
    /// `vo < vm < ve`: two rises around a plateau.
    RiseThroughCruise,
    /// `vo > vm > ve`: two falls around a plateau.
    FallThroughCruise,
    /// `vo == ve == vm`: steady.
    Cruise,
}

impl Scenario {
    /// Classify a run.
    pub fn classify(vo: f64, ve: f64, vm: f64) -> Self {
        use Ordering::{Equal, Greater, Less};

        match (compare(vo, vm), compare(ve, vm)) {
            (Less, Less) => Scenario::RiseCruiseFall,
            (Greater, Greater) => Scenario::FallCruiseRise,
            (Less, Equal) => Scenario::RiseToCruise,
            (Greater, Equal) => Scenario::FallToCruise,
            (Equal, Less) => Scenario::CruiseThenFall,
            (Equal, Greater) => Scenario::CruiseThenRise,
            (Less, Greater) => Scenario::RiseThroughCruise,
            (Greater, Less) => Scenario::FallThroughCruise,
            (Equal, Equal) => Scenario::Cruise,
        }
    }

    /// Case number, 1 through 9.
    pub fn case(self) -> u8 {
        match self {
            Scenario::RiseCruiseFall => 1,
            Scenario::FallCruiseRise => 2,
            Scenario::RiseToCruise => 3,
            Scenario::FallToCruise => 4,
            Scenario::CruiseThenFall => 5,
            Scenario::CruiseThenRise => 6,
            Scenario::RiseThroughCruise => 7,
            Scenario::FallThroughCruise => 8,
            Scenario::Cruise => 9,
        }
    }

    /// Whether the plan passes through a plateau that may be moved.
    fn has_plateau(self) -> bool {
        matches!(
            self,
            Scenario::RiseCruiseFall
                | Scenario::FallCruiseRise
                | Scenario::RiseThroughCruise
                | Scenario::FallThroughCruise
        )
    }
}

/// Plan the period sequence for `request`.
///
/// # Errors
///
/// - invalid request values (see [`CurveRequest::validate`])
/// - [`PlanError::VelocityChangeUnreachable`] or
///   [`PlanError::DisplacementTooShort`] when the move cannot be shaped
///   within the limits
/// - [`PlanError::SequenceFull`] when a plan outgrows the sequence capacity
pub fn process_curve(l: &KinematicLimits, request: &CurveRequest) -> Result<PeriodSequence, PlanError> {
    request.validate()?;
    let ncs = fabs(request.ncs);

    let seq = match request.intent {
        MoveIntent::Run => run(l, request, ncs, request.vm)?,
        MoveIntent::Pause => pause(l, request)?,
        MoveIntent::PauseResume => resume(l, request)?,
    };

    log::debug!(
        "scurve: {:?} {} -> {} planned in {} periods, {} s, {} units",
        request.intent,
        request.vo,
        request.ve,
        seq.len(),
        seq.total_time(),
        seq.total_displacement()
    );
    Ok(seq)
}

fn single(vo: f64, s: f64) -> Result<PeriodSequence, PlanError> {
    PeriodSequence::from_slice(&[t4(vo, s)])
}

fn tolerance(ncs: f64) -> f64 {
    DISPLACEMENT_TOLERANCE * fmax(1.0, ncs)
}

/// Velocity change from `vo` to `ve` with boundary accelerations.
///
/// Equal velocities yield a zero-length T4; the accelerations are dropped.
fn ramp(l: &KinematicLimits, vo: f64, ve: f64, acs: f64, ace: f64) -> Result<PeriodSequence, PlanError> {
    let plain = acs == 0.0 && ace == 0.0;

    match compare(ve, vo) {
        Ordering::Greater if plain => t1_t2_t3(l, vo, ve),
        Ordering::Greater => t7_t1_t2_t3_t5(l, vo, ve, acs, ace),
        Ordering::Less if plain => t5_t6_t7(l, vo, ve),
        Ordering::Less => t3_t5_t6_t7_t1(l, vo, ve, acs, ace),
        Ordering::Equal => single(vo, 0.0),
    }
}

fn pause(l: &KinematicLimits, r: &CurveRequest) -> Result<PeriodSequence, PlanError> {
    if r.vo == r.ve {
        return single(r.vo, 0.0);
    }
    if r.vo > 0.0 {
        ramp(l, r.vo, 0.0, r.acs, 0.0)
    } else {
        single(0.0, 0.0)
    }
}

fn resume(l: &KinematicLimits, r: &CurveRequest) -> Result<PeriodSequence, PlanError> {
    if r.vo == r.ve {
        return single(r.vo, 0.0);
    }
    ramp(l, 0.0, r.ve, 0.0, r.ace)
}

fn run(l: &KinematicLimits, r: &CurveRequest, ncs: f64, vm: f64) -> Result<PeriodSequence, PlanError> {
    let scenario = Scenario::classify(r.vo, r.ve, vm);

    if scenario.has_plateau() {
        return match via_plateau(l, scenario, r, ncs, vm) {
            Err(e) if e.is_infeasible() && fmax(r.vo, r.ve) > 0.0 => {
                let fallback = fmax(r.vo, r.ve);
                log::warn!(
                    "scurve: no plateau below {} fits {} units (case {}), replanning with cruise {}",
                    vm,
                    ncs,
                    scenario.case(),
                    fallback
                );
                run(l, r, ncs, fallback)
            }
            other => other,
        };
    }

    match scenario {
        Scenario::RiseToCruise | Scenario::FallToCruise => {
            let head = ramp(l, r.vo, vm, r.acs, 0.0)?;
            let tail = t4_ace(l, vm, r.ace, ncs - head.total_displacement())?;
            within(head, tail, ncs)
        }
        Scenario::CruiseThenFall | Scenario::CruiseThenRise => {
            let tail = ramp(l, vm, r.ve, 0.0, r.ace)?;
            let head = t4_acs(l, vm, r.acs, ncs - tail.total_displacement())?;
            within(head, tail, ncs)
        }
        _ => single(r.vo, ncs),
    }
}

/// Join two parts and check the result against the displacement budget.
fn within(mut head: PeriodSequence, tail: PeriodSequence, ncs: f64) -> Result<PeriodSequence, PlanError> {
    head.append(tail)?;
    let total = head.total_displacement();
    if total > ncs + tolerance(ncs) {
        log::warn!("scurve: minimal curve needs {} units, {} requested", total, ncs);
        return Err(PlanError::DisplacementTooShort {
            requested: ncs,
            minimum: total,
        });
    }
    Ok(head)
}

/// Two ramps around a plateau, lowering the plateau toward the search bound
/// until both fit the budget. What the ramps leave is cruised at the plateau.
fn via_plateau(
    l: &KinematicLimits,
    scenario: Scenario,
    r: &CurveRequest,
    ncs: f64,
    vm: f64,
) -> Result<PeriodSequence, PlanError> {
    let bound = match scenario {
        Scenario::RiseCruiseFall => fmax(r.vo, r.ve),
        Scenario::FallCruiseRise => fmin(r.vo, r.ve),
        _ => r.vo,
    };
    let limit = ncs + tolerance(ncs);
    let mut shortest = f64::INFINITY;
    let mut failure = None;

    for k in 0..CRUISE_SAMPLES {
        let plateau = vm + (bound - vm) * f64::from(k) / f64::from(CRUISE_SAMPLES);
        let first = match ramp(l, r.vo, plateau, r.acs, 0.0) {
            Ok(seq) => seq,
            Err(e) => {
                failure = Some(e);
                continue;
            }
        };
        let second = match ramp(l, plateau, r.ve, 0.0, r.ace) {
            Ok(seq) => seq,
            Err(e) => {
                failure = Some(e);
                continue;
            }
        };

        let stot = first.total_displacement() + second.total_displacement();
        shortest = fmin(shortest, stot);
        if stot > limit {
            continue;
        }

        let cruise = first.end_velocity().unwrap_or(plateau);
        let mut seq = first;
        let rest = ncs - stot;
        if rest > tolerance(ncs) {
            seq.push(t4(cruise, rest))?;
        }
        seq.append(second)?;
        return Ok(seq);
    }

    if shortest.is_finite() {
        Err(PlanError::DisplacementTooShort {
            requested: ncs,
            minimum: shortest,
        })
    } else {
        Err(failure.unwrap_or(PlanError::VelocityChangeUnreachable {
            from: r.vo,
            to: r.ve,
        }))
    }
}
