//! Time and position queries over planned curves.

use libm::fmax;

use crate::config::KinematicLimits;
use crate::error::InterpolationError;

use super::period::{Period, PeriodKind, Vsa};
use super::primitives::{t1_i, t2_i, t3_i, t4_i, t5_i, t6_i, t7_i};
use super::sequence::PeriodSequence;

/// State of a curve at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurveSample {
    /// Velocity, displacement from the curve start and acceleration.
    pub vsa: Vsa,
    /// Whether the sampled time is at or past the end of the curve.
    pub finished: bool,
}

/// Where a position falls on a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurveProgress {
    /// Fraction of the located period already covered, in `[0, 1]`.
    pub progress: f64,
    /// Displacement left in the located period.
    pub distance_to_go: f64,
    /// Index of the located period.
    pub index: usize,
}

/// Interpolate one period at local time `ti`.
pub fn interpolate_period(l: &KinematicLimits, ti: f64, p: &Period) -> Vsa {
    match p.kind {
        PeriodKind::T1 => t1_i(l, p, ti),
        PeriodKind::T2 => t2_i(p, ti),
        PeriodKind::T3 => t3_i(l, p, ti),
        PeriodKind::T4 => t4_i(p, ti),
        PeriodKind::T5 => t5_i(l, p, ti),
        PeriodKind::T6 => t6_i(p, ti),
        PeriodKind::T7 => t7_i(l, p, ti),
    }
}

/// Interpolate a sequence at time `at` from its start.
///
/// Negative times sample the start. Times at or past the total duration
/// sample the end and report `finished`.
///
/// # Errors
///
/// [`InterpolationError::EmptySequence`] for an empty sequence, and
/// [`InterpolationError::NoActivePeriod`] if no period covers `at`.
pub fn interpolate_periods(
    l: &KinematicLimits,
    at: f64,
    pvec: &PeriodSequence,
) -> Result<CurveSample, InterpolationError> {
    let last = pvec.last().ok_or(InterpolationError::EmptySequence)?;
    let at = fmax(0.0, at);

    if at >= pvec.total_time() {
        let before: f64 = pvec[..pvec.len() - 1].iter().map(|p| p.ncs).sum();
        let mut vsa = interpolate_period(l, last.nct, last);
        vsa.s += before;
        return Ok(CurveSample { vsa, finished: true });
    }

    let mut t = 0.0;
    let mut s = 0.0;
    for p in pvec {
        if at >= t && at < t + p.nct {
            let mut vsa = interpolate_period(l, at - t, p);
            vsa.s += s;
            return Ok(CurveSample {
                vsa,
                finished: false,
            });
        }
        t += p.nct;
        s += p.ncs;
    }

    Err(InterpolationError::NoActivePeriod { at_time: at })
}

/// Locate displacement `position` on a sequence.
///
/// # Errors
///
/// [`InterpolationError::EmptySequence`] for an empty sequence, and
/// [`InterpolationError::PositionOutOfRange`] outside
/// `[0, total displacement]`.
pub fn curve_progress(position: f64, pvec: &PeriodSequence) -> Result<CurveProgress, InterpolationError> {
    if pvec.is_empty() {
        return Err(InterpolationError::EmptySequence);
    }

    let mut start = 0.0;
    for (index, p) in pvec.iter().enumerate() {
        if position >= start && position <= start + p.ncs {
            let done = position - start;
            let progress = if p.ncs > 0.0 { done / p.ncs } else { 1.0 };
            return Ok(CurveProgress {
                progress,
                distance_to_go: p.ncs - done,
                index,
            });
        }
        start += p.ncs;
    }

    Err(InterpolationError::PositionOutOfRange {
        position,
        total: pvec.total_displacement(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::planner::process_curve;
    use crate::trajectory::CurveRequest;

    const EPS: f64 = 1e-9;

    fn limits() -> KinematicLimits {
        KinematicLimits::new(2.0, 10.0).unwrap()
    }

    fn plan() -> PeriodSequence {
        process_curve(&limits(), &CurveRequest::run(0.0, 0.0, 50.0, 10.0)).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS * b.abs().max(1.0)
    }

    #[test]
    fn test_start_and_end() {
        let l = limits();
        let seq = plan();

        let start = interpolate_periods(&l, 0.0, &seq).unwrap();
        assert!(!start.finished);
        assert!(close(start.vsa.v, 0.0));
        assert!(close(start.vsa.s, 0.0));
        assert!(close(start.vsa.a, 0.0));

        let end = interpolate_periods(&l, seq.total_time(), &seq).unwrap();
        assert!(end.finished);
        assert!(close(end.vsa.v, 0.0));
        assert!(close(end.vsa.s, 50.0));

        let beyond = interpolate_periods(&l, seq.total_time() + 3.0, &seq).unwrap();
        assert!(beyond.finished);
        assert_eq!(beyond.vsa, end.vsa);
    }

    #[test]
    fn test_midpoint_at_peak() {
        let l = limits();
        let seq = plan();

        let mid = interpolate_periods(&l, 5.0, &seq).unwrap();
        assert!(close(mid.vsa.v, 10.0));
        assert!(close(mid.vsa.s, 25.0));
    }

    #[test]
    fn test_negative_time_samples_start() {
        let l = limits();
        let seq = plan();

        let before = interpolate_periods(&l, -1.0, &seq).unwrap();
        assert_eq!(before, interpolate_periods(&l, 0.0, &seq).unwrap());
    }

    #[test]
    fn test_empty_sequence() {
        let seq = PeriodSequence::new();
        assert_eq!(
            interpolate_periods(&limits(), 0.0, &seq),
            Err(InterpolationError::EmptySequence)
        );
        assert_eq!(curve_progress(0.0, &seq), Err(InterpolationError::EmptySequence));
    }

    #[test]
    fn test_progress_by_position() {
        let seq = plan();
        let first = seq[0].ncs;

        let at_start = curve_progress(0.0, &seq).unwrap();
        assert_eq!(at_start.index, 0);
        assert_eq!(at_start.progress, 0.0);

        let half = curve_progress(first / 2.0, &seq).unwrap();
        assert_eq!(half.index, 0);
        assert!(close(half.progress, 0.5));
        assert!(close(half.distance_to_go, first / 2.0));

        let end = curve_progress(seq.total_displacement(), &seq).unwrap();
        assert_eq!(end.index, seq.len() - 1);
        assert!(close(end.progress, 1.0));
    }

    #[test]
    fn test_progress_out_of_range() {
        let seq = plan();
        assert!(matches!(
            curve_progress(60.0, &seq),
            Err(InterpolationError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            curve_progress(-1.0, &seq),
            Err(InterpolationError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_length_period_complete() {
        let seq = PeriodSequence::from_slice(&[crate::motion::primitives::t4(3.0, 0.0)]).unwrap();
        let progress = curve_progress(0.0, &seq).unwrap();
        assert_eq!(progress.progress, 1.0);
        assert_eq!(progress.distance_to_go, 0.0);
    }
}
