//! Closed-form S-curve periods.
//!
//! Each jerk ramp (T1, T3, T5, T7) is a piece of one constant-jerk profile
//! anchored at a virtual origin where the acceleration is zero (T1, T5) or at
//! the inflection value `as` (T3, T7). A period covers the slice of that
//! profile between the times at which the acceleration equals the requested
//! start and end values. T2 and T6 hold a constant acceleration and T4 a
//! constant velocity.
//!
//! Every kind comes in four flavours:
//!
//! - boundary constructor `tN(vo, acs, ace)`
//! - end-velocity constructor `tN_ve(vo, ve, acs)`
//! - partial-interval constructor `tN_pid(vo, acs, interval)` for servo-rate
//!   integration
//! - local interpolator `tN_i(period, ti)`

use libm::{fabs, fmax, fmin, sqrt};

use crate::config::KinematicLimits;

use super::period::{Period, PeriodKind, Vsa};

/// The four constant-jerk ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ramp {
    /// T1: acceleration builds from 0 toward `as`.
    AccelBuild,
    /// T3: acceleration releases from `as` toward 0.
    AccelRelease,
    /// T5: deceleration builds from 0 toward `as`.
    DecelBuild,
    /// T7: deceleration releases from `as` toward 0.
    DecelRelease,
}

impl Ramp {
    fn kind(self) -> PeriodKind {
        match self {
            Ramp::AccelBuild => PeriodKind::T1,
            Ramp::AccelRelease => PeriodKind::T3,
            Ramp::DecelBuild => PeriodKind::T5,
            Ramp::DecelRelease => PeriodKind::T7,
        }
    }

    fn is_build(self) -> bool {
        matches!(self, Ramp::AccelBuild | Ramp::DecelBuild)
    }

    /// Profile time at which the acceleration magnitude equals `acc`.
    fn time_at(self, l: &KinematicLimits, acc: f64) -> f64 {
        if self.is_build() {
            acc / l.jerk()
        } else {
            (l.inflection_acceleration() - acc) / l.jerk()
        }
    }

    /// Profile state at time `t` for an origin velocity `vf`.
    fn state(self, l: &KinematicLimits, vf: f64, t: f64) -> Vsa {
        let jm = l.jerk();
        let a_s = l.inflection_acceleration();
        let t2 = t * t;
        let t3 = t2 * t;

        match self {
            Ramp::AccelBuild => Vsa {
                v: vf + jm * t2 / 2.0,
                s: vf * t + jm * t3 / 6.0,
                a: jm * t,
            },
            Ramp::AccelRelease => Vsa {
                v: vf + a_s * t - jm * t2 / 2.0,
                s: vf * t + a_s * t2 / 2.0 - jm * t3 / 6.0,
                a: a_s - jm * t,
            },
            Ramp::DecelBuild => Vsa {
                v: vf - jm * t2 / 2.0,
                s: vf * t - jm * t3 / 6.0,
                a: -(jm * t),
            },
            Ramp::DecelRelease => Vsa {
                v: vf - a_s * t + jm * t2 / 2.0,
                s: vf * t - a_s * t2 / 2.0 + jm * t3 / 6.0,
                a: -(a_s - jm * t),
            },
        }
    }

    /// Origin velocity such that the profile passes `vo` at time `ts`.
    fn origin(self, l: &KinematicLimits, vo: f64, ts: f64) -> f64 {
        vo - self.state(l, 0.0, ts).v
    }

    fn period(self, l: &KinematicLimits, vo: f64, ts: f64, te: f64) -> Period {
        let vf = self.origin(l, vo, ts);
        let start = self.state(l, vf, ts);
        let end = self.state(l, vf, te);

        Period {
            kind: self.kind(),
            vo,
            ve: end.v,
            acs: start.a,
            ace: end.a,
            ncs: end.s - start.s,
            nct: te - ts,
        }
    }

    /// Boundary constructor. The pair is clamped into `[0, as]` and into the
    /// ramp's natural order so the duration is never negative.
    fn between(self, l: &KinematicLimits, vo: f64, acs: f64, ace: f64) -> Period {
        let mut acs = l.clamp_acceleration(acs);
        let mut ace = l.clamp_acceleration(ace);
        if self.is_build() {
            acs = fmin(acs, ace);
        } else {
            ace = fmin(ace, acs);
        }

        let ts = self.time_at(l, acs);
        let te = self.time_at(l, ace);
        self.period(l, vo, ts, te)
    }

    /// End-velocity constructor, stopping early at `ve` or at the end of the
    /// half ramp, whichever comes first.
    fn toward(self, l: &KinematicLimits, vo: f64, ve: f64, acs: f64) -> Period {
        let jm = l.jerk();
        let a_s = l.inflection_acceleration();
        let ts = self.time_at(l, l.clamp_acceleration(acs));
        let vf = self.origin(l, vo, ts);

        let te = match self {
            Ramp::AccelBuild => sqrt(fmax(0.0, 2.0 * (ve - vf)) / jm),
            Ramp::DecelBuild => sqrt(fmax(0.0, 2.0 * (vf - ve)) / jm),
            Ramp::AccelRelease => (a_s - sqrt(fmax(0.0, a_s * a_s - 2.0 * jm * (ve - vf)))) / jm,
            Ramp::DecelRelease => (a_s - sqrt(fmax(0.0, a_s * a_s - 2.0 * jm * (vf - ve)))) / jm,
        };
        let te = fmax(ts, fmin(l.half_ramp_time(), te));

        self.period(l, vo, ts, te)
    }

    /// Partial-interval constructor for one servo cycle.
    fn partial(self, l: &KinematicLimits, vo: f64, acs: f64, interval: f64) -> Period {
        let ts = self.time_at(l, l.clamp_acceleration(acs));
        let te = fmin(l.half_ramp_time(), ts + fmax(0.0, interval));
        self.period(l, vo, ts, fmax(ts, te))
    }

    fn sample(self, l: &KinematicLimits, p: &Period, ti: f64) -> Vsa {
        let ts = self.time_at(l, fabs(p.acs));
        let vf = self.origin(l, p.vo, ts);
        let start = self.state(l, vf, ts);
        let at = self.state(l, vf, ts + ti);

        Vsa {
            v: at.v,
            s: at.s - start.s,
            a: at.a,
        }
    }
}

// T1: acceleration build-up.

/// T1 from acceleration `acs` up to `ace`.
pub fn t1(l: &KinematicLimits, vo: f64, acs: f64, ace: f64) -> Period {
    Ramp::AccelBuild.between(l, vo, acs, ace)
}

/// T1 from `acs` until velocity `ve` (or the end of the half ramp).
pub fn t1_ve(l: &KinematicLimits, vo: f64, ve: f64, acs: f64) -> Period {
    Ramp::AccelBuild.toward(l, vo, ve, acs)
}

/// T1 state after `interval` seconds from `acs`.
pub fn t1_pid(l: &KinematicLimits, vo: f64, acs: f64, interval: f64) -> Period {
    Ramp::AccelBuild.partial(l, vo, acs, interval)
}

/// Interpolate a T1 period at local time `ti`.
pub fn t1_i(l: &KinematicLimits, p: &Period, ti: f64) -> Vsa {
    Ramp::AccelBuild.sample(l, p, ti)
}

// T2: constant acceleration.

/// T2 from `vo` to `ve` at acceleration `a` (`a > 0`).
pub fn t2(vo: f64, ve: f64, a: f64) -> Period {
    let a = fabs(a);
    Period {
        kind: PeriodKind::T2,
        vo,
        ve,
        acs: a,
        ace: a,
        ncs: (ve * ve - vo * vo) / (2.0 * a),
        nct: (ve - vo) / a,
    }
}

/// T2 state after `interval` seconds.
pub fn t2_pid(vo: f64, a: f64, interval: f64) -> Period {
    let a = fabs(a);
    let t = fmax(0.0, interval);
    Period {
        kind: PeriodKind::T2,
        vo,
        ve: vo + a * t,
        acs: a,
        ace: a,
        ncs: vo * t + 0.5 * a * t * t,
        nct: t,
    }
}

/// Interpolate a T2 period at local time `ti`.
pub fn t2_i(p: &Period, ti: f64) -> Vsa {
    let a = fabs(p.acs);
    Vsa {
        v: p.vo + a * ti,
        s: p.vo * ti + 0.5 * a * ti * ti,
        a,
    }
}

// T3: acceleration release.

/// T3 from acceleration `acs` down to `ace`.
pub fn t3(l: &KinematicLimits, vo: f64, acs: f64, ace: f64) -> Period {
    Ramp::AccelRelease.between(l, vo, acs, ace)
}

/// T3 from `acs` until velocity `ve` (or until acceleration reaches zero).
pub fn t3_ve(l: &KinematicLimits, vo: f64, ve: f64, acs: f64) -> Period {
    Ramp::AccelRelease.toward(l, vo, ve, acs)
}

/// T3 state after `interval` seconds from `acs`.
pub fn t3_pid(l: &KinematicLimits, vo: f64, acs: f64, interval: f64) -> Period {
    Ramp::AccelRelease.partial(l, vo, acs, interval)
}

/// Interpolate a T3 period at local time `ti`.
pub fn t3_i(l: &KinematicLimits, p: &Period, ti: f64) -> Vsa {
    Ramp::AccelRelease.sample(l, p, ti)
}

// T4: steady.

/// T4 covering displacement `s` at velocity `vo`.
///
/// A zero displacement yields a zero duration, also at rest.
pub fn t4(vo: f64, s: f64) -> Period {
    let s = fmax(0.0, s);
    Period {
        kind: PeriodKind::T4,
        vo,
        ve: vo,
        acs: 0.0,
        ace: 0.0,
        ncs: s,
        nct: if s > 0.0 { s / vo } else { 0.0 },
    }
}

/// T4 state after `interval` seconds.
pub fn t4_pid(vo: f64, interval: f64) -> Period {
    let t = fmax(0.0, interval);
    Period {
        kind: PeriodKind::T4,
        vo,
        ve: vo,
        acs: 0.0,
        ace: 0.0,
        ncs: vo * t,
        nct: t,
    }
}

/// Interpolate a T4 period at local time `ti`.
pub fn t4_i(p: &Period, ti: f64) -> Vsa {
    Vsa {
        v: p.vo,
        s: p.vo * ti,
        a: 0.0,
    }
}

// T5: deceleration build-up.

/// T5 from deceleration magnitude `acs` up to `ace`.
pub fn t5(l: &KinematicLimits, vo: f64, acs: f64, ace: f64) -> Period {
    Ramp::DecelBuild.between(l, vo, acs, ace)
}

/// T5 from `acs` until velocity `ve` (or the end of the half ramp).
pub fn t5_ve(l: &KinematicLimits, vo: f64, ve: f64, acs: f64) -> Period {
    Ramp::DecelBuild.toward(l, vo, ve, acs)
}

/// T5 state after `interval` seconds from `acs`.
pub fn t5_pid(l: &KinematicLimits, vo: f64, acs: f64, interval: f64) -> Period {
    Ramp::DecelBuild.partial(l, vo, acs, interval)
}

/// Interpolate a T5 period at local time `ti`.
pub fn t5_i(l: &KinematicLimits, p: &Period, ti: f64) -> Vsa {
    Ramp::DecelBuild.sample(l, p, ti)
}

// T6: constant deceleration.

/// T6 from `vo` down to `ve` at deceleration magnitude `a` (`a > 0`).
pub fn t6(vo: f64, ve: f64, a: f64) -> Period {
    let a = fabs(a);
    Period {
        kind: PeriodKind::T6,
        vo,
        ve,
        acs: -a,
        ace: -a,
        ncs: (vo * vo - ve * ve) / (2.0 * a),
        nct: (vo - ve) / a,
    }
}

/// T6 state after `interval` seconds.
pub fn t6_pid(vo: f64, a: f64, interval: f64) -> Period {
    let a = fabs(a);
    let t = fmax(0.0, interval);
    Period {
        kind: PeriodKind::T6,
        vo,
        ve: vo - a * t,
        acs: -a,
        ace: -a,
        ncs: vo * t - 0.5 * a * t * t,
        nct: t,
    }
}

/// Interpolate a T6 period at local time `ti`.
pub fn t6_i(p: &Period, ti: f64) -> Vsa {
    let a = fabs(p.acs);
    Vsa {
        v: p.vo - a * ti,
        s: p.vo * ti - 0.5 * a * ti * ti,
        a: -a,
    }
}

// T7: deceleration release.

/// T7 from deceleration magnitude `acs` down to `ace`.
pub fn t7(l: &KinematicLimits, vo: f64, acs: f64, ace: f64) -> Period {
    Ramp::DecelRelease.between(l, vo, acs, ace)
}

/// T7 from `acs` until velocity `ve` (or until deceleration reaches zero).
pub fn t7_ve(l: &KinematicLimits, vo: f64, ve: f64, acs: f64) -> Period {
    Ramp::DecelRelease.toward(l, vo, ve, acs)
}

/// T7 state after `interval` seconds from `acs`.
pub fn t7_pid(l: &KinematicLimits, vo: f64, acs: f64, interval: f64) -> Period {
    Ramp::DecelRelease.partial(l, vo, acs, interval)
}

/// Interpolate a T7 period at local time `ti`.
pub fn t7_i(l: &KinematicLimits, p: &Period, ti: f64) -> Vsa {
    Ramp::DecelRelease.sample(l, p, ti)
}

/// State after one servo `interval` of a period of `kind`.
///
/// `acc` is the acceleration magnitude the period starts at; for T2/T6 it is
/// the constant acceleration and for T4 it is ignored.
pub fn partial_period(
    l: &KinematicLimits,
    kind: PeriodKind,
    vo: f64,
    acc: f64,
    interval: f64,
) -> Period {
    match kind {
        PeriodKind::T1 => t1_pid(l, vo, acc, interval),
        PeriodKind::T2 => t2_pid(vo, acc, interval),
        PeriodKind::T3 => t3_pid(l, vo, acc, interval),
        PeriodKind::T4 => t4_pid(vo, interval),
        PeriodKind::T5 => t5_pid(l, vo, acc, interval),
        PeriodKind::T6 => t6_pid(vo, acc, interval),
        PeriodKind::T7 => t7_pid(l, vo, acc, interval),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn limits() -> KinematicLimits {
        KinematicLimits::new(2.0, 10.0).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS * b.abs().max(1.0)
    }

    fn sample(l: &KinematicLimits, p: &Period, ti: f64) -> Vsa {
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

    fn assert_boundaries(l: &KinematicLimits, p: &Period) {
        let start = sample(l, p, 0.0);
        let end = sample(l, p, p.nct);
        assert!(close(start.v, p.vo), "{:?} start v {}", p.kind, start.v);
        assert!(close(start.s, 0.0), "{:?} start s {}", p.kind, start.s);
        assert!(close(end.v, p.ve), "{:?} end v {} != {}", p.kind, end.v, p.ve);
        assert!(close(end.s, p.ncs), "{:?} end s {} != {}", p.kind, end.s, p.ncs);
        assert!(close(start.a, p.acs), "{:?} start a {} != {}", p.kind, start.a, p.acs);
        assert!(close(end.a, p.ace), "{:?} end a {} != {}", p.kind, end.a, p.ace);
    }

    #[test]
    fn test_full_ramp_pair_gains_dv() {
        let l = limits();
        let p1 = t1(&l, 0.0, 0.0, 4.0);
        let p3 = t3(&l, p1.ve, p1.ace, 0.0);

        assert!(close(p1.nct, 2.5));
        assert!(close(p1.ve, 5.0));
        assert!(close(p3.ve, 10.0));
        assert!(close(p1.ncs + p3.ncs, 25.0));
        assert!(close(p3.ace, 0.0));
    }

    #[test]
    fn test_full_decel_pair_drops_dv() {
        let l = limits();
        let p5 = t5(&l, 10.0, 0.0, 4.0);
        let p7 = t7(&l, p5.ve, p5.ace, 0.0);

        assert!(close(p5.ace, -4.0));
        assert!(close(p7.ve, 0.0));
        assert!(close(p5.ncs + p7.ncs, 25.0));
    }

    #[test]
    fn test_boundaries_of_every_kind() {
        let l = limits();
        let periods = [
            t1(&l, 1.0, 0.5, 3.0),
            t2(3.0, 7.0, 4.0),
            t3(&l, 7.0, 4.0, 1.0),
            t4(5.0, 12.0),
            t5(&l, 9.0, 1.0, 3.5),
            t6(9.0, 2.0, 4.0),
            t7(&l, 6.0, -4.0, -0.5),
        ];
        for p in &periods {
            assert!(p.nct >= 0.0 && p.ncs >= 0.0, "{:?}", p);
            assert_boundaries(&l, p);
        }
    }

    #[test]
    fn test_acceleration_clamped_to_inflection() {
        let l = limits();
        let p1 = t1(&l, 0.0, 0.0, 100.0);
        let p7 = t7(&l, 10.0, -100.0, 0.0);

        assert!(p1.ace <= l.inflection_acceleration() + EPS);
        assert!(p7.acs.abs() <= l.inflection_acceleration() + EPS);
        assert!(close(p1.nct, l.half_ramp_time()));
    }

    #[test]
    fn test_reversed_pair_never_negative() {
        let l = limits();
        let p1 = t1(&l, 0.0, 3.0, 1.0);
        let p3 = t3(&l, 0.0, 1.0, 3.0);

        assert_eq!(p1.nct, 0.0);
        assert_eq!(p3.nct, 0.0);
    }

    #[test]
    fn test_end_velocity_constructors() {
        let l = limits();

        let p1 = t1_ve(&l, 0.0, 2.0, 0.0);
        assert!(close(p1.ve, 2.0));
        assert_boundaries(&l, &p1);

        let p5 = t5_ve(&l, 10.0, 7.0, 0.0);
        assert!(close(p5.ve, 7.0));
        assert_boundaries(&l, &p5);

        let p3 = t3_ve(&l, 5.0, 6.0, 4.0);
        assert!(close(p3.ve, 6.0));
        assert_boundaries(&l, &p3);

        let p7 = t7_ve(&l, 5.0, 4.0, 4.0);
        assert!(close(p7.ve, 4.0));
        assert_boundaries(&l, &p7);
    }

    #[test]
    fn test_end_velocity_clamped_to_half_ramp() {
        let l = limits();
        let p1 = t1_ve(&l, 0.0, 50.0, 0.0);

        assert!(close(p1.nct, l.half_ramp_time()));
        assert!(close(p1.ve, 5.0));
        assert!(close(p1.ace, 4.0));
    }

    #[test]
    fn test_partial_intervals() {
        let l = limits();

        let p1 = t1_pid(&l, 0.0, 0.0, 1.0);
        assert!(close(p1.nct, 1.0));
        assert!(close(p1.ace, 1.6));
        assert!(close(p1.ve, 0.8));

        let capped = t3_pid(&l, 5.0, 4.0, 10.0);
        assert!(close(capped.nct, l.half_ramp_time()));
        assert!(close(capped.ace, 0.0));
        assert!(close(capped.ve, 10.0));

        let p6 = t6_pid(5.0, 2.0, 1.0);
        assert!(close(p6.ve, 3.0));
        assert!(close(p6.ncs, 4.0));

        let p4 = t4_pid(3.0, 0.5);
        assert!(close(p4.ncs, 1.5));
    }

    #[test]
    fn test_partial_period_dispatch() {
        let l = limits();
        for kind in PeriodKind::ALL {
            let p = partial_period(&l, kind, 5.0, 1.0, 0.25);
            assert_eq!(p.kind, kind);
            assert!(close(p.nct, 0.25), "{:?} {}", kind, p.nct);
            assert_boundaries(&l, &p);
        }
    }

    #[test]
    fn test_steady_at_rest() {
        let p = t4(0.0, 0.0);
        assert_eq!(p.nct, 0.0);
        assert_eq!(p.ncs, 0.0);
    }
}
