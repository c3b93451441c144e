//! Period and sample value types.

/// Kind of an S-curve period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriodKind {
    /// Acceleration rising toward `+as` (concave up).
    T1,
    /// Constant acceleration.
    T2,
    /// Acceleration falling from `+as` toward cruise (concave down).
    T3,
    /// Constant velocity.
    T4,
    /// Deceleration building toward `-as` (concave down).
    T5,
    /// Constant deceleration.
    T6,
    /// Deceleration releasing from `-as` toward cruise (concave up).
    T7,
}

impl PeriodKind {
    /// All period kinds in curve order.
    pub const ALL: [PeriodKind; 7] = [
        PeriodKind::T1,
        PeriodKind::T2,
        PeriodKind::T3,
        PeriodKind::T4,
        PeriodKind::T5,
        PeriodKind::T6,
        PeriodKind::T7,
    ];

    /// Whether the period lowers velocity.
    #[inline]
    pub fn is_decelerating(self) -> bool {
        matches!(self, PeriodKind::T5 | PeriodKind::T6 | PeriodKind::T7)
    }
}

/// One analytically defined phase of an S-curve.
///
/// `ncs` and `nct` are the displacement and duration actually traversed and
/// are never negative. Accelerations are signed: positive for T1..T3, zero
/// for T4, negative for T5..T7.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Period {
    /// Period kind.
    pub kind: PeriodKind,
    /// Start velocity.
    pub vo: f64,
    /// End velocity.
    pub ve: f64,
    /// Acceleration at the start.
    pub acs: f64,
    /// Acceleration at the end.
    pub ace: f64,
    /// Net displacement.
    pub ncs: f64,
    /// Net duration.
    pub nct: f64,
}

/// Velocity, displacement and acceleration at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vsa {
    /// Velocity.
    pub v: f64,
    /// Displacement.
    pub s: f64,
    /// Acceleration.
    pub a: f64,
}
