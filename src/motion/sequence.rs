//! Owned, fixed-capacity period sequences.

use core::ops::Deref;

use libm::fabs;

use crate::error::PlanError;

use super::period::Period;

/// Maximum number of periods in a planned curve.
///
/// The longest plan is a five-period ramp, a cruise period and another
/// five-period ramp.
pub const MAX_PERIODS: usize = 16;

/// Ordered, temporally contiguous periods describing one planned move.
///
/// Storage is inline, so building or dropping a sequence never touches an
/// allocator. Sub-sequences are moved into their parent with [`append`].
///
/// [`append`]: PeriodSequence::append
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSequence {
    periods: heapless::Vec<Period, MAX_PERIODS>,
}

impl PeriodSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            periods: heapless::Vec::new(),
        }
    }

    /// Create a sequence from a slice of periods.
    pub fn from_slice(periods: &[Period]) -> Result<Self, PlanError> {
        let mut seq = Self::new();
        seq.periods
            .extend_from_slice(periods)
            .map_err(|_| PlanError::SequenceFull)?;
        Ok(seq)
    }

    /// Append one period.
    pub fn push(&mut self, period: Period) -> Result<(), PlanError> {
        self.periods.push(period).map_err(|_| PlanError::SequenceFull)
    }

    /// Move all periods of `other` to the end of this sequence.
    pub fn append(&mut self, other: PeriodSequence) -> Result<(), PlanError> {
        self.periods
            .extend_from_slice(&other.periods)
            .map_err(|_| PlanError::SequenceFull)
    }

    /// Periods as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Period] {
        &self.periods
    }

    /// Total duration.
    pub fn total_time(&self) -> f64 {
        self.periods.iter().map(|p| p.nct).sum()
    }

    /// Total displacement.
    pub fn total_displacement(&self) -> f64 {
        self.periods.iter().map(|p| p.ncs).sum()
    }

    /// Velocity at the end of the last period.
    pub fn end_velocity(&self) -> Option<f64> {
        self.periods.last().map(|p| p.ve)
    }

    /// Lowest velocity reached anywhere in the sequence.
    ///
    /// Every period is monotonic in velocity, so the minimum sits at the end
    /// of a decelerating period or at the start of any other.
    pub fn lowest_velocity(&self) -> Option<f64> {
        self.periods
            .iter()
            .map(|p| if p.kind.is_decelerating() { p.ve } else { p.vo })
            .reduce(libm::fmin)
    }

    /// Check that each period starts at the velocity the previous one ended at.
    pub fn is_continuous(&self, tolerance: f64) -> bool {
        self.periods.windows(2).all(|w| {
            let scale = libm::fmax(1.0, fabs(w[0].ve));
            fabs(w[0].ve - w[1].vo) <= tolerance * scale
        })
    }
}

impl Deref for PeriodSequence {
    type Target = [Period];

    fn deref(&self) -> &Self::Target {
        &self.periods
    }
}

impl<'a> IntoIterator for &'a PeriodSequence {
    type Item = &'a Period;
    type IntoIter = core::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

/// Total duration of a sequence.
#[inline]
pub fn to_ttot_pvec(pvec: &PeriodSequence) -> f64 {
    pvec.total_time()
}

/// Total displacement of a sequence.
#[inline]
pub fn to_stot_pvec(pvec: &PeriodSequence) -> f64 {
    pvec.total_displacement()
}
