use crate::error::{Error, Result};
use num_traits::One;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A closed interval `[low, high]`.
///
/// Construction through [`Interval::new`] does not check that `low <= high`.
/// An inverted interval contains no point, but it still takes part in
/// [`Interval::overlaps`] as written: `[9, 1]` overlaps `[0, 100]`, since
/// `9 <= 100` and `0 <= 1`. Use [`Interval::try_new`] to reject those up front.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<K> {
    pub low: K,
    pub high: K,
}

impl<K> Interval<K> {
    pub fn new(low: K, high: K) -> Interval<K> {
        Interval { low, high }
    }

    /// The degenerate interval `[p, p]`.
    pub fn point(p: K) -> Interval<K>
    where
        K: Clone,
    {
        Interval {
            low: p.clone(),
            high: p,
        }
    }
}

impl<K: PartialOrd> Interval<K> {
    /// Same as [`Interval::new`], but fails with [`Error::InvalidInterval`] when `low > high`.
    ///
    /// ```
    /// use sweep_interval_tree::Interval;
    ///
    /// assert!(Interval::try_new(1, 5).is_ok());
    /// assert!(Interval::try_new(5, 1).is_err());
    /// ```
    pub fn try_new(low: K, high: K) -> Result<Interval<K>>
    where
        K: fmt::Debug,
    {
        if low > high {
            return Err(Error::invalid_interval(&low, &high));
        }
        Ok(Interval { low, high })
    }

    pub fn is_well_formed(&self) -> bool {
        self.low <= self.high
    }

    /// Closed-range overlap: `self.low <= other.high && other.low <= self.high`.
    ///
    /// ```
    /// use sweep_interval_tree::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert!(a.overlaps(&Interval::new(5, 9)));
    /// assert!(!a.overlaps(&Interval::new(6, 9)));
    /// ```
    pub fn overlaps(&self, other: &Interval<K>) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    pub fn contains(&self, point: &K) -> bool {
        self.low <= *point && *point <= self.high
    }
}

impl<K> Interval<K>
where
    K: Clone + Add<Output = K> + One,
{
    /// Converts `[low, high]` into the half-open pair `(low, high + 1)` taken
    /// by the sweep-line functions. Only meaningful for integer coordinates.
    ///
    /// ```
    /// use sweep_interval_tree::{sweep_line, Interval};
    ///
    /// let closed = [Interval::new(1, 3), Interval::new(4, 6)];
    /// let half_open: Vec<_> = closed.iter().map(Interval::to_half_open).collect();
    /// assert_eq!(half_open, vec![(1, 4), (4, 7)]);
    /// assert_eq!(sweep_line::total_coverage(&half_open), 6);
    /// ```
    pub fn to_half_open(&self) -> (K, K) {
        (self.low.clone(), self.high.clone() + K::one())
    }
}

/// Free-standing form of [`Interval::overlaps`].
pub fn overlaps<K: PartialOrd>(a: &Interval<K>, b: &Interval<K>) -> bool {
    a.overlaps(b)
}

impl<K> From<(K, K)> for Interval<K> {
    fn from((low, high): (K, K)) -> Self {
        Interval { low, high }
    }
}

impl<K> From<Interval<K>> for (K, K) {
    fn from(interval: Interval<K>) -> Self {
        (interval.low, interval.high)
    }
}

impl<K> fmt::Display for Interval<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}
