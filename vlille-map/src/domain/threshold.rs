//! Fuzzy-match tolerance.

use std::fmt;

use super::DomainError;

/// Tolerance for fuzzy name matching, in [0, 1].
///
/// `0` accepts only exact matches, `1` accepts anything. A match is kept
/// when its normalized score is less than or equal to the threshold.
///
/// # Examples
///
/// ```
/// use vlille_map::domain::Threshold;
///
/// let t = Threshold::new(0.3).unwrap();
/// assert_eq!(t.value(), 0.3);
///
/// assert!(Threshold::new(1.2).is_err());
/// assert!(Threshold::new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Exact matches only.
    pub const EXACT: Threshold = Threshold(0.0);

    /// Matches anything.
    pub const ANY: Threshold = Threshold(1.0);

    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(DomainError::InvalidThreshold(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether a normalized score falls within this threshold.
    pub fn accepts(&self, score: f64) -> bool {
        score <= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold(0.3)
    }
}

impl fmt::Debug for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Threshold({})", self.0)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_inclusive() {
        assert_eq!(Threshold::new(0.0).unwrap(), Threshold::EXACT);
        assert_eq!(Threshold::new(1.0).unwrap(), Threshold::ANY);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Threshold::new(-0.1),
            Err(DomainError::InvalidThreshold(-0.1))
        );
        assert!(Threshold::new(1.0001).is_err());
        assert!(Threshold::new(f64::NAN).is_err());
        assert!(Threshold::new(f64::INFINITY).is_err());
    }

    #[test]
    fn accepts_is_inclusive() {
        let t = Threshold::new(0.25).unwrap();
        assert!(t.accepts(0.0));
        assert!(t.accepts(0.25));
        assert!(!t.accepts(0.2501));
    }

    #[test]
    fn exact_accepts_only_zero() {
        assert!(Threshold::EXACT.accepts(0.0));
        assert!(!Threshold::EXACT.accepts(0.01));
    }

    #[test]
    fn default_is_point_three() {
        assert_eq!(Threshold::default().value(), 0.3);
    }
}
