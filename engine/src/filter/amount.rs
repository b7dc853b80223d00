use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;

/// A filter parameter.
///
/// Equality and hashing use the IEEE bit pattern so filters holding an
/// `Amount` can be `Eq + Hash`. NaN is stored as 0 and -0.0 as 0.0, which
/// keeps bitwise equality in line with numeric equality.
#[derive(Debug, Clone, Copy, Default)]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value + 0.0)
    }

    pub fn clamped(value: f64, range: &RangeInclusive<f64>) -> Self {
        Self::new(value).clamp_to(range)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    fn clamp_to(self, range: &RangeInclusive<f64>) -> Self {
        Self::new(self.0.clamp(*range.start(), *range.end()))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Amount {}

impl Hash for Amount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_equals_zero() {
        assert_eq!(Amount::new(-0.0), Amount::new(0.0));
        assert!(Amount::new(-0.0).is_zero());
    }

    #[test]
    fn nan_becomes_zero() {
        assert_eq!(Amount::new(f64::NAN), Amount::new(0.0));
    }

    #[test]
    fn clamps_to_range() {
        let range = -1.0..=1.0;
        assert_eq!(Amount::clamped(5.0, &range).get(), 1.0);
        assert_eq!(Amount::clamped(-5.0, &range).get(), -1.0);
        assert_eq!(Amount::clamped(0.25, &range).get(), 0.25);
    }
}
