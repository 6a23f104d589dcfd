//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct Percent(Decimal);

impl Percent {
    /// [`Percent`] of `0`.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(val) })
        }
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be greater than `0` and less than `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }

    /// Indicates whether this [`Percent`] is `0`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns this [`Percent`] of the provided `amount`, computed with
    /// decimal arithmetic as `amount × percent / 100`.
    #[must_use]
    pub fn of(&self, amount: Decimal) -> Decimal {
        amount * self.0 / Decimal::ONE_HUNDRED
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn validates_range() {
        assert!(Percent::new(decimal("0")).is_some());
        assert!(Percent::new(decimal("42.5")).is_some());
        assert!(Percent::new(decimal("100")).is_some());

        assert!(Percent::new(decimal("-0.01")).is_none());
        assert!(Percent::new(decimal("100.01")).is_none());
    }

    #[test]
    fn of_amount() {
        let pct = Percent::from_str("15").unwrap();
        assert_eq!(pct.of(decimal("10000")), decimal("1500"));

        let pct = Percent::from_str("2.5").unwrap();
        assert_eq!(pct.of(decimal("1000")), decimal("25.000"));

        assert_eq!(Percent::ZERO.of(decimal("12345.67")), Decimal::ZERO);
    }

    #[test]
    fn zero() {
        assert!(Percent::ZERO.is_zero());
        assert!(!Percent::from_str("0.01").unwrap().is_zero());
    }
}
