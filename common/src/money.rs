//! [`Money`]-related definitions.

use std::{fmt, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new zero [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Indicates whether this [`Money`] amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl ops::Add for Money {
    type Output = Self;

    /// Adds two [`Money`] amounts.
    ///
    /// # Panics
    ///
    /// If the amounts are in different [`Currency`]s.
    fn add(self, rhs: Self) -> Self::Output {
        assert_eq!(self.currency, rhs.currency, "`Currency` mismatch");
        Self {
            amount: self.amount + rhs.amount,
            currency: self.currency,
        }
    }
}

impl ops::Sub for Money {
    type Output = Self;

    /// Subtracts one [`Money`] amount from another.
    ///
    /// # Panics
    ///
    /// If the amounts are in different [`Currency`]s.
    fn sub(self, rhs: Self) -> Self::Output {
        assert_eq!(self.currency, rhs.currency, "`Currency` mismatch");
        Self {
            amount: self.amount - rhs.amount,
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Brazilian Real."]
        Brl = 1,

        #[doc = "US Dollar."]
        Usd = 2,

        #[doc = "Euro."]
        Eur = 3,
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn brl(s: &str) -> Money {
        Money {
            amount: decimal(s),
            currency: Currency::Brl,
        }
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("450000.50BRL").unwrap(),
            brl("450000.50"),
        );

        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );

        assert_eq!(
            Money::from_str("123.45EUR").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Eur,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Br").is_err());
        assert!(Money::from_str("123.45Brazilian").is_err());

        assert!(Money::from_str("123.00BRL").is_ok());
        assert!(Money::from_str("123.0BRL").is_ok());
        assert!(Money::from_str("123BRL").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(brl("123.45").to_string(), "123.45BRL");
        assert_eq!(
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123.45USD",
        );

        assert_eq!(brl("123.00").to_string(), "123BRL");
        assert_eq!(brl("123.0").to_string(), "123BRL");
        assert_eq!(brl("123").to_string(), "123BRL");
    }

    #[test]
    fn arithmetic() {
        assert_eq!(brl("100.50") + brl("0.50"), brl("101.00"));
        assert_eq!(brl("100.50") - brl("0.50"), brl("100.00"));

        assert!(brl("0.01").is_positive());
        assert!(!brl("0").is_positive());
        assert!(!brl("-10").is_positive());
        assert!(!Money::zero(Currency::Brl).is_positive());
    }
}
