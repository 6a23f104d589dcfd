//! [`Commission`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money, Percent};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::agent;

/// Commission computed for a closed [`Deal`].
///
/// Immutable once computed: recomputing a [`Commission`] for the same
/// [`Deal`] is a conflict.
#[derive(Clone, Debug)]
pub struct Commission {
    /// ID of this [`Commission`].
    pub id: Id,

    /// [`Deal`] this [`Commission`] was computed for.
    pub deal: Deal,

    /// Total transaction value this [`Commission`] splits.
    pub total: Money,

    /// Percentage [`Shares`] this [`Commission`] was split by.
    pub shares: Shares,

    /// Monetary [`Breakdown`] of this [`Commission`].
    pub breakdown: Breakdown,

    /// [`Recipients`] of this [`Commission`].
    pub recipients: Recipients,

    /// [`DateTime`] when this [`Commission`] was computed.
    pub computed_at: ComputationDateTime,
}

/// ID of a [`Commission`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Closed transaction a [`Commission`] is computed for.
///
/// A [`Commission`] always references exactly one sale or rent record, so
/// a request with neither is unrepresentable.
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, PartialEq)]
pub enum Deal {
    /// Sale transaction.
    #[display("sale {_0}")]
    Sale(sale::Id),

    /// Rent transaction.
    #[display("rent {_0}")]
    Rent(rent::Id),
}

pub mod sale {
    //! Sale transaction references.
    //!
    //! The records themselves are owned by the contracts subsystem.

    use derive_more::{Display, From, FromStr, Into};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    /// ID of a sale transaction.
    #[derive(
        Clone,
        Copy,
        Debug,
        Default,
        Deserialize,
        Display,
        Eq,
        From,
        FromStr,
        Hash,
        Into,
        PartialEq,
        Serialize,
    )]
    pub struct Id(Uuid);

    impl Id {
        /// Creates a new random [`Id`].
        #[must_use]
        pub fn new() -> Self {
            Self(Uuid::new_v4())
        }
    }
}

pub mod rent {
    //! Rent transaction references.
    //!
    //! The records themselves are owned by the contracts subsystem.

    use derive_more::{Display, From, FromStr, Into};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    /// ID of a rent transaction.
    #[derive(
        Clone,
        Copy,
        Debug,
        Default,
        Deserialize,
        Display,
        Eq,
        From,
        FromStr,
        Hash,
        Into,
        PartialEq,
        Serialize,
    )]
    pub struct Id(Uuid);

    impl Id {
        /// Creates a new random [`Id`].
        #[must_use]
        pub fn new() -> Self {
            Self(Uuid::new_v4())
        }
    }
}

/// Percentage shares a [`Commission`] is split by.
///
/// The shares are not required to sum up to 100: an agency may deliberately
/// withhold a slice of the total.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Shares {
    /// Share kept by the agency itself.
    pub agency: Percent,

    /// Share of the selling agent.
    pub selling_agent: Percent,

    /// Share of the sourcing agent.
    pub sourcing_agent: Percent,

    /// Share of the manager.
    pub manager: Percent,
}

impl Shares {
    /// Splits the provided `total` into a monetary [`Breakdown`] by these
    /// [`Shares`], with decimal-exact arithmetic.
    #[must_use]
    pub fn split(&self, total: Money) -> Breakdown {
        let part = |share: Percent| Money {
            amount: share.of(total.amount),
            currency: total.currency,
        };

        Breakdown {
            agency: part(self.agency),
            selling_agent: part(self.selling_agent),
            sourcing_agent: part(self.sourcing_agent),
            manager: part(self.manager),
        }
    }
}

/// Monetary breakdown of a [`Commission`], one amount per [`Shares`] slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Breakdown {
    /// Amount kept by the agency itself.
    pub agency: Money,

    /// Amount of the selling agent.
    pub selling_agent: Money,

    /// Amount of the sourcing agent.
    pub sourcing_agent: Money,

    /// Amount of the manager.
    pub manager: Money,
}

/// Recipients of a [`Commission`].
///
/// Only the present recipients with a non-zero [`Breakdown`] amount produce
/// payables.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Recipients {
    /// [`agent::Id`] of the selling agent, if any.
    pub selling_agent: Option<agent::Id>,

    /// [`agent::Id`] of the sourcing agent, if any.
    pub sourcing_agent: Option<agent::Id>,

    /// [`agent::Id`] of the manager, if any.
    pub manager: Option<agent::Id>,
}

/// [`DateTime`] when a [`Commission`] was computed.
pub type ComputationDateTime = DateTimeOf<(Commission, unit::Computation)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{money::Currency, Money, Percent};

    use super::Shares;

    fn brl(s: &str) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency: Currency::Brl,
        }
    }

    fn shares(agency: &str, selling: &str, sourcing: &str, mgr: &str) -> Shares {
        Shares {
            agency: Percent::from_str(agency).unwrap(),
            selling_agent: Percent::from_str(selling).unwrap(),
            sourcing_agent: Percent::from_str(sourcing).unwrap(),
            manager: Percent::from_str(mgr).unwrap(),
        }
    }

    #[test]
    fn splits_by_shares() {
        let breakdown = shares("40", "40", "15", "5").split(brl("10000"));

        assert_eq!(breakdown.agency, brl("4000"));
        assert_eq!(breakdown.selling_agent, brl("4000"));
        assert_eq!(breakdown.sourcing_agent, brl("1500"));
        assert_eq!(breakdown.manager, brl("500"));
    }

    #[test]
    fn split_is_additive() {
        let total = brl("7777.77");
        let breakdown = shares("50", "30", "12.5", "7.5").split(total);

        let sum = breakdown.agency
            + breakdown.selling_agent
            + breakdown.sourcing_agent
            + breakdown.manager;
        assert_eq!(sum, total);
    }

    #[test]
    fn split_allows_withheld_slice() {
        // Shares summing below 100 leave the remainder undistributed.
        let breakdown = shares("40", "30", "0", "0").split(brl("1000"));

        assert_eq!(breakdown.agency, brl("400"));
        assert_eq!(breakdown.selling_agent, brl("300"));
        assert_eq!(breakdown.sourcing_agent, brl("0"));
        assert_eq!(breakdown.manager, brl("0"));
    }
}
