//! Compatibility matching of [`Property`]s against a [`SearchProfile`].

use std::cmp::Ordering;

use derive_more::Display;
use rust_decimal::Decimal;

use super::{client::SearchProfile, Property};

/// Weight of the desired-kind criterion.
const KIND_WEIGHT: u32 = 30;

/// Weight of the neighborhood criterion.
const NEIGHBORHOOD_WEIGHT: u32 = 25;

/// Weight of the budget criterion.
const BUDGET_WEIGHT: u32 = 25;

/// Weight of the minimum-bedrooms criterion.
const BEDROOMS_WEIGHT: u32 = 20;

/// Compatibility score of a [`Property`] for a [`SearchProfile`], as a
/// percentage in `[0, 100]`.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub struct Score(Decimal);

impl Score {
    /// [`Score`] of a [`Property`] matching no stated criteria.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// [`Score`] of a [`Property`] matching every stated criterion.
    pub const MAX: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a new [`Score`] by checking the provided value is in
    /// `[0, 100]`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (val >= Decimal::ZERO && val <= Decimal::ONE_HUNDRED)
            .then_some(Self(val))
    }

    /// Returns the inner percentage value of this [`Score`].
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Evaluates the compatibility [`Score`] of the provided [`Property`] for
/// the provided [`SearchProfile`].
///
/// Each stated profile criterion contributes its weight to the possible
/// total, and the same weight to the achieved total when the [`Property`]
/// satisfies it. The [`Score`] is the achieved share of the possible total,
/// so it is always relative to the criteria the profile actually states.
/// A profile stating no criteria yields [`Score::ZERO`].
#[must_use]
pub fn evaluate(profile: &SearchProfile, property: &Property) -> Score {
    let mut achieved = 0;
    let mut possible = 0;

    if let Some(kind) = profile.desired_kind {
        possible += KIND_WEIGHT;
        if property.kind == kind {
            achieved += KIND_WEIGHT;
        }
    }

    if !profile.neighborhoods.is_empty() {
        possible += NEIGHBORHOOD_WEIGHT;
        if profile.neighborhoods.contains(&property.neighborhood) {
            achieved += NEIGHBORHOOD_WEIGHT;
        }
    }

    if let Some(ceiling) = profile.max_budget {
        possible += BUDGET_WEIGHT;
        // A property without a listed price cannot exceed the ceiling.
        let fits = property
            .asking_price()
            .is_none_or(|price| price.amount <= ceiling.amount);
        if fits {
            achieved += BUDGET_WEIGHT;
        }
    }

    if let Some(min) = profile.min_bedrooms {
        possible += BEDROOMS_WEIGHT;
        if property.bedrooms >= min {
            achieved += BEDROOMS_WEIGHT;
        }
    }

    if possible == 0 {
        Score::ZERO
    } else {
        // In `[0, 100]`, since `achieved <= possible`.
        Score(
            Decimal::from(achieved) / Decimal::from(possible)
                * Decimal::ONE_HUNDRED,
        )
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{money::Currency, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{
        client::SearchProfile,
        property::{self, Neighborhood},
        Property,
    };

    use super::{evaluate, Score};

    fn brl(s: &str) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency: Currency::Brl,
        }
    }

    fn neighborhood(name: &str) -> Neighborhood {
        Neighborhood::new(name).unwrap()
    }

    fn property(
        kind: property::Kind,
        hood: &str,
        sale_price: Option<Money>,
        bedrooms: property::Bedrooms,
    ) -> Property {
        Property::new(
            property::Id::new(),
            kind,
            neighborhood(hood),
            sale_price,
            sale_price.is_none().then(|| brl("2500")),
            bedrooms,
            property::Status::Available,
            DateTime::now().coerce(),
        )
        .unwrap()
    }

    fn full_profile() -> SearchProfile {
        SearchProfile {
            desired_kind: Some(property::Kind::Apartment),
            neighborhoods: vec![neighborhood("Centro")],
            max_budget: Some(brl("500000")),
            min_bedrooms: Some(2),
        }
    }

    #[test]
    fn full_match_scores_one_hundred() {
        let candidate = property(
            property::Kind::Apartment,
            "Centro",
            Some(brl("450000")),
            3,
        );

        assert_eq!(evaluate(&full_profile(), &candidate), Score::MAX);
    }

    #[test]
    fn kind_mismatch_scores_seventy() {
        let candidate =
            property(property::Kind::House, "Centro", Some(brl("450000")), 3);

        assert_eq!(
            evaluate(&full_profile(), &candidate),
            Score::new(Decimal::from(70)).unwrap(),
        );
    }

    #[test]
    fn empty_profile_scores_zero() {
        let candidate = property(
            property::Kind::Apartment,
            "Centro",
            Some(brl("450000")),
            3,
        );

        assert_eq!(
            evaluate(&SearchProfile::default(), &candidate),
            Score::ZERO,
        );
    }

    #[test]
    fn relative_to_stated_criteria_only() {
        // Only the kind criterion is stated, so matching it alone is a
        // full score.
        let profile = SearchProfile {
            desired_kind: Some(property::Kind::Apartment),
            ..SearchProfile::default()
        };
        let candidate = property(
            property::Kind::Apartment,
            "Jardins",
            Some(brl("9000000")),
            1,
        );

        assert_eq!(evaluate(&profile, &candidate), Score::MAX);
    }

    #[test]
    fn budget_uses_sale_price_before_rent_price() {
        let profile = SearchProfile {
            max_budget: Some(brl("3000")),
            ..SearchProfile::default()
        };

        // Rent-only property is judged by its rent price.
        let rented =
            property(property::Kind::Apartment, "Centro", None, 2);
        assert_eq!(evaluate(&profile, &rented), Score::MAX);

        // A sale price above the ceiling misses, whatever the rent price.
        let mut on_sale = rented.clone();
        on_sale.sale_price = Some(brl("400000"));
        assert_eq!(evaluate(&profile, &on_sale), Score::ZERO);
    }

    #[test]
    fn scores_are_bounded_and_deterministic() {
        let profiles = [
            SearchProfile::default(),
            full_profile(),
            SearchProfile {
                min_bedrooms: Some(4),
                ..SearchProfile::default()
            },
        ];
        let candidates = [
            property(property::Kind::Land, "Moema", Some(brl("1")), 0),
            property(property::Kind::Apartment, "Centro", None, 5),
        ];

        for profile in &profiles {
            for candidate in &candidates {
                let score = evaluate(profile, candidate);
                assert!(score >= Score::ZERO && score <= Score::MAX);
                assert_eq!(score, evaluate(profile, candidate));
            }
        }
    }

    #[test]
    fn matching_more_criteria_never_decreases_score() {
        let candidate =
            property(property::Kind::House, "Centro", Some(brl("450000")), 3);

        let mut profile = SearchProfile {
            desired_kind: Some(property::Kind::Apartment),
            neighborhoods: vec![neighborhood("Moema")],
            max_budget: Some(brl("500000")),
            min_bedrooms: Some(2),
        };
        let before = evaluate(&profile, &candidate);

        // The candidate's neighborhood becomes one of the desired ones.
        profile.neighborhoods.push(neighborhood("Centro"));
        let after = evaluate(&profile, &candidate);

        assert!(after >= before);
    }
}
