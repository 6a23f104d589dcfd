//! [`Property`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Property in the agency's inventory, offered for sale, for rent, or both.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Kind`] of this [`Property`].
    pub kind: Kind,

    /// [`Neighborhood`] this [`Property`] is located in.
    pub neighborhood: Neighborhood,

    /// Sale price of this [`Property`], if offered for sale.
    pub sale_price: Option<Money>,

    /// Monthly rent price of this [`Property`], if offered for rent.
    pub rent_price: Option<Money>,

    /// Number of bedrooms in this [`Property`].
    pub bedrooms: Bedrooms,

    /// Availability [`Status`] of this [`Property`].
    pub status: Status,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,
}

impl Property {
    /// Creates a new [`Property`] if at least one of the provided prices is
    /// present.
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    #[must_use]
    pub fn new(
        id: Id,
        kind: Kind,
        neighborhood: Neighborhood,
        sale_price: Option<Money>,
        rent_price: Option<Money>,
        bedrooms: Bedrooms,
        status: Status,
        created_at: CreationDateTime,
    ) -> Option<Self> {
        (sale_price.is_some() || rent_price.is_some()).then_some(Self {
            id,
            kind,
            neighborhood,
            sale_price,
            rent_price,
            bedrooms,
            status,
            created_at,
        })
    }

    /// Returns the asking price of this [`Property`]: the sale price when
    /// present, otherwise the rent price.
    #[must_use]
    pub fn asking_price(&self) -> Option<Money> {
        self.sale_price.or(self.rent_price)
    }
}

/// ID of a [`Property`].
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

/// Neighborhood a [`Property`] is located in.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Neighborhood(String);

impl Neighborhood {
    /// Creates a new [`Neighborhood`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Neighborhood`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Neighborhood`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl std::str::FromStr for Neighborhood {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Neighborhood`")
    }
}

/// Number of bedrooms in a [`Property`].
pub type Bedrooms = u16;

define_kind! {
    #[doc = "Kind of a [`Property`]."]
    enum Kind {
        #[doc = "An apartment in a residential building."]
        Apartment = 1,

        #[doc = "A standalone house."]
        House = 2,

        #[doc = "A commercial unit."]
        Commercial = 3,

        #[doc = "A plot of land."]
        Land = 4,
    }
}

define_kind! {
    #[doc = "Availability status of a [`Property`]."]
    enum Status {
        #[doc = "Available for sale or rent."]
        Available = 1,

        #[doc = "Reserved by a client."]
        Reserved = 2,

        #[doc = "Already sold."]
        Sold = 3,

        #[doc = "Already rented out."]
        Rented = 4,
    }
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;
