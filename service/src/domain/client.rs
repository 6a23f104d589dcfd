//! [`Client`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::property;

/// Client (a lead or a buyer) of the agency.
#[derive(Clone, Debug)]
pub struct Client {
    /// ID of this [`Client`].
    pub id: Id,

    /// [`Name`] of this [`Client`].
    pub name: Name,

    /// [`SearchProfile`] of this [`Client`], if one was ever stored.
    pub search_profile: Option<SearchProfile>,

    /// [`DateTime`] when this [`Client`] was created.
    pub created_at: CreationDateTime,
}

/// Stored search preferences of a [`Client`].
///
/// Every field is optional: the compatibility score of a [`Property`] is
/// computed relatively to the criteria this profile actually states.
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchProfile {
    /// Desired [`property::Kind`], if any.
    pub desired_kind: Option<property::Kind>,

    /// [`property::Neighborhood`]s the [`Client`] is interested in.
    pub neighborhoods: Vec<property::Neighborhood>,

    /// Maximum budget of the [`Client`], if any.
    pub max_budget: Option<Money>,

    /// Minimum number of bedrooms the [`Client`] requires, if any.
    pub min_bedrooms: Option<property::Bedrooms>,
}

/// ID of a [`Client`].
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

/// Name of a [`Client`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl std::str::FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// [`DateTime`] when a [`Client`] was created.
pub type CreationDateTime = DateTimeOf<(Client, unit::Creation)>;

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use super::{Id, Name};

    #[test]
    fn name_validates_and_converts() {
        let name: Name = "Maria Souza".parse().unwrap();
        let raw: &str = name.as_ref();
        assert_eq!(raw, "Maria Souza");

        assert!(Name::new("").is_none());
        assert!(Name::new(" padded ").is_none());
        assert!("".parse::<Name>().is_err());
    }

    #[test]
    fn id_converts_to_and_from_uuid() {
        let id = Id::new();
        let uuid = Uuid::from(id);

        assert_eq!(Id::from(uuid), id);
        assert_eq!(uuid.to_string().parse::<Id>().unwrap(), id);
    }
}
