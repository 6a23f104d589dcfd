//! Ledger definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::category::Category;

/// Single entry of the agency's financial ledger: a receivable or a payable.
#[derive(Clone, Debug)]
pub struct Entry {
    /// ID of this [`Entry`].
    pub id: Id,

    /// [`Kind`] of this [`Entry`].
    pub kind: Kind,

    /// [`Category`] this [`Entry`] belongs to, if any.
    ///
    /// Uncategorized entries are reported under the
    /// [`category::Name::other()`] bucket.
    pub category_id: Option<category::Id>,

    /// Amount of this [`Entry`].
    pub amount: Money,

    /// Human-readable [`Description`] of this [`Entry`].
    pub description: Description,

    /// [`DateTime`] this [`Entry`] was issued at.
    pub issued_at: IssueDateTime,

    /// [`DateTime`] this [`Entry`] is due at, if it awaits settlement.
    pub due_at: Option<DueDateTime>,
}

/// ID of an [`Entry`].
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

define_kind! {
    #[doc = "Kind of a ledger [`Entry`]."]
    enum Kind {
        #[doc = "Incoming amount (a receivable)."]
        Revenue = 1,

        #[doc = "Outgoing amount (a payable)."]
        Expense = 2,
    }
}

/// Human-readable description of an [`Entry`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        text.trim() == text && !text.is_empty() && text.len() <= 1024
    }
}

impl std::str::FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

pub mod category {
    //! Ledger [`Category`] definitions.

    use derive_more::{AsRef, Display, From, FromStr, Into};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use super::Kind;

    /// Category grouping ledger [`Entry`]s in financial reports.
    ///
    /// [`Entry`]: super::Entry
    #[derive(Clone, Debug)]
    pub struct Category {
        /// ID of this [`Category`].
        pub id: Id,

        /// [`Name`] of this [`Category`].
        pub name: Name,

        /// [`Kind`] of the entries this [`Category`] groups.
        pub kind: Kind,

        /// Well-known [`Slug`] of this [`Category`].
        pub slug: Slug,
    }

    /// ID of a [`Category`].
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

    /// Name of a [`Category`].
    #[derive(
        AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    )]
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

        /// Returns the [`Name`] of the fallback bucket grouping entries
        /// without a [`Category`].
        #[must_use]
        pub fn other() -> Self {
            Self("other".into())
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

    /// Well-known machine identifier of a [`Category`].
    #[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
    #[as_ref(forward)]
    pub struct Slug(String);

    impl Slug {
        /// Returns the [`Slug`] of the [`Category`] collecting commission
        /// payouts.
        #[must_use]
        pub fn commission_expense() -> Self {
            Self("commission-expense".into())
        }

        /// Creates a new [`Slug`] if the given `slug` is valid.
        #[must_use]
        pub fn new(slug: impl Into<String>) -> Option<Self> {
            let slug = slug.into();
            Self::check(&slug).then_some(Self(slug))
        }

        /// Checks whether the given `slug` is a valid [`Slug`].
        fn check(slug: impl AsRef<str>) -> bool {
            let slug = slug.as_ref();
            !slug.is_empty()
                && slug.len() <= 64
                && slug
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        }
    }

    impl std::str::FromStr for Slug {
        type Err = &'static str;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Self::new(s).ok_or("invalid `Slug`")
        }
    }
}

/// [`DateTime`] when an [`Entry`] was issued.
pub type IssueDateTime = DateTimeOf<(Entry, unit::Issue)>;

/// [`DateTime`] when an [`Entry`] is due.
pub type DueDateTime = DateTimeOf<(Entry, unit::Due)>;
