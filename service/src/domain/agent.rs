//! Agent-related definitions.

use common::define_kind;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID of an agency employee receiving commission payouts.
///
/// The employee records themselves are owned by the personnel subsystem.
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
    #[doc = "Role of an agent in a commission payout."]
    enum Role {
        #[doc = "Agent who closed the deal."]
        SellingAgent = 1,

        #[doc = "Agent who sourced the property or the client."]
        SourcingAgent = 2,

        #[doc = "Manager supervising the deal."]
        Manager = 3,
    }
}

impl Role {
    /// Returns a human-readable label of this [`Role`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SellingAgent => "selling agent",
            Self::SourcingAgent => "sourcing agent",
            Self::Manager => "manager",
        }
    }
}
