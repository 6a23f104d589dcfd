//! [`Command`] definition.

pub mod compute_commission;
pub mod update_search_profile;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    compute_commission::ComputeCommission,
    update_search_profile::UpdateSearchProfile,
};
