//! [`Query`] definition.

pub mod matches;
pub mod report;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;
