//! [`Property`] read model definition.

#[cfg(doc)]
use crate::domain::{property::Status, Property};

/// Selector of all the [`Property`]s in the [`Status::Available`] status,
/// in their storage order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Available;
