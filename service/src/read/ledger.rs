//! Ledger read model definitions.

use derive_more::Deref;

use crate::domain::ledger;

/// Ledger [`ledger::Entry`]s issued within some period, in their storage
/// order.
#[derive(Clone, Debug, Default, Deref)]
pub struct PeriodEntries(pub Vec<ledger::Entry>);

impl PeriodEntries {
    /// Consumes this [`PeriodEntries`] and returns the inner
    /// [`ledger::Entry`]s.
    #[must_use]
    pub fn into_inner(self) -> Vec<ledger::Entry> {
        self.0
    }
}
