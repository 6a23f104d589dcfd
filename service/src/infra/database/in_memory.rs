//! In-memory [`Database`] implementation.

use std::{
    collections::HashMap,
    ops::RangeInclusive,
    sync::{Arc, Mutex as SyncMutex},
};

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Update};
use derive_more::{Display, Error as StdError};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracerr::Traced;

use crate::{
    domain::{
        client, commission::Deal, ledger, Client, Commission, Property,
    },
    infra::database,
    read,
};

#[cfg(doc)]
use crate::infra::Database;

/// In-memory [`Database`] backend.
///
/// Not durable: intended for tests and ephemeral embeddings. A relational
/// backend implementing the same operations replaces it in production.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    /// Shared [`State`] of this backend.
    state: Arc<Mutex<State>>,
}

/// Tables of an [`InMemory`] backend.
///
/// All the tables except `clients` are [`Vec`]-backed and preserve their
/// insertion order, which is the storage order selections are returned in.
#[derive(Clone, Debug, Default)]
struct State {
    /// [`Client`]s by their IDs.
    clients: HashMap<client::Id, Client>,

    /// [`Property`] inventory.
    properties: Vec<Property>,

    /// Ledger [`ledger::Category`]s.
    categories: Vec<ledger::Category>,

    /// Ledger [`ledger::Entry`]s.
    entries: Vec<ledger::Entry>,

    /// Computed [`Commission`]s.
    commissions: Vec<Commission>,
}

/// Error of an [`InMemory`] operation.
///
/// No [`InMemory`] operation can actually fail, so no values of this type
/// exist.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {}

impl InMemory {
    /// Runs the provided function over the locked [`State`].
    async fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut state)
    }
}

impl database::Database<Transact> for InMemory {
    type Ok = Tx;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Tx {
            inner: SyncMutex::new(Inner { guard, staged }),
        })
    }
}

impl database::Database<Select<By<Option<Client>, client::Id>>> for InMemory {
    type Ok = Option<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Client>, client::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|state| Ok(state.clients.get(&id).cloned())).await
    }
}

impl database::Database<Select<By<Vec<Property>, read::property::Available>>>
    for InMemory
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Property>, read::property::Available>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|state| Ok(select_available(state))).await
    }
}

impl
    database::Database<
        Select<
            By<
                read::ledger::PeriodEntries,
                RangeInclusive<ledger::IssueDateTime>,
            >,
        >,
    > for InMemory
{
    type Ok = read::ledger::PeriodEntries;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::ledger::PeriodEntries,
                RangeInclusive<ledger::IssueDateTime>,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let range = by.into_inner();
        self.with(|state| Ok(select_period_entries(state, &range)))
            .await
    }
}

impl
    database::Database<
        Select<
            By<
                HashMap<ledger::category::Id, ledger::Category>,
                Vec<ledger::category::Id>,
            >,
        >,
    > for InMemory
{
    type Ok = HashMap<ledger::category::Id, ledger::Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                HashMap<ledger::category::Id, ledger::Category>,
                Vec<ledger::category::Id>,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        self.with(|state| {
            Ok(state
                .categories
                .iter()
                .filter(|c| ids.contains(&c.id))
                .map(|c| (c.id, c.clone()))
                .collect())
        })
        .await
    }
}

impl database::Database<Select<By<Option<Commission>, Deal>>> for InMemory {
    type Ok = Option<Commission>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Commission>, Deal>>,
    ) -> Result<Self::Ok, Self::Err> {
        let deal = by.into_inner();
        self.with(|state| Ok(select_commission(state, deal))).await
    }
}

impl database::Database<Insert<Client>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(client): Insert<Client>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|state| {
            drop(state.clients.insert(client.id, client));
            Ok(())
        })
        .await
    }
}

impl database::Database<Insert<Property>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|state| {
            state.properties.push(property);
            Ok(())
        })
        .await
    }
}

impl database::Database<Insert<ledger::Category>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(category): Insert<ledger::Category>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|state| {
            state.categories.push(category);
            Ok(())
        })
        .await
    }
}

impl database::Database<Insert<ledger::Entry>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<ledger::Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|state| {
            state.entries.push(entry);
            Ok(())
        })
        .await
    }
}

/// Transactional client of an [`InMemory`] backend.
///
/// Holds the store-wide lock for its whole lifetime, so concurrent
/// transactions are serialized. Changes are staged on a copy of the
/// [`State`] and become visible on [`Commit`] only; a dropped [`Tx`]
/// discards them.
#[derive(Debug)]
pub struct Tx {
    /// Inner representation of this client.
    inner: SyncMutex<Inner>,
}

/// Inner representation of a [`Tx`] client.
#[derive(Debug)]
struct Inner {
    /// Held lock over the backend's [`State`].
    guard: OwnedMutexGuard<State>,

    /// Staged copy of the [`State`] the operations apply to.
    staged: State,
}

impl Tx {
    /// Runs the provided function over the staged [`State`].
    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.inner.lock().expect("no panics while locked");
        f(&mut inner)
    }
}

impl database::Database<Commit> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.with(|inner| {
            *inner.guard = inner.staged.clone();
            Ok(())
        })
    }
}

impl database::Database<Lock<By<Commission, Deal>>> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Commission, Deal>>,
    ) -> Result<Self::Ok, Self::Err> {
        // The store-wide lock held by this `Tx` already serializes.
        Ok(())
    }
}

impl database::Database<Lock<By<Client, client::Id>>> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Client, client::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // The store-wide lock held by this `Tx` already serializes.
        Ok(())
    }
}

impl database::Database<Select<By<Option<Commission>, Deal>>> for Tx {
    type Ok = Option<Commission>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Commission>, Deal>>,
    ) -> Result<Self::Ok, Self::Err> {
        let deal = by.into_inner();
        self.with(|inner| Ok(select_commission(&inner.staged, deal)))
    }
}

impl database::Database<Select<By<Option<Client>, client::Id>>> for Tx {
    type Ok = Option<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Client>, client::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.with(|inner| Ok(inner.staged.clients.get(&id).cloned()))
    }
}

impl
    database::Database<
        Select<By<Option<ledger::Category>, ledger::category::Slug>>,
    > for Tx
{
    type Ok = Option<ledger::Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<ledger::Category>, ledger::category::Slug>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let slug = by.into_inner();
        self.with(|inner| {
            Ok(inner
                .staged
                .categories
                .iter()
                .find(|c| c.slug == slug)
                .cloned())
        })
    }
}

impl database::Database<Insert<Commission>> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(commission): Insert<Commission>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|inner| {
            inner.staged.commissions.push(commission);
            Ok(())
        })
    }
}

impl database::Database<Insert<ledger::Entry>> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<ledger::Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|inner| {
            inner.staged.entries.push(entry);
            Ok(())
        })
    }
}

impl database::Database<Update<Client>> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(client): Update<Client>,
    ) -> Result<Self::Ok, Self::Err> {
        self.with(|inner| {
            drop(inner.staged.clients.insert(client.id, client));
            Ok(())
        })
    }
}

/// Selects all the available [`Property`]s from the provided [`State`].
fn select_available(state: &State) -> Vec<Property> {
    use crate::domain::property::Status;

    state
        .properties
        .iter()
        .filter(|p| p.status == Status::Available)
        .cloned()
        .collect()
}

/// Selects the [`ledger::Entry`]s of the provided [`State`] issued within
/// the provided range.
fn select_period_entries(
    state: &State,
    range: &RangeInclusive<ledger::IssueDateTime>,
) -> read::ledger::PeriodEntries {
    read::ledger::PeriodEntries(
        state
            .entries
            .iter()
            .filter(|e| range.contains(&e.issued_at))
            .cloned()
            .collect(),
    )
}

/// Selects the [`Commission`] computed for the provided [`Deal`] from the
/// provided [`State`], if any.
fn select_commission(state: &State, deal: Deal) -> Option<Commission> {
    state.commissions.iter().find(|c| c.deal == deal).cloned()
}
