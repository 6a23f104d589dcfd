//! [`Query`] ranking [`Property`]s compatible with a [`Client`]'s
//! [`SearchProfile`].
//!
//! [`SearchProfile`]: client::SearchProfile

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{client, matching, Client, Property},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] ranking available [`Property`]s by their compatibility with
/// the [`SearchProfile`] of the [`Client`].
///
/// [`SearchProfile`]: client::SearchProfile
#[derive(Clone, Copy, Debug)]
pub struct ForClient {
    /// ID of the [`Client`] to rank [`Property`]s for.
    pub client_id: client::Id,

    /// Maximum number of [`Match`]es to return.
    pub limit: Limit,
}

/// Maximum number of [`Match`]es a [`ForClient`] [`Query`] returns.
///
/// Always positive: a zero limit is rejected on construction rather than
/// clamped.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct Limit(usize);

impl Limit {
    /// Creates a new [`Limit`] by checking the provided value is positive.
    #[must_use]
    pub fn new(limit: usize) -> Option<Self> {
        (limit > 0).then_some(Self(limit))
    }

    /// Returns the value of this [`Limit`].
    #[must_use]
    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(10)
    }
}

/// Single ranked result of a [`ForClient`] [`Query`].
#[derive(Clone, Debug)]
pub struct Match {
    /// Matched [`Property`].
    pub property: Property,

    /// Compatibility [`matching::Score`] of the [`Property`].
    pub score: matching::Score,
}

impl<Db> Query<ForClient> for Service<Db>
where
    Db: Database<
            Select<By<Option<Client>, client::Id>>,
            Ok = Option<Client>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Property>, read::property::Available>>,
            Ok = Vec<Property>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<Match>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ForClient { client_id, limit }: ForClient,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let client = self
            .database()
            .execute(Select(By::<Option<Client>, _>::new(client_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ClientNotExists(client_id))
            .map_err(tracerr::wrap!())?;
        let profile = client
            .search_profile
            .ok_or(E::NoSearchProfile(client_id))
            .map_err(tracerr::wrap!())?;

        let candidates = self
            .database()
            .execute(Select(By::<Vec<Property>, _>::new(
                read::property::Available,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut matches = candidates
            .into_iter()
            .map(|property| Match {
                score: matching::evaluate(&profile, &property),
                property,
            })
            .collect::<Vec<_>>();
        // Stable sort: equally scored properties keep their storage order.
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(limit.get());

        Ok(matches)
    }
}

/// Error of [`ForClient`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Client`] doesn't exist.
    #[display("`Client(id: {_0})` does not exist")]
    #[from(ignore)]
    ClientNotExists(#[error(not(source))] client::Id),

    /// [`Client`] has no stored search profile.
    #[display("`Client(id: {_0})` has no stored search profile")]
    #[from(ignore)]
    NoSearchProfile(#[error(not(source))] client::Id),
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, operations::Insert, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            client::{self, SearchProfile},
            matching,
            property::{self, Neighborhood},
            Client, Property,
        },
        infra::InMemory,
        Config, Query as _, Service,
    };

    use super::{ExecutionError, ForClient, Limit};

    fn brl(s: &str) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency: Currency::Brl,
        }
    }

    fn property(
        kind: property::Kind,
        hood: &str,
        sale_price: &str,
        bedrooms: property::Bedrooms,
        status: property::Status,
    ) -> Property {
        Property::new(
            property::Id::new(),
            kind,
            Neighborhood::new(hood).unwrap(),
            Some(brl(sale_price)),
            None,
            bedrooms,
            status,
            DateTime::now().coerce(),
        )
        .unwrap()
    }

    async fn seeded_service() -> (Service<InMemory>, client::Id) {
        let db = InMemory::default();

        let client_id = client::Id::new();
        db.execute(Insert(Client {
            id: client_id,
            name: client::Name::new("Joao Lima").unwrap(),
            search_profile: Some(SearchProfile {
                desired_kind: Some(property::Kind::Apartment),
                neighborhoods: vec![Neighborhood::new("Centro").unwrap()],
                max_budget: Some(brl("500000")),
                min_bedrooms: Some(2),
            }),
            created_at: DateTime::now().coerce(),
        }))
        .await
        .unwrap();

        (Service::new(Config::default(), db), client_id)
    }

    #[tokio::test]
    async fn ranks_by_descending_score() {
        let (service, client_id) = seeded_service().await;
        let db = service.database();

        let full_match = property(
            property::Kind::Apartment,
            "Centro",
            "450000",
            3,
            property::Status::Available,
        );
        let wrong_kind = property(
            property::Kind::House,
            "Centro",
            "450000",
            3,
            property::Status::Available,
        );
        db.execute(Insert(wrong_kind.clone())).await.unwrap();
        db.execute(Insert(full_match.clone())).await.unwrap();

        let matches = service
            .execute(ForClient {
                client_id,
                limit: Limit::default(),
            })
            .await
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].property.id, full_match.id);
        assert_eq!(matches[0].score, matching::Score::MAX);
        assert_eq!(matches[1].property.id, wrong_kind.id);
        assert_eq!(
            matches[1].score,
            matching::Score::new(Decimal::from(70)).unwrap(),
        );
    }

    #[tokio::test]
    async fn skips_unavailable_and_applies_limit() {
        let (service, client_id) = seeded_service().await;
        let db = service.database();

        let sold = property(
            property::Kind::Apartment,
            "Centro",
            "450000",
            3,
            property::Status::Sold,
        );
        db.execute(Insert(sold)).await.unwrap();
        for _ in 0..3 {
            let available = property(
                property::Kind::Apartment,
                "Centro",
                "450000",
                3,
                property::Status::Available,
            );
            db.execute(Insert(available)).await.unwrap();
        }

        let matches = service
            .execute(ForClient {
                client_id,
                limit: Limit::new(2).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn equal_scores_keep_storage_order() {
        let (service, client_id) = seeded_service().await;
        let db = service.database();

        let mut ids = vec![];
        for _ in 0..4 {
            let p = property(
                property::Kind::Apartment,
                "Centro",
                "450000",
                3,
                property::Status::Available,
            );
            ids.push(p.id);
            db.execute(Insert(p)).await.unwrap();
        }

        let matches = service
            .execute(ForClient {
                client_id,
                limit: Limit::default(),
            })
            .await
            .unwrap();
        let ranked = matches
            .iter()
            .map(|m| m.property.id)
            .collect::<Vec<_>>();
        assert_eq!(ranked, ids);
    }

    #[tokio::test]
    async fn fails_without_profile() {
        let db = InMemory::default();
        let client_id = client::Id::new();
        db.execute(Insert(Client {
            id: client_id,
            name: client::Name::new("Ana Dias").unwrap(),
            search_profile: None,
            created_at: DateTime::now().coerce(),
        }))
        .await
        .unwrap();
        let service = Service::new(Config::default(), db);

        let err = service
            .execute(ForClient {
                client_id,
                limit: Limit::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NoSearchProfile(_)));
    }

    #[test]
    fn limit_rejects_zero() {
        assert!(Limit::new(0).is_none());
        assert_eq!(Limit::default().get(), 10);
    }
}
