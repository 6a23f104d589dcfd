//! [`Command`] for computing a [`Commission`] of a closed [`Deal`].

use std::time::Duration;

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::{
    domain::{
        agent,
        commission::{self, Deal, Recipients, Shares},
        ledger, Commission,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for computing a [`Commission`] of a closed [`Deal`].
///
/// At most one [`Commission`] may exist per [`Deal`]: recomputation fails.
/// Every present recipient whose computed amount is non-zero receives one
/// payable [`ledger::Entry`] due [`Config::payable_due`] after the
/// computation, created atomically with the [`Commission`] itself.
#[derive(Clone, Copy, Debug)]
pub struct ComputeCommission {
    /// [`Deal`] to compute a [`Commission`] for.
    pub deal: Deal,

    /// Total transaction value to split.
    pub total: Money,

    /// Percentage [`Shares`] to split the total by.
    pub shares: Shares,

    /// [`Recipients`] of the computed [`Commission`].
    pub recipients: Recipients,
}

/// [`ComputeCommission`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Offset after which a commission payable becomes due.
    #[default(Duration::from_secs(5 * 24 * 60 * 60))]
    pub payable_due: Duration,
}

impl<Db> Command<ComputeCommission> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Commission, Deal>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Commission>, Deal>>,
            Ok = Option<Commission>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<ledger::Category>, ledger::category::Slug>>,
            Ok = Option<ledger::Category>,
            Err = Traced<database::Error>,
        > + Database<Insert<Commission>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Insert<ledger::Entry>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Commission;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ComputeCommission,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ComputeCommission {
            deal,
            total,
            shares,
            recipients,
        } = cmd;

        if !total.is_positive() {
            return Err(tracerr::new!(E::NonPositiveTotal(total)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent computations for the same `Deal`.
        tx.execute(Lock(By::new(deal)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Commission>, _>::new(deal)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::AlreadyComputed(deal)));
        }

        let category = tx
            .execute(Select(By::<Option<ledger::Category>, _>::new(
                ledger::category::Slug::commission_expense(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NoCommissionExpenseCategory)
            .map_err(tracerr::wrap!())?;

        let commission = Commission {
            id: commission::Id::new(),
            deal,
            total,
            shares,
            breakdown: shares.split(total),
            recipients,
            computed_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(commission.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let payable_to = [
            (
                agent::Role::SellingAgent,
                recipients.selling_agent,
                commission.breakdown.selling_agent,
            ),
            (
                agent::Role::SourcingAgent,
                recipients.sourcing_agent,
                commission.breakdown.sourcing_agent,
            ),
            (
                agent::Role::Manager,
                recipients.manager,
                commission.breakdown.manager,
            ),
        ];
        for (role, recipient, amount) in payable_to {
            if recipient.is_none() || !amount.is_positive() {
                continue;
            }

            let entry = ledger::Entry {
                id: ledger::Id::new(),
                kind: ledger::Kind::Expense,
                category_id: Some(category.id),
                amount,
                description: payable_description(commission.id, role),
                issued_at: commission.computed_at.coerce(),
                due_at: Some(
                    (commission.computed_at + self.config().commission.payable_due)
                        .coerce(),
                ),
            };
            tx.execute(Insert(entry))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::debug!(
            commission = %commission.id,
            deal = %deal,
            "commission computed",
        );

        Ok(commission)
    }
}

/// Builds a [`ledger::Description`] of a commission payable for the
/// provided [`agent::Role`].
fn payable_description(
    id: commission::Id,
    role: agent::Role,
) -> ledger::Description {
    ledger::Description::new(format!(
        "Commission {id}: {} share",
        role.label(),
    ))
    .expect("non-empty and trimmed")
}

/// Error of [`ComputeCommission`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Commission`] for the [`Deal`] has already been computed.
    #[display("`Commission` for the `{_0}` deal is already computed")]
    AlreadyComputed(#[error(not(source))] Deal),

    /// No [`ledger::Category`] with the commission-expense
    /// [`ledger::category::Slug`] exists.
    #[display("no commission-expense `ledger::Category` is configured")]
    NoCommissionExpenseCategory,

    /// Provided total transaction value is not positive.
    #[display("total value `{_0}` is not positive")]
    NonPositiveTotal(#[error(not(source))] Money),
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{
        money::Currency,
        operations::{By, Insert, Select},
        Money, Percent,
    };

    use crate::{
        domain::{
            agent,
            commission::{rent, sale, Deal, Recipients, Shares},
            ledger, Commission,
        },
        infra::InMemory,
        read, Command as _, Config, Service,
    };

    use super::{ComputeCommission, ExecutionError};

    fn brl(s: &str) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency: Currency::Brl,
        }
    }

    fn shares() -> Shares {
        Shares {
            agency: Percent::from_str("40").unwrap(),
            selling_agent: Percent::from_str("40").unwrap(),
            sourcing_agent: Percent::from_str("15").unwrap(),
            manager: Percent::from_str("5").unwrap(),
        }
    }

    async fn service_with_category() -> Service<InMemory> {
        let db = InMemory::default();
        db.execute(Insert(ledger::Category {
            id: ledger::category::Id::new(),
            name: ledger::category::Name::new("Commissions").unwrap(),
            kind: ledger::Kind::Expense,
            slug: ledger::category::Slug::commission_expense(),
        }))
        .await
        .unwrap();
        Service::new(Config::default(), db)
    }

    #[tokio::test]
    async fn splits_and_creates_payables() {
        let service = service_with_category().await;
        let deal = Deal::Sale(sale::Id::new());

        let commission = service
            .execute(ComputeCommission {
                deal,
                total: brl("10000"),
                shares: shares(),
                recipients: Recipients {
                    selling_agent: Some(agent::Id::new()),
                    sourcing_agent: Some(agent::Id::new()),
                    manager: None,
                },
            })
            .await
            .unwrap();

        assert_eq!(commission.breakdown.agency, brl("4000"));
        assert_eq!(commission.breakdown.selling_agent, brl("4000"));
        assert_eq!(commission.breakdown.sourcing_agent, brl("1500"));
        assert_eq!(commission.breakdown.manager, brl("500"));

        // Payables: selling agent and sourcing agent only. The agency share
        // produces none, and the manager has no recipient.
        let entries = service
            .database()
            .execute(Select(By::<read::ledger::PeriodEntries, _>::new(
                period_of(&commission),
            )))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.kind == ledger::Kind::Expense));
        assert_eq!(entries[0].amount, brl("4000"));
        assert_eq!(entries[1].amount, brl("1500"));
        for entry in &entries {
            let due = entry.due_at.unwrap();
            let issued = entry.issued_at.coerce();
            assert_eq!(
                due - issued,
                std::time::Duration::from_secs(5 * 24 * 60 * 60),
            );
        }
    }

    #[tokio::test]
    async fn conflicts_on_recomputation() {
        let service = service_with_category().await;
        let deal = Deal::Rent(rent::Id::new());
        let cmd = ComputeCommission {
            deal,
            total: brl("3000"),
            shares: shares(),
            recipients: Recipients {
                selling_agent: Some(agent::Id::new()),
                ..Recipients::default()
            },
        };

        assert!(service.execute(cmd).await.is_ok());

        let err = service.execute(cmd).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::AlreadyComputed(d) if *d == deal,
        ));
    }

    #[tokio::test]
    async fn fails_without_commission_expense_category() {
        let service = Service::new(Config::default(), InMemory::default());
        let deal = Deal::Sale(sale::Id::new());

        let err = service
            .execute(ComputeCommission {
                deal,
                total: brl("10000"),
                shares: shares(),
                recipients: Recipients::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::NoCommissionExpenseCategory,
        ));

        // Nothing is committed: the deal stays uncomputed.
        let existing: Option<Commission> = service
            .database()
            .execute(Select(By::new(deal)))
            .await
            .unwrap();
        assert!(existing.is_none());
    }

    #[tokio::test]
    async fn rejects_non_positive_total() {
        let service = service_with_category().await;

        let err = service
            .execute(ComputeCommission {
                deal: Deal::Sale(sale::Id::new()),
                total: brl("0"),
                shares: shares(),
                recipients: Recipients::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::NonPositiveTotal(_),
        ));
    }

    /// Returns the issue-date range covering the provided [`Commission`]'s
    /// computation instant.
    fn period_of(
        commission: &Commission,
    ) -> std::ops::RangeInclusive<ledger::IssueDateTime> {
        let at = commission.computed_at.coerce();
        std::ops::RangeInclusive::new(at, at)
    }
}
