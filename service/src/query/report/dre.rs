//! [`Dre`] report definition.

use std::collections::{BTreeMap, HashMap};

use common::{
    money::Currency,
    operations::{By, Select},
    Money, Month,
};
use itertools::Itertools as _;
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::ledger::{self, category},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] generating the DRE ("Demonstrativo de Resultado do
/// Exercicio") income statement for a calendar [`Month`].
///
/// The report is computed fresh on every execution and never persisted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Dre {
    /// [`Month`] to generate the report for.
    pub month: Month,
}

/// Output of the [`Dre`] [`Query`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Month`] this report covers.
    pub month: Month,

    /// Revenue [`Section`] of this report.
    pub revenue: Section,

    /// Expense [`Section`] of this report.
    pub expense: Section,

    /// Gross result of the period: total revenue minus total expense.
    pub gross_result: Money,

    /// Comparison against the preceding [`Month`].
    pub prior: PriorPeriod,
}

/// One side (revenue or expense) of a [`Dre`] report.
#[derive(Clone, Debug)]
pub struct Section {
    /// Total amount of this [`Section`].
    pub total: Money,

    /// Per-category breakdown of this [`Section`], deterministically
    /// ordered by [`category::Name`].
    pub categories: BTreeMap<category::Name, Group>,
}

/// Group of ledger [`ledger::Entry`]s under one [`category::Name`].
#[derive(Clone, Debug)]
pub struct Group {
    /// Total amount of this [`Group`].
    pub total: Money,

    /// [`ledger::Entry`]s of this [`Group`], in their storage order.
    pub entries: Vec<ledger::Entry>,
}

/// Prior-period comparison of a [`Dre`] report.
#[derive(Clone, Copy, Debug)]
pub struct PriorPeriod {
    /// Total revenue of the preceding [`Month`].
    pub revenue: Money,

    /// Total expense of the preceding [`Month`].
    pub expense: Money,

    /// Percentage variance of the revenue against the preceding [`Month`].
    pub revenue_variance: Decimal,

    /// Percentage variance of the expense against the preceding [`Month`].
    pub expense_variance: Decimal,
}

impl<Db> Query<Dre> for Service<Db>
where
    Db: Database<
            Select<
                By<
                    read::ledger::PeriodEntries,
                    std::ops::RangeInclusive<ledger::IssueDateTime>,
                >,
            >,
            Ok = read::ledger::PeriodEntries,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    HashMap<category::Id, ledger::Category>,
                    Vec<category::Id>,
                >,
            >,
            Ok = HashMap<category::Id, ledger::Category>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<database::Error>;

    async fn execute(&self, Dre { month }: Dre) -> Result<Self::Ok, Self::Err> {
        let currency = self.config().currency;

        let current = self
            .database()
            .execute(Select(By::<read::ledger::PeriodEntries, _>::new(
                month.range(),
            )))
            .await
            .map_err(tracerr::wrap!())?
            .into_inner();

        let category_ids = current
            .iter()
            .filter_map(|e| e.category_id)
            .unique()
            .collect::<Vec<_>>();
        let categories = self
            .database()
            .execute(Select(By::<
                HashMap<category::Id, ledger::Category>,
                _,
            >::new(category_ids)))
            .await
            .map_err(tracerr::wrap!())?;

        let (revenue_entries, expense_entries): (Vec<_>, Vec<_>) = current
            .into_iter()
            .partition(|e| e.kind == ledger::Kind::Revenue);
        let revenue = section(revenue_entries, &categories, currency);
        let expense = section(expense_entries, &categories, currency);
        // Both totals are stamped with the same configured `Currency`.
        let gross_result = revenue.total - expense.total;

        let prior_entries = self
            .database()
            .execute(Select(By::<read::ledger::PeriodEntries, _>::new(
                month.pred().range(),
            )))
            .await
            .map_err(tracerr::wrap!())?
            .into_inner();
        let (prior_revenue, prior_expense) =
            totals(&prior_entries, currency);

        Ok(Output {
            month,
            gross_result,
            prior: PriorPeriod {
                revenue: prior_revenue,
                expense: prior_expense,
                revenue_variance: variance(
                    revenue.total.amount,
                    prior_revenue.amount,
                ),
                expense_variance: variance(
                    expense.total.amount,
                    prior_expense.amount,
                ),
            },
            revenue,
            expense,
        })
    }
}

/// Builds a [`Section`] from the provided [`ledger::Entry`]s of one
/// [`ledger::Kind`].
fn section(
    entries: Vec<ledger::Entry>,
    categories: &HashMap<category::Id, ledger::Category>,
    currency: Currency,
) -> Section {
    let total = sum(entries.iter(), currency);

    let categories = entries
        .into_iter()
        .into_group_map_by(|e| bucket(e, categories))
        .into_iter()
        .map(|(name, entries)| {
            let total = sum(entries.iter(), currency);
            (name, Group { total, entries })
        })
        .collect();

    Section { total, categories }
}

/// Returns the [`category::Name`] bucket of the provided [`ledger::Entry`].
///
/// Entries without a (known) category land in the
/// [`category::Name::other()`] bucket.
fn bucket(
    entry: &ledger::Entry,
    categories: &HashMap<category::Id, ledger::Category>,
) -> category::Name {
    entry
        .category_id
        .and_then(|id| categories.get(&id))
        .map_or_else(category::Name::other, |c| c.name.clone())
}

/// Sums the amounts of the provided [`ledger::Entry`]s in the provided
/// [`Currency`].
fn sum<'e>(
    entries: impl Iterator<Item = &'e ledger::Entry>,
    currency: Currency,
) -> Money {
    entries.fold(Money::zero(currency), |total, e| Money {
        amount: total.amount + e.amount.amount,
        currency,
    })
}

/// Computes the revenue and expense totals of the provided
/// [`ledger::Entry`]s.
fn totals(entries: &[ledger::Entry], currency: Currency) -> (Money, Money) {
    let (revenue, expense): (Vec<_>, Vec<_>) =
        entries.iter().partition(|e| e.kind == ledger::Kind::Revenue);
    (
        sum(revenue.into_iter(), currency),
        sum(expense.into_iter(), currency),
    )
}

/// Computes the percentage variance of `current` against `prior`.
///
/// A zero `prior` yields a zero variance rather than a division error.
fn variance(current: Decimal, prior: Decimal) -> Decimal {
    if prior.is_zero() {
        Decimal::ZERO
    } else {
        (current - prior) / prior * Decimal::ONE_HUNDRED
    }
}
