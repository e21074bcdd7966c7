//! Read-through cache for ledger queries.
//!
//! Query results are cached by [`QueryKey`] (collection plus filter). Reads go
//! to the store on a miss. Mutations must invalidate the keys they affect,
//! either one key at a time or a whole collection with
//! [`LedgerCache::invalidate_kind`].

use crate::{
    core::{debt, expense, income, month},
    entities::{
        debt as debt_entity, debt_payment, expense as expense_entity, income as income_entity,
        month as month_entity,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// The collection a query reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// `months`
    Months,
    /// `expenses`
    Expenses,
    /// `incomes`
    Incomes,
    /// `debts`
    Debts,
    /// `debt_payments`
    DebtPayments,
}

/// A cached query: collection plus equality filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The month with `is_active = true`
    ActiveMonth,
    /// Expenses with `month_id = id`
    Expenses(i64),
    /// Incomes with `month_id = id`
    Incomes(i64),
    /// Every debt
    Debts,
    /// Payments with `debt_id = id`
    DebtPayments(i64),
}

impl QueryKey {
    /// Collection this key reads from.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::ActiveMonth => EntityKind::Months,
            Self::Expenses(_) => EntityKind::Expenses,
            Self::Incomes(_) => EntityKind::Incomes,
            Self::Debts => EntityKind::Debts,
            Self::DebtPayments(_) => EntityKind::DebtPayments,
        }
    }
}

#[derive(Debug, Clone)]
enum CachedRows {
    Month(Option<month_entity::Model>),
    Expenses(Vec<expense_entity::Model>),
    Incomes(Vec<income_entity::Model>),
    Debts(Vec<debt_entity::Model>),
    DebtPayments(Vec<debt_payment::Model>),
}

/// Shared read-through cache. Cloning shares the same entries.
#[derive(Debug, Clone, Default)]
pub struct LedgerCache {
    entries: Arc<RwLock<HashMap<QueryKey, CachedRows>>>,
}

impl LedgerCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn get(&self, key: QueryKey) -> Option<CachedRows> {
        let entries = self.entries.read().await;
        let hit = entries.get(&key).cloned();
        trace!("Cache {} for {key:?}", if hit.is_some() { "hit" } else { "miss" });
        hit
    }

    async fn put(&self, key: QueryKey, rows: CachedRows) {
        self.entries.write().await.insert(key, rows);
    }

    /// The active month, read through the cache.
    pub async fn active_month(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Option<month_entity::Model>> {
        if let Some(CachedRows::Month(month)) = self.get(QueryKey::ActiveMonth).await {
            return Ok(month);
        }
        let fetched = month::get_active_month(db).await?;
        self.put(QueryKey::ActiveMonth, CachedRows::Month(fetched.clone()))
            .await;
        Ok(fetched)
    }

    /// Expenses of a month, newest first, read through the cache.
    pub async fn expenses(
        &self,
        db: &DatabaseConnection,
        month_id: i64,
    ) -> Result<Vec<expense_entity::Model>> {
        let key = QueryKey::Expenses(month_id);
        if let Some(CachedRows::Expenses(rows)) = self.get(key).await {
            return Ok(rows);
        }
        let fetched = expense::get_expenses_for_month(db, month_id).await?;
        self.put(key, CachedRows::Expenses(fetched.clone())).await;
        Ok(fetched)
    }

    /// Incomes of a month, newest first, read through the cache.
    pub async fn incomes(
        &self,
        db: &DatabaseConnection,
        month_id: i64,
    ) -> Result<Vec<income_entity::Model>> {
        let key = QueryKey::Incomes(month_id);
        if let Some(CachedRows::Incomes(rows)) = self.get(key).await {
            return Ok(rows);
        }
        let fetched = income::get_incomes_for_month(db, month_id).await?;
        self.put(key, CachedRows::Incomes(fetched.clone())).await;
        Ok(fetched)
    }

    /// Every debt, newest first, read through the cache.
    pub async fn debts(&self, db: &DatabaseConnection) -> Result<Vec<debt_entity::Model>> {
        if let Some(CachedRows::Debts(rows)) = self.get(QueryKey::Debts).await {
            return Ok(rows);
        }
        let fetched = debt::get_all_debts(db).await?;
        self.put(QueryKey::Debts, CachedRows::Debts(fetched.clone()))
            .await;
        Ok(fetched)
    }

    /// Payments of a debt, most recent first, read through the cache.
    pub async fn debt_payments(
        &self,
        db: &DatabaseConnection,
        debt_id: i64,
    ) -> Result<Vec<debt_payment::Model>> {
        let key = QueryKey::DebtPayments(debt_id);
        if let Some(CachedRows::DebtPayments(rows)) = self.get(key).await {
            return Ok(rows);
        }
        let fetched = debt::get_payments_for_debt(db, debt_id).await?;
        self.put(key, CachedRows::DebtPayments(fetched.clone()))
            .await;
        Ok(fetched)
    }

    /// Drops one cached query.
    pub async fn invalidate(&self, key: &QueryKey) {
        if self.entries.write().await.remove(key).is_some() {
            debug!("Invalidated {key:?}");
        }
    }

    /// Drops every cached query of a collection.
    pub async fn invalidate_kind(&self, kind: EntityKind) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| key.kind() != kind);
        debug!("Invalidated {} {kind:?} entries", before - entries.len());
    }

    /// Drops everything.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of cached queries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_reads_are_served_from_cache_until_invalidated() -> Result<()> {
        init_test_tracing();
        let (db, month) = setup_with_month().await?;
        let cache = LedgerCache::new();

        create_test_expense(&db, month.id, dec!(100), "comida").await?;
        assert_eq!(cache.expenses(&db, month.id).await?.len(), 1);

        // Written behind the cache's back: still the stale view
        create_test_expense(&db, month.id, dec!(200), "hogar").await?;
        assert_eq!(cache.expenses(&db, month.id).await?.len(), 1);

        cache.invalidate(&QueryKey::Expenses(month.id)).await;
        assert_eq!(cache.expenses(&db, month.id).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalidate_kind_only_touches_that_collection() -> Result<()> {
        let (db, month) = setup_with_month().await?;
        let other = crate::core::month::start_month(&db, dec!(10)).await?;
        let cache = LedgerCache::new();

        cache.expenses(&db, month.id).await?;
        cache.expenses(&db, other.id).await?;
        create_test_income(&db, month.id, dec!(5)).await?;
        assert_eq!(cache.incomes(&db, month.id).await?.len(), 1);
        cache.active_month(&db).await?;
        assert_eq!(cache.len().await, 4);

        cache.invalidate_kind(EntityKind::Expenses).await;
        assert_eq!(cache.len().await, 2);

        cache.clear().await;
        assert!(cache.is_empty().await);
        Ok(())
    }

    #[tokio::test]
    async fn test_active_month_caches_absence() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = LedgerCache::new();

        assert!(cache.active_month(&db).await?.is_none());
        let started = crate::core::month::start_month(&db, dec!(1000)).await?;
        assert!(cache.active_month(&db).await?.is_none());

        cache.invalidate(&QueryKey::ActiveMonth).await;
        assert_eq!(cache.active_month(&db).await?.unwrap().id, started.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_debt_queries() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = LedgerCache::new();
        let debt = crate::core::debt::create_debt(&db, "Loan", dec!(100)).await?;

        assert_eq!(cache.debts(&db).await?.len(), 1);
        assert!(cache.debt_payments(&db, debt.id).await?.is_empty());

        crate::core::debt::add_payment(&db, debt.id, dec!(40)).await?;
        cache.invalidate(&QueryKey::DebtPayments(debt.id)).await;
        assert_eq!(cache.debt_payments(&db, debt.id).await?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_key_kinds() {
        assert_eq!(QueryKey::ActiveMonth.kind(), EntityKind::Months);
        assert_eq!(QueryKey::Expenses(1).kind(), EntityKind::Expenses);
        assert_eq!(QueryKey::Incomes(1).kind(), EntityKind::Incomes);
        assert_eq!(QueryKey::Debts.kind(), EntityKind::Debts);
        assert_eq!(QueryKey::DebtPayments(1).kind(), EntityKind::DebtPayments);
    }
}
