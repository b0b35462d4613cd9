//! Read-only ledger aggregation for dashboards.
//!
//! Each call reads one session snapshot and never triggers budget resets;
//! callers needing reset-consistent numbers run the rollover check first.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use finly_domain::{Transaction, TransactionKind};

use crate::{
    store::{FinanceStore, StoreSession},
    CoreError,
};

const DASHBOARD_RECENT_LIMIT: usize = 5;

/// Headline numbers plus the most recent ledger activity.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_savings: f64,
    pub recent_transactions: Vec<Transaction>,
}

pub struct SummaryService<S> {
    store: Arc<S>,
}

impl<S: FinanceStore> SummaryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Sums ledger amounts for one owner and kind.
    pub fn total_by_type(&self, owner_id: Uuid, kind: TransactionKind) -> Result<f64, CoreError> {
        self.store.transact(|session| {
            let entries = session.transactions_for_owner(owner_id)?;
            Ok(sum_amounts(&entries, |entry| entry.kind == kind))
        })
    }

    /// Sums ledger amounts for one owner and kind between `start` and `end`
    /// (inclusive).
    pub fn total_by_type_in_range(
        &self,
        owner_id: Uuid,
        kind: TransactionKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64, CoreError> {
        self.store.transact(|session| {
            let entries = session.transactions_for_owner(owner_id)?;
            Ok(sum_amounts(&entries, |entry| {
                entry.kind == kind && entry.timestamp >= start && entry.timestamp <= end
            }))
        })
    }

    /// Sums expense amounts for one owner and category.
    pub fn total_expenses_by_category(
        &self,
        owner_id: Uuid,
        category: &str,
    ) -> Result<f64, CoreError> {
        self.store.transact(|session| {
            let entries = session.transactions_for_owner(owner_id)?;
            Ok(sum_amounts(&entries, |entry| {
                entry.kind == TransactionKind::Expense && entry.category == category
            }))
        })
    }

    /// Returns up to `limit` entries, newest first.
    pub fn recent_transactions(
        &self,
        owner_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Transaction>, CoreError> {
        self.store.transact(|session| {
            let mut entries = session.transactions_for_owner(owner_id)?;
            entries.sort_by_key(|entry| Reverse(entry.timestamp));
            entries.truncate(limit);
            Ok(entries)
        })
    }

    /// Income/expense totals, net savings, and the five most recent entries,
    /// all from a single snapshot.
    pub fn dashboard_summary(&self, owner_id: Uuid) -> Result<DashboardSummary, CoreError> {
        self.store.transact(|session| {
            let mut entries = session.transactions_for_owner(owner_id)?;
            let total_income = sum_amounts(&entries, |entry| entry.kind == TransactionKind::Income);
            let total_expense =
                sum_amounts(&entries, |entry| entry.kind == TransactionKind::Expense);
            entries.sort_by_key(|entry| Reverse(entry.timestamp));
            entries.truncate(DASHBOARD_RECENT_LIMIT);
            Ok(DashboardSummary {
                total_income,
                total_expense,
                net_savings: total_income - total_expense,
                recent_transactions: entries,
            })
        })
    }
}

fn sum_amounts(entries: &[Transaction], keep: impl Fn(&Transaction) -> bool) -> f64 {
    entries
        .iter()
        .filter(|entry| keep(entry))
        .map(|entry| entry.amount)
        .sum()
}
