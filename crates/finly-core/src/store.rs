//! Storage abstraction for budgets, goals, and ledger entries.
//!
//! Each record is an independently addressable unit. Cross-record sequences
//! (reset-then-mutate, goal+ledger paired writes) run inside one
//! [`FinanceStore::transact`] call: the session commits on `Ok` and is
//! discarded on `Err`, so no caller ever observes a partially applied update.

use std::sync::Mutex;

use finly_domain::{Budget, Goal, Identifiable, OwnedRecord, Transaction};
use uuid::Uuid;

use crate::CoreError;

/// Record-level operations available within one atomic unit.
pub trait StoreSession {
    fn budget(&self, id: Uuid) -> Result<Budget, CoreError>;
    fn save_budget(&mut self, budget: &Budget) -> Result<(), CoreError>;
    fn delete_budget(&mut self, id: Uuid) -> Result<(), CoreError>;
    fn budgets(&self) -> Result<Vec<Budget>, CoreError>;
    fn budgets_for_owner(&self, owner_id: Uuid) -> Result<Vec<Budget>, CoreError>;

    fn goal(&self, id: Uuid) -> Result<Goal, CoreError>;
    fn save_goal(&mut self, goal: &Goal) -> Result<(), CoreError>;
    fn delete_goal(&mut self, id: Uuid) -> Result<(), CoreError>;
    fn goals_for_owner(&self, owner_id: Uuid) -> Result<Vec<Goal>, CoreError>;

    fn transaction(&self, id: Uuid) -> Result<Transaction, CoreError>;
    fn save_transaction(&mut self, entry: &Transaction) -> Result<(), CoreError>;
    fn delete_transaction(&mut self, id: Uuid) -> Result<(), CoreError>;
    fn transactions_for_owner(&self, owner_id: Uuid) -> Result<Vec<Transaction>, CoreError>;
}

/// Abstraction over persistence backends providing atomic sessions.
///
/// Implementations serialize concurrent `transact` calls against the same
/// store; services add no in-process locking of their own.
pub trait FinanceStore: Send + Sync {
    fn transact<R>(
        &self,
        op: impl FnOnce(&mut dyn StoreSession) -> Result<R, CoreError>,
    ) -> Result<R, CoreError>;
}

/// Plain record tables backing the in-memory and JSON stores.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
    pub transactions: Vec<Transaction>,
}

impl Tables {
    pub fn from_parts(
        budgets: Vec<Budget>,
        goals: Vec<Goal>,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            budgets,
            goals,
            transactions,
        }
    }
}

fn find<T: Identifiable + Clone>(records: &[T], id: Uuid) -> Option<T> {
    records.iter().find(|record| record.id() == id).cloned()
}

fn upsert<T: Identifiable + Clone>(records: &mut Vec<T>, record: &T) {
    match records.iter_mut().find(|existing| existing.id() == record.id()) {
        Some(existing) => *existing = record.clone(),
        None => records.push(record.clone()),
    }
}

fn remove<T: Identifiable>(records: &mut Vec<T>, id: Uuid) -> bool {
    let before = records.len();
    records.retain(|record| record.id() != id);
    records.len() != before
}

fn for_owner<T: OwnedRecord + Clone>(records: &[T], owner_id: Uuid) -> Vec<T> {
    records
        .iter()
        .filter(|record| record.owner_id() == owner_id)
        .cloned()
        .collect()
}

impl StoreSession for Tables {
    fn budget(&self, id: Uuid) -> Result<Budget, CoreError> {
        find(&self.budgets, id).ok_or(CoreError::BudgetNotFound(id))
    }

    fn save_budget(&mut self, budget: &Budget) -> Result<(), CoreError> {
        upsert(&mut self.budgets, budget);
        Ok(())
    }

    fn delete_budget(&mut self, id: Uuid) -> Result<(), CoreError> {
        if remove(&mut self.budgets, id) {
            Ok(())
        } else {
            Err(CoreError::BudgetNotFound(id))
        }
    }

    fn budgets(&self) -> Result<Vec<Budget>, CoreError> {
        Ok(self.budgets.clone())
    }

    fn budgets_for_owner(&self, owner_id: Uuid) -> Result<Vec<Budget>, CoreError> {
        Ok(for_owner(&self.budgets, owner_id))
    }

    fn goal(&self, id: Uuid) -> Result<Goal, CoreError> {
        find(&self.goals, id).ok_or(CoreError::GoalNotFound(id))
    }

    fn save_goal(&mut self, goal: &Goal) -> Result<(), CoreError> {
        upsert(&mut self.goals, goal);
        Ok(())
    }

    fn delete_goal(&mut self, id: Uuid) -> Result<(), CoreError> {
        if remove(&mut self.goals, id) {
            Ok(())
        } else {
            Err(CoreError::GoalNotFound(id))
        }
    }

    fn goals_for_owner(&self, owner_id: Uuid) -> Result<Vec<Goal>, CoreError> {
        Ok(for_owner(&self.goals, owner_id))
    }

    fn transaction(&self, id: Uuid) -> Result<Transaction, CoreError> {
        find(&self.transactions, id).ok_or(CoreError::TransactionNotFound(id))
    }

    fn save_transaction(&mut self, entry: &Transaction) -> Result<(), CoreError> {
        upsert(&mut self.transactions, entry);
        Ok(())
    }

    fn delete_transaction(&mut self, id: Uuid) -> Result<(), CoreError> {
        if remove(&mut self.transactions, id) {
            Ok(())
        } else {
            Err(CoreError::TransactionNotFound(id))
        }
    }

    fn transactions_for_owner(&self, owner_id: Uuid) -> Result<Vec<Transaction>, CoreError> {
        Ok(for_owner(&self.transactions, owner_id))
    }
}

/// In-process reference backend. Sessions run against a staged copy of the
/// tables under the store mutex, so concurrent callers are fully serialized
/// and failed sessions leave nothing behind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FinanceStore for MemoryStore {
    fn transact<R>(
        &self,
        op: impl FnOnce(&mut dyn StoreSession) -> Result<R, CoreError>,
    ) -> Result<R, CoreError> {
        let mut guard = self
            .tables
            .lock()
            .map_err(|_| CoreError::Conflict("finance store mutex poisoned".into()))?;
        let mut staged = guard.clone();
        let result = op(&mut staged)?;
        *guard = staged;
        Ok(result)
    }
}
