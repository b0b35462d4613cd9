#![allow(dead_code)]

//! Shared test fixtures: a store with injectable write failures.

use std::collections::HashSet;
use std::sync::Mutex;

use finly::{Budget, CoreError, FinanceStore, StoreSession, Tables, Transaction};
use uuid::Uuid;

/// In-memory store that can be told to fail specific writes, for exercising
/// rollback and sweep-skip behavior.
#[derive(Default)]
pub struct FailingStore {
    tables: Mutex<Tables>,
    fail_budget_saves: Mutex<HashSet<Uuid>>,
    fail_ledger_writes: Mutex<bool>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every future save of this budget fails with a storage error.
    pub fn fail_budget_save(&self, id: Uuid) {
        self.fail_budget_saves.lock().unwrap().insert(id);
    }

    /// Toggles failure of every ledger entry write.
    pub fn set_fail_ledger_writes(&self, fail: bool) {
        *self.fail_ledger_writes.lock().unwrap() = fail;
    }
}

struct FailingSession<'a> {
    inner: &'a mut Tables,
    fail_budget_saves: HashSet<Uuid>,
    fail_ledger_writes: bool,
}

impl StoreSession for FailingSession<'_> {
    fn budget(&self, id: Uuid) -> Result<Budget, CoreError> {
        self.inner.budget(id)
    }

    fn save_budget(&mut self, budget: &Budget) -> Result<(), CoreError> {
        if self.fail_budget_saves.contains(&budget.id) {
            return Err(CoreError::Storage("injected budget write failure".into()));
        }
        self.inner.save_budget(budget)
    }

    fn delete_budget(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.inner.delete_budget(id)
    }

    fn budgets(&self) -> Result<Vec<Budget>, CoreError> {
        self.inner.budgets()
    }

    fn budgets_for_owner(&self, owner_id: Uuid) -> Result<Vec<Budget>, CoreError> {
        self.inner.budgets_for_owner(owner_id)
    }

    fn goal(&self, id: Uuid) -> Result<finly::Goal, CoreError> {
        self.inner.goal(id)
    }

    fn save_goal(&mut self, goal: &finly::Goal) -> Result<(), CoreError> {
        self.inner.save_goal(goal)
    }

    fn delete_goal(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.inner.delete_goal(id)
    }

    fn goals_for_owner(&self, owner_id: Uuid) -> Result<Vec<finly::Goal>, CoreError> {
        self.inner.goals_for_owner(owner_id)
    }

    fn transaction(&self, id: Uuid) -> Result<Transaction, CoreError> {
        self.inner.transaction(id)
    }

    fn save_transaction(&mut self, entry: &Transaction) -> Result<(), CoreError> {
        if self.fail_ledger_writes {
            return Err(CoreError::Storage("injected ledger write failure".into()));
        }
        self.inner.save_transaction(entry)
    }

    fn delete_transaction(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.inner.delete_transaction(id)
    }

    fn transactions_for_owner(&self, owner_id: Uuid) -> Result<Vec<Transaction>, CoreError> {
        self.inner.transactions_for_owner(owner_id)
    }
}

impl FinanceStore for FailingStore {
    fn transact<R>(
        &self,
        op: impl FnOnce(&mut dyn StoreSession) -> Result<R, CoreError>,
    ) -> Result<R, CoreError> {
        let mut guard = self
            .tables
            .lock()
            .map_err(|_| CoreError::Conflict("finance store mutex poisoned".into()))?;
        let mut staged = guard.clone();
        let result = {
            let mut session = FailingSession {
                inner: &mut staged,
                fail_budget_saves: self.fail_budget_saves.lock().unwrap().clone(),
                fail_ledger_writes: *self.fail_ledger_writes.lock().unwrap(),
            };
            op(&mut session)?
        };
        *guard = staged;
        Ok(result)
    }
}
