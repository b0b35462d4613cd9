//! Savings goals and their paired ledger writes.
//!
//! The ledger is the system of record for fund movement: a goal's saved
//! balance never changes without a matching ledger entry, and both land (or
//! neither does) within one store session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use finly_domain::{Goal, Transaction, TransactionKind};

use crate::{
    store::{FinanceStore, StoreSession},
    CoreError,
};

/// Ledger category for funds moved into a goal.
pub const CONTRIBUTION_CATEGORY: &str = "Savings Contribution";
/// Ledger category for funds returned when a goal is deleted.
pub const RECLAIM_CATEGORY: &str = "Savings Reclaim";
/// Payment method tag for goal-synthesized ledger entries.
pub const SYSTEM_PAYMENT_METHOD: &str = "System Credits";

/// Input for creating a goal.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
}

/// Result of a contribution: the updated goal and its ledger entry.
#[derive(Debug, Clone)]
pub struct Contribution {
    pub goal: Goal,
    pub entry: Transaction,
}

pub struct GoalService<S> {
    store: Arc<S>,
}

impl<S: FinanceStore> GoalService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create_goal(&self, owner_id: Uuid, input: NewGoal) -> Result<Goal, CoreError> {
        let goal = Goal::new(owner_id, input.name, input.target_amount);
        self.store.transact(|session| {
            session.save_goal(&goal)?;
            Ok(goal.clone())
        })
    }

    pub fn goal(&self, owner_id: Uuid, id: Uuid) -> Result<Goal, CoreError> {
        self.store
            .transact(|session| owned_goal(session, owner_id, id))
    }

    pub fn goals_for_owner(&self, owner_id: Uuid) -> Result<Vec<Goal>, CoreError> {
        self.store
            .transact(|session| session.goals_for_owner(owner_id))
    }

    /// Moves `amount` into the goal and records the matching expense entry.
    ///
    /// Runs as one atomic unit: if the ledger write cannot be committed, the
    /// saved-amount bump is not retained either.
    pub fn contribute(
        &self,
        owner_id: Uuid,
        goal_id: Uuid,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<Contribution, CoreError> {
        if amount <= 0.0 {
            return Err(CoreError::InvalidInput(
                "contribution amount must be positive".into(),
            ));
        }
        self.store.transact(|session| {
            let mut goal = owned_goal(session, owner_id, goal_id)?;
            goal.saved_amount += amount;
            session.save_goal(&goal)?;
            let entry = Transaction::new(
                owner_id,
                amount,
                CONTRIBUTION_CATEGORY,
                TransactionKind::Expense,
                now,
            )
            .with_description(format!("Transferred to goal: {}", goal.name))
            .with_payment_method(SYSTEM_PAYMENT_METHOD);
            session.save_transaction(&entry)?;
            Ok(Contribution { goal, entry })
        })
    }

    /// Deletes the goal, returning its balance to general funds.
    ///
    /// A nonzero balance is recorded as an income entry strictly before the
    /// goal record is removed; a zero balance produces no ledger entry.
    /// Returns the reclaim entry when one was written.
    pub fn reclaim(
        &self,
        owner_id: Uuid,
        goal_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<Transaction>, CoreError> {
        self.store.transact(|session| {
            let goal = owned_goal(session, owner_id, goal_id)?;
            let entry = if goal.saved_amount > 0.0 {
                let entry = Transaction::new(
                    owner_id,
                    goal.saved_amount,
                    RECLAIM_CATEGORY,
                    TransactionKind::Income,
                    now,
                )
                .with_description(format!("Reclaimed funds from deleted goal: {}", goal.name))
                .with_payment_method(SYSTEM_PAYMENT_METHOD);
                session.save_transaction(&entry)?;
                Some(entry)
            } else {
                None
            };
            session.delete_goal(goal.id)?;
            Ok(entry)
        })
    }
}

fn owned_goal(session: &dyn StoreSession, owner_id: Uuid, id: Uuid) -> Result<Goal, CoreError> {
    let goal = session.goal(id)?;
    if goal.owner_id != owner_id {
        return Err(CoreError::GoalNotFound(id));
    }
    Ok(goal)
}
