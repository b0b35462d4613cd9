//! Budget lifecycle, spend mutations, and the period rollover engine.
//!
//! Every operation that touches spend fields applies the lazy rollover check
//! first, inside the same store session, so a stale budget can never
//! accumulate spend into an expired period.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use finly_domain::{period, Budget, PeriodType};

use crate::{
    store::{FinanceStore, StoreSession},
    CoreError,
};

/// Input for creating a budget.
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub period_type: PeriodType,
}

/// Counts from one batch reset pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    pub reset: usize,
    pub skipped: usize,
}

/// Validated budget mutations over a [`FinanceStore`].
pub struct BudgetService<S> {
    store: Arc<S>,
}

impl<S: FinanceStore> BudgetService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates a budget with zero spend, anchored at the start of the period
    /// containing `today`.
    pub fn create_budget(
        &self,
        owner_id: Uuid,
        input: NewBudget,
        today: NaiveDate,
    ) -> Result<Budget, CoreError> {
        if input.amount < 0.0 {
            return Err(CoreError::InvalidInput(
                "budget amount must not be negative".into(),
            ));
        }
        let mut budget = Budget::new(
            owner_id,
            input.category,
            input.amount,
            input.period_type,
            today,
        );
        budget.description = input.description;
        self.store.transact(|session| {
            session.save_budget(&budget)?;
            Ok(budget.clone())
        })
    }

    /// Loads one budget, applying the rollover check before returning it.
    pub fn budget(&self, owner_id: Uuid, id: Uuid, today: NaiveDate) -> Result<Budget, CoreError> {
        self.store.transact(|session| {
            let budget = owned_budget(session, owner_id, id)?;
            check_and_reset(session, budget, today)
        })
    }

    /// Lists an owner's budgets, applying the rollover check to each.
    pub fn budgets_for_owner(
        &self,
        owner_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<Budget>, CoreError> {
        self.store.transact(|session| {
            let mut refreshed = Vec::new();
            for budget in session.budgets_for_owner(owner_id)? {
                refreshed.push(check_and_reset(session, budget, today)?);
            }
            Ok(refreshed)
        })
    }

    /// Overwrites the spent amount verbatim after the rollover check.
    ///
    /// The new value is not validated against the allocated amount.
    pub fn set_spent_amount(
        &self,
        owner_id: Uuid,
        id: Uuid,
        amount: f64,
        today: NaiveDate,
    ) -> Result<Budget, CoreError> {
        self.store.transact(|session| {
            let budget = owned_budget(session, owner_id, id)?;
            let mut budget = check_and_reset(session, budget, today)?;
            budget.spent_amount = amount;
            session.save_budget(&budget)?;
            Ok(budget)
        })
    }

    /// Adds `delta` to the spent amount after the rollover check.
    ///
    /// Delta sign is deliberately not validated; negative deltas record spend
    /// reversals.
    pub fn add_to_spent_amount(
        &self,
        owner_id: Uuid,
        id: Uuid,
        delta: f64,
        today: NaiveDate,
    ) -> Result<Budget, CoreError> {
        self.store.transact(|session| {
            let budget = owned_budget(session, owner_id, id)?;
            let mut budget = check_and_reset(session, budget, today)?;
            budget.spent_amount += delta;
            session.save_budget(&budget)?;
            Ok(budget)
        })
    }

    /// Unconditionally zeroes spend and re-anchors the budget to the period
    /// containing `today`.
    ///
    /// Unlike [`check_and_reset`]'s single-step advance, this jumps straight
    /// to the current period; under skipped periods the two paths land on
    /// different reset dates.
    pub fn force_reset(
        &self,
        owner_id: Uuid,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<Budget, CoreError> {
        self.store.transact(|session| {
            let mut budget = owned_budget(session, owner_id, id)?;
            budget.spent_amount = 0.0;
            budget.last_reset_date = period::current_period_start(budget.period_type, today);
            session.save_budget(&budget)?;
            info!(
                budget = %budget.id,
                category = %budget.category,
                last_reset = %budget.last_reset_date,
                "budget force-reset"
            );
            Ok(budget)
        })
    }

    /// Non-mutating filter over all budgets due for a rollover.
    pub fn budgets_needing_reset(&self, today: NaiveDate) -> Result<Vec<Budget>, CoreError> {
        self.store.transact(|session| {
            Ok(session
                .budgets()?
                .into_iter()
                .filter(|budget| {
                    period::needs_reset(budget.period_type, budget.last_reset_date, today)
                })
                .collect())
        })
    }

    /// Applies the rollover check to every due budget, one session each.
    ///
    /// A budget that fails to reset is logged and skipped; it stays due and is
    /// picked up again on the next pass.
    pub fn sweep_resets(&self, today: NaiveDate) -> Result<SweepOutcome, CoreError> {
        let due = self.budgets_needing_reset(today)?;
        let mut outcome = SweepOutcome::default();
        for budget in due {
            let id = budget.id;
            let applied = self.store.transact(|session| {
                let current = session.budget(id)?;
                check_and_reset(session, current, today)
            });
            match applied {
                Ok(_) => outcome.reset += 1,
                Err(err) => {
                    warn!(budget = %id, error = %err, "reset sweep skipped budget");
                    outcome.skipped += 1;
                }
            }
        }
        Ok(outcome)
    }

    pub fn delete_budget(&self, owner_id: Uuid, id: Uuid) -> Result<(), CoreError> {
        self.store.transact(|session| {
            let budget = owned_budget(session, owner_id, id)?;
            session.delete_budget(budget.id)
        })
    }
}

fn owned_budget(
    session: &dyn StoreSession,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Budget, CoreError> {
    let budget = session.budget(id)?;
    if budget.owner_id != owner_id {
        return Err(CoreError::BudgetNotFound(id));
    }
    Ok(budget)
}

/// Applies at most one rollover step within the caller's session.
///
/// When several periods have elapsed since the last check, each invocation
/// advances by exactly one period; catching up takes repeated calls.
fn check_and_reset(
    session: &mut dyn StoreSession,
    mut budget: Budget,
    today: NaiveDate,
) -> Result<Budget, CoreError> {
    if !period::needs_reset(budget.period_type, budget.last_reset_date, today) {
        return Ok(budget);
    }
    budget.last_reset_date = period::next_period_start(budget.period_type, budget.last_reset_date);
    budget.spent_amount = 0.0;
    session.save_budget(&budget)?;
    info!(
        budget = %budget.id,
        category = %budget.category,
        period = %budget.period_type,
        last_reset = %budget.last_reset_date,
        "budget reset"
    );
    Ok(budget)
}
