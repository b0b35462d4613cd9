mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use common::FailingStore;
use finly::{
    BudgetService, Config, ErrorKind, JsonFinanceStore, NewBudget, PeriodType, SweepOutcome,
};
use tempfile::tempdir;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_budget(period_type: PeriodType, category: &str, amount: f64) -> NewBudget {
    NewBudget {
        category: category.into(),
        amount,
        description: None,
        period_type,
    }
}

#[test]
fn lazy_rollover_steps_one_period_per_check() {
    let dir = tempdir().expect("tempdir");
    let mut config = Config::default();
    config.data_root = Some(dir.path().to_path_buf());
    let store = Arc::new(JsonFinanceStore::with_config(&config).expect("open store"));
    let service = BudgetService::new(store);
    let owner_id = Uuid::new_v4();

    let period_type: PeriodType = config
        .default_period_type
        .parse()
        .expect("config period type parses");
    let budget = service
        .create_budget(
            owner_id,
            new_budget(period_type, "Groceries", 300.0),
            date(2024, 1, 10),
        )
        .expect("create budget");
    assert_eq!(budget.last_reset_date, date(2024, 1, 1));

    service
        .add_to_spent_amount(owner_id, budget.id, 50.0, date(2024, 1, 12))
        .expect("record spend");

    // Two periods behind: the first check advances one step only.
    let stepped = service
        .budget(owner_id, budget.id, date(2024, 3, 15))
        .expect("first check");
    assert_eq!(stepped.spent_amount, 0.0);
    assert_eq!(stepped.last_reset_date, date(2024, 2, 1));
    assert_eq!(stepped.remaining_amount(), stepped.amount - stepped.spent_amount);

    let caught_up = service
        .budget(owner_id, budget.id, date(2024, 3, 15))
        .expect("second check");
    assert_eq!(caught_up.last_reset_date, date(2024, 3, 1));
}

#[test]
fn force_reset_diverges_from_lazy_path_under_skipped_periods() {
    let store = Arc::new(FailingStore::new());
    let service = BudgetService::new(store);
    let owner_id = Uuid::new_v4();

    let budget = service
        .create_budget(
            owner_id,
            new_budget(PeriodType::Monthly, "Dining", 150.0),
            date(2024, 1, 5),
        )
        .expect("create budget");
    service
        .set_spent_amount(owner_id, budget.id, 50.0, date(2024, 1, 5))
        .expect("record spend");

    let forced = service
        .force_reset(owner_id, budget.id, date(2024, 3, 15))
        .expect("force reset");
    assert_eq!(forced.spent_amount, 0.0);
    // Direct-to-current alignment, not the single-step 2024-02-01.
    assert_eq!(forced.last_reset_date, date(2024, 3, 1));

    let repeated = service
        .force_reset(owner_id, budget.id, date(2024, 3, 15))
        .expect("idempotent repeat");
    assert_eq!(repeated, forced);
}

#[test]
fn yearly_budgets_roll_on_year_boundaries() {
    let store = Arc::new(FailingStore::new());
    let service = BudgetService::new(store);
    let owner_id = Uuid::new_v4();

    let budget = service
        .create_budget(
            owner_id,
            new_budget(PeriodType::Yearly, "Insurance", 1200.0),
            date(2023, 4, 20),
        )
        .expect("create budget");
    assert_eq!(budget.last_reset_date, date(2023, 1, 1));

    let unchanged = service
        .budget(owner_id, budget.id, date(2023, 12, 31))
        .expect("same year");
    assert_eq!(unchanged.last_reset_date, date(2023, 1, 1));

    let rolled = service
        .budget(owner_id, budget.id, date(2024, 1, 1))
        .expect("new year");
    assert_eq!(rolled.last_reset_date, date(2024, 1, 1));
    assert_eq!(rolled.spent_amount, 0.0);
}

#[test]
fn sweep_skips_failing_budget_and_resets_the_rest() {
    let store = Arc::new(FailingStore::new());
    let service = BudgetService::new(store.clone());
    let owner_id = Uuid::new_v4();

    let healthy = service
        .create_budget(
            owner_id,
            new_budget(PeriodType::Monthly, "Groceries", 300.0),
            date(2024, 1, 10),
        )
        .expect("create healthy budget");
    let broken = service
        .create_budget(
            owner_id,
            new_budget(PeriodType::Monthly, "Transport", 80.0),
            date(2024, 1, 10),
        )
        .expect("create broken budget");
    store.fail_budget_save(broken.id);

    let outcome = service.sweep_resets(date(2024, 2, 5)).expect("sweep");
    assert_eq!(outcome, SweepOutcome { reset: 1, skipped: 1 });

    let healthy_after = service
        .budget(owner_id, healthy.id, date(2024, 2, 5))
        .expect("healthy refreshed");
    assert_eq!(healthy_after.last_reset_date, date(2024, 2, 1));

    // The skipped budget stays due for the next pass.
    let due = service
        .budgets_needing_reset(date(2024, 2, 5))
        .expect("list due");
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, broken.id);
}

#[test]
fn spend_mutation_failures_do_not_partially_apply() {
    let store = Arc::new(FailingStore::new());
    let service = BudgetService::new(store.clone());
    let owner_id = Uuid::new_v4();

    let budget = service
        .create_budget(
            owner_id,
            new_budget(PeriodType::Monthly, "Hobbies", 60.0),
            date(2024, 1, 10),
        )
        .expect("create budget");
    service
        .add_to_spent_amount(owner_id, budget.id, 20.0, date(2024, 1, 11))
        .expect("seed spend");

    store.fail_budget_save(budget.id);
    let err = service
        .add_to_spent_amount(owner_id, budget.id, 5.0, date(2024, 1, 12))
        .expect_err("write fails");
    assert_eq!(err.kind(), ErrorKind::Storage);

    // No reset is due, so the read path performs no save and succeeds.
    let stored = service
        .budget(owner_id, budget.id, date(2024, 1, 12))
        .expect("load after failed write");
    assert_eq!(stored.spent_amount, 20.0, "failed delta must not land");
}
