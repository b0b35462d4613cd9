#![doc(test(attr(deny(warnings))))]

//! Finly offers budget rollover, savings-goal, and ledger primitives that
//! power higher level personal-finance workflows.
//!
//! The heavy lifting lives in the member crates; this facade re-exports the
//! pieces an embedding application needs and owns global tracing setup.

pub use finly_config::{Config, ConfigError, ConfigManager};
pub use finly_core::{
    BudgetService, Contribution, CoreError, DashboardSummary, ErrorKind, FinanceStore,
    GoalService, MemoryStore, NewBudget, NewGoal, NewTransaction, StoreSession, SummaryService,
    SweepOutcome, Tables, TransactionService, CONTRIBUTION_CATEGORY, RECLAIM_CATEGORY,
    SYSTEM_PAYMENT_METHOD,
};
pub use finly_domain::{
    period, Budget, Goal, PeriodType, Transaction, TransactionKind, TransactionStatus,
};
pub use finly_storage_json::JsonFinanceStore;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive("finly=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Finly tracing initialized.");
    });
}
