//! finly-core
//!
//! Business logic and services for the finance tracker: the budget rollover
//! engine, spend mutations, goal/ledger paired writes, and aggregation reads.
//! Depends on finly-domain. No CLI, no terminal I/O; persistence goes through
//! the [`store::FinanceStore`] abstraction.

pub mod budget_service;
pub mod error;
pub mod goal_service;
pub mod store;
pub mod summary_service;
pub mod transaction_service;

pub use budget_service::*;
pub use error::{CoreError, ErrorKind};
pub use goal_service::*;
pub use store::{FinanceStore, MemoryStore, StoreSession, Tables};
pub use summary_service::*;
pub use transaction_service::*;
