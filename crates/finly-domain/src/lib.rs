//! finly-domain
//!
//! Pure domain models (Budget, Goal, Transaction) and period arithmetic.
//! No I/O, no storage. Only data types, core enums, and date math.

pub mod budget;
pub mod common;
pub mod goal;
pub mod period;
pub mod transaction;

pub use budget::*;
pub use common::*;
pub use goal::*;
pub use period::*;
pub use transaction::*;
