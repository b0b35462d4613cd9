//! Shared traits for records kept in the finance store.

use uuid::Uuid;

/// Exposes a stable identifier for stored records.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Associates a record with the owner it belongs to.
pub trait OwnedRecord {
    fn owner_id(&self) -> Uuid;
}
