//! Direct ledger entry management.
//!
//! Entries are immutable once created except for status transitions. Budget
//! resets never create entries here; goal flows synthesize theirs through
//! [`crate::GoalService`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use finly_domain::{Transaction, TransactionKind, TransactionStatus};

use crate::{
    store::{FinanceStore, StoreSession},
    CoreError,
};

/// Input for recording a ledger entry.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub kind: TransactionKind,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
    pub payment_method: Option<String>,
}

pub struct TransactionService<S> {
    store: Arc<S>,
}

impl<S: FinanceStore> TransactionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Records a new ledger entry. Amounts carry no sign; direction lives in
    /// the kind, so non-positive amounts are rejected.
    pub fn add_transaction(
        &self,
        owner_id: Uuid,
        input: NewTransaction,
    ) -> Result<Transaction, CoreError> {
        if input.amount <= 0.0 {
            return Err(CoreError::InvalidInput(
                "transaction amount must be positive".into(),
            ));
        }
        let mut entry = Transaction::new(
            owner_id,
            input.amount,
            input.category,
            input.kind,
            input.timestamp,
        )
        .with_status(input.status);
        entry.description = input.description;
        entry.payment_method = input.payment_method;
        self.store.transact(|session| {
            session.save_transaction(&entry)?;
            Ok(entry.clone())
        })
    }

    pub fn transaction(&self, owner_id: Uuid, id: Uuid) -> Result<Transaction, CoreError> {
        self.store
            .transact(|session| owned_transaction(session, owner_id, id))
    }

    pub fn transactions_for_owner(&self, owner_id: Uuid) -> Result<Vec<Transaction>, CoreError> {
        self.store
            .transact(|session| session.transactions_for_owner(owner_id))
    }

    /// Status is the only mutable field of a ledger entry.
    pub fn update_status(
        &self,
        owner_id: Uuid,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Transaction, CoreError> {
        self.store.transact(|session| {
            let mut entry = owned_transaction(session, owner_id, id)?;
            entry.status = status;
            session.save_transaction(&entry)?;
            Ok(entry)
        })
    }

    pub fn delete_transaction(&self, owner_id: Uuid, id: Uuid) -> Result<(), CoreError> {
        self.store.transact(|session| {
            let entry = owned_transaction(session, owner_id, id)?;
            session.delete_transaction(entry.id)
        })
    }
}

fn owned_transaction(
    session: &dyn StoreSession,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Transaction, CoreError> {
    let entry = session.transaction(id)?;
    if entry.owner_id != owner_id {
        return Err(CoreError::TransactionNotFound(id));
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::ErrorKind;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-02T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn sample_input() -> NewTransaction {
        NewTransaction {
            amount: 80.0,
            category: "Utilities".into(),
            description: Some("Electricity bill".into()),
            kind: TransactionKind::Expense,
            timestamp: now(),
            status: TransactionStatus::Pending,
            payment_method: Some("bank transfer".into()),
        }
    }

    #[test]
    fn add_then_settle_status() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));
        let owner_id = Uuid::new_v4();
        let entry = service
            .add_transaction(owner_id, sample_input())
            .expect("add entry");
        assert_eq!(entry.status, TransactionStatus::Pending);

        let settled = service
            .update_status(owner_id, entry.id, TransactionStatus::Completed)
            .expect("settle");
        assert_eq!(settled.status, TransactionStatus::Completed);
        // Everything but status is untouched.
        assert_eq!(settled.amount, entry.amount);
        assert_eq!(settled.category, entry.category);
        assert_eq!(settled.timestamp, entry.timestamp);
    }

    #[test]
    fn add_rejects_non_positive_amounts() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));
        let owner_id = Uuid::new_v4();
        let mut input = sample_input();
        input.amount = -80.0;
        let err = service
            .add_transaction(owner_id, input)
            .expect_err("negative amount");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn delete_is_owner_scoped() {
        let service = TransactionService::new(Arc::new(MemoryStore::new()));
        let owner_id = Uuid::new_v4();
        let entry = service
            .add_transaction(owner_id, sample_input())
            .expect("add entry");

        let err = service
            .delete_transaction(Uuid::new_v4(), entry.id)
            .expect_err("foreign owner");
        assert_eq!(err.kind(), ErrorKind::NotFound);

        service
            .delete_transaction(owner_id, entry.id)
            .expect("owner delete");
        assert!(service
            .transactions_for_owner(owner_id)
            .expect("list")
            .is_empty());
    }
}
