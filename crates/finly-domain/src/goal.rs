//! Savings goal records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, OwnedRecord};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub target_amount: f64,
    /// Progresses toward `target_amount` but is never clamped to it.
    pub saved_amount: f64,
}

impl Goal {
    pub fn new(owner_id: Uuid, name: impl Into<String>, target_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            target_amount,
            saved_amount: 0.0,
        }
    }
}

impl Identifiable for Goal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl OwnedRecord for Goal {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}
