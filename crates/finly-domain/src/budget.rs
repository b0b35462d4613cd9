//! Budget records with periodic spend tracking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::{Identifiable, OwnedRecord},
    period::{self, PeriodType},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category: String,
    /// Allocated amount for one period.
    pub amount: f64,
    /// Spend accumulated within the current period. Not bounded by `amount`;
    /// over-budget states are representable.
    pub spent_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub period_type: PeriodType,
    /// First day of the period currently being tracked.
    pub last_reset_date: NaiveDate,
}

impl Budget {
    pub fn new(
        owner_id: Uuid,
        category: impl Into<String>,
        amount: f64,
        period_type: PeriodType,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            category: category.into(),
            amount,
            spent_amount: 0.0,
            description: None,
            period_type,
            last_reset_date: period::current_period_start(period_type, today),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Derived, never stored.
    pub fn remaining_amount(&self) -> f64 {
        self.amount - self.spent_amount
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl OwnedRecord for Budget {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}
