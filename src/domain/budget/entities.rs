use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::expense::{Amount, Category, Month};

/// Spending limit for one month, either overall (`category == None`) or for a
/// single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
  pub id: Uuid,
  pub user_id: Uuid,
  pub month: Month,
  pub category: Option<Category>,
  pub limit_amount: Amount,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Budget {
  pub fn new(user_id: Uuid, month: Month, category: Option<Category>, limit_amount: Amount) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      month,
      category,
      limit_amount,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn set_limit(&mut self, limit_amount: Amount) {
    self.limit_amount = limit_amount;
    self.updated_at = Utc::now();
  }

  pub fn is_overall(&self) -> bool {
    self.category.is_none()
  }

  pub fn status(self, spent: Decimal) -> BudgetStatus {
    let limit = self.limit_amount.value();
    BudgetStatus {
      remaining: limit - spent,
      exceeded: spent > limit,
      spent,
      budget: self,
    }
  }
}

/// Budget together with what has been spent against it so far
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
  pub budget: Budget,
  pub spent: Decimal,
  pub remaining: Decimal,
  pub exceeded: bool,
}
