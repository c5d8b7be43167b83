use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Budget;
use super::errors::BudgetError;
use crate::domain::expense::{Category, Month};

#[async_trait]
pub trait BudgetRepository: Send + Sync {
  /// Inserts the budget, or replaces the limit of the existing budget with the
  /// same `(user_id, month, category)`. Returns the stored row.
  async fn upsert(&self, budget: Budget) -> Result<Budget, BudgetError>;

  async fn find(
    &self,
    user_id: Uuid,
    month: Month,
    category: Option<&Category>,
  ) -> Result<Option<Budget>, BudgetError>;

  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Budget>, BudgetError>;
}
