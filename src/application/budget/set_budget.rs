use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::budget::{Budget, BudgetError, BudgetService};
use crate::domain::expense::{Amount, Category, Month};

#[derive(Debug, Deserialize)]
pub struct SetBudgetCommand {
  pub user_id: Uuid,
  pub month: String,
  /// Absent or blank sets the overall budget for the month
  pub category: Option<String>,
  pub limit_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetDto {
  pub id: Uuid,
  pub month: String,
  pub category: Option<String>,
  pub limit_amount: Decimal,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Budget> for BudgetDto {
  fn from(budget: Budget) -> Self {
    Self {
      id: budget.id,
      month: budget.month.to_string(),
      category: budget.category.map(Category::into_inner),
      limit_amount: budget.limit_amount.value(),
      created_at: budget.created_at,
      updated_at: budget.updated_at,
    }
  }
}

pub struct SetBudgetUseCase {
  budget_service: Arc<BudgetService>,
}

impl SetBudgetUseCase {
  pub fn new(budget_service: Arc<BudgetService>) -> Self {
    Self { budget_service }
  }

  pub async fn execute(&self, command: SetBudgetCommand) -> Result<BudgetDto, BudgetError> {
    let month: Month = command.month.parse()?;
    let category = budget_category(command.category)?;
    let limit_amount = Amount::new(command.limit_amount)?;

    let budget = self
      .budget_service
      .set_budget(command.user_id, month, category, limit_amount)
      .await?;

    Ok(budget.into())
  }
}

/// Blank categories address the overall budget
pub(super) fn budget_category(category: Option<String>) -> Result<Option<Category>, BudgetError> {
  match category {
    Some(value) if !value.trim().is_empty() => Ok(Some(Category::new(value)?)),
    _ => Ok(None),
  }
}
