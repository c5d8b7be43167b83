use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::set_budget::{BudgetDto, budget_category};
use crate::domain::budget::{BudgetError, BudgetService};
use crate::domain::expense::Month;

#[derive(Debug, Deserialize)]
pub struct GetBudgetStatusCommand {
  pub user_id: Uuid,
  pub month: String,
  pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatusResponse {
  pub budget: BudgetDto,
  pub spent: Decimal,
  /// Negative once the budget is exceeded
  pub remaining: Decimal,
  pub exceeded: bool,
}

/// Compares a budget against what has been spent in its month
pub struct GetBudgetStatusUseCase {
  budget_service: Arc<BudgetService>,
}

impl GetBudgetStatusUseCase {
  pub fn new(budget_service: Arc<BudgetService>) -> Self {
    Self { budget_service }
  }

  pub async fn execute(
    &self,
    command: GetBudgetStatusCommand,
  ) -> Result<BudgetStatusResponse, BudgetError> {
    let month: Month = command.month.parse()?;
    let category = budget_category(command.category)?;

    let status = self
      .budget_service
      .budget_status(command.user_id, month, category)
      .await?;

    Ok(BudgetStatusResponse {
      budget: status.budget.into(),
      spent: status.spent,
      remaining: status.remaining,
      exceeded: status.exceeded,
    })
  }
}
