use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::set_budget::{BudgetDto, budget_category};
use crate::domain::budget::{BudgetError, BudgetService};
use crate::domain::expense::Month;

#[derive(Debug, Deserialize)]
pub struct GetBudgetCommand {
  pub user_id: Uuid,
  pub month: String,
  pub category: Option<String>,
}

pub struct GetBudgetUseCase {
  budget_service: Arc<BudgetService>,
}

impl GetBudgetUseCase {
  pub fn new(budget_service: Arc<BudgetService>) -> Self {
    Self { budget_service }
  }

  pub async fn execute(&self, command: GetBudgetCommand) -> Result<BudgetDto, BudgetError> {
    let month: Month = command.month.parse()?;
    let category = budget_category(command.category)?;

    let budget = self
      .budget_service
      .get_budget(command.user_id, month, category)
      .await?;

    Ok(budget.into())
  }
}
