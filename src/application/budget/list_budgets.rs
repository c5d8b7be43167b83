use std::sync::Arc;
use uuid::Uuid;

use super::set_budget::BudgetDto;
use crate::domain::budget::{BudgetError, BudgetService};

pub struct ListBudgetsUseCase {
  budget_service: Arc<BudgetService>,
}

impl ListBudgetsUseCase {
  pub fn new(budget_service: Arc<BudgetService>) -> Self {
    Self { budget_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<Vec<BudgetDto>, BudgetError> {
    let budgets = self.budget_service.list_budgets(user_id).await?;
    Ok(budgets.into_iter().map(BudgetDto::from).collect())
  }
}
