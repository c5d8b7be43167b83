use std::sync::Arc;
use uuid::Uuid;

use super::list_expenses::ExpenseDto;
use crate::domain::expense::{ExpenseError, ExpenseService};

pub struct GetExpenseUseCase {
  expense_service: Arc<ExpenseService>,
}

impl GetExpenseUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(&self, user_id: Uuid, expense_id: Uuid) -> Result<ExpenseDto, ExpenseError> {
    let expense = self
      .expense_service
      .get_expense(user_id, expense_id)
      .await?;

    Ok(expense.into())
  }
}
