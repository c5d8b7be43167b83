use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::expense::{ExpenseError, ExpenseService};

#[derive(Debug, Deserialize)]
pub struct DeleteExpenseCommand {
  pub user_id: Uuid,
  pub expense_id: Uuid,
}

pub struct DeleteExpenseUseCase {
  expense_service: Arc<ExpenseService>,
}

impl DeleteExpenseUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(&self, command: DeleteExpenseCommand) -> Result<(), ExpenseError> {
    self
      .expense_service
      .delete_expense(command.user_id, command.expense_id)
      .await
  }
}
