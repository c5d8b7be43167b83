use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::create_expense::expense_data;
use super::list_expenses::ExpenseDto;
use crate::domain::expense::{ExpenseError, ExpenseService};

/// Full replacement of an expense's editable fields
#[derive(Debug, Deserialize)]
pub struct UpdateExpenseCommand {
  pub user_id: Uuid,
  pub expense_id: Uuid,
  pub amount: Decimal,
  pub category: String,
  pub date: NaiveDate,
  pub description: Option<String>,
}

pub struct UpdateExpenseUseCase {
  expense_service: Arc<ExpenseService>,
}

impl UpdateExpenseUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(&self, command: UpdateExpenseCommand) -> Result<ExpenseDto, ExpenseError> {
    let data = expense_data(
      command.amount,
      command.category,
      command.date,
      command.description,
    )?;

    let expense = self
      .expense_service
      .update_expense(command.user_id, command.expense_id, data)
      .await?;

    Ok(expense.into())
  }
}
