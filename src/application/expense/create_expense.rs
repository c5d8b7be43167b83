use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::list_expenses::ExpenseDto;
use crate::domain::expense::{
  Amount, Category, Description, ExpenseData, ExpenseError, ExpenseService,
};

#[derive(Debug, Deserialize)]
pub struct CreateExpenseCommand {
  pub user_id: Uuid,
  pub amount: Decimal,
  pub category: String,
  pub date: NaiveDate,
  pub description: Option<String>,
}

pub struct CreateExpenseUseCase {
  expense_service: Arc<ExpenseService>,
}

impl CreateExpenseUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(&self, command: CreateExpenseCommand) -> Result<ExpenseDto, ExpenseError> {
    let data = expense_data(
      command.amount,
      command.category,
      command.date,
      command.description,
    )?;

    let expense = self
      .expense_service
      .create_expense(command.user_id, data)
      .await?;

    Ok(expense.into())
  }
}

/// Validates raw expense fields into domain values
pub(super) fn expense_data(
  amount: Decimal,
  category: String,
  date: NaiveDate,
  description: Option<String>,
) -> Result<ExpenseData, ExpenseError> {
  Ok(ExpenseData {
    amount: Amount::new(amount)?,
    category: Category::new(category)?,
    date,
    description: Description::parse(description)?,
  })
}
