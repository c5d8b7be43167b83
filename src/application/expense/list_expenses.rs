use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::expense::{
  Category, DateRange, Expense, ExpenseError, ExpenseFilter, ExpenseService,
};

#[derive(Debug, Deserialize)]
pub struct ListExpensesCommand {
  pub user_id: Uuid,
  pub from: Option<NaiveDate>,
  pub to: Option<NaiveDate>,
  pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseDto {
  pub id: Uuid,
  pub amount: Decimal,
  pub category: String,
  pub date: NaiveDate,
  pub description: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseDto {
  fn from(expense: Expense) -> Self {
    Self {
      id: expense.id,
      amount: expense.amount.value(),
      category: expense.category.into_inner(),
      date: expense.date,
      description: expense.description.map(|d| d.value().to_string()),
      created_at: expense.created_at,
      updated_at: expense.updated_at,
    }
  }
}

pub struct ListExpensesUseCase {
  expense_service: Arc<ExpenseService>,
}

impl ListExpensesUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  /// Lists the caller's expenses, newest first
  pub async fn execute(&self, command: ListExpensesCommand) -> Result<Vec<ExpenseDto>, ExpenseError> {
    if let (Some(from), Some(to)) = (command.from, command.to) {
      DateRange::new(from, to)?;
    }

    let filter = ExpenseFilter {
      from: command.from,
      to: command.to,
      ..ExpenseFilter::all()
    }
    .with_category(category_filter(command.category)?);

    let expenses = self
      .expense_service
      .list_expenses(command.user_id, filter)
      .await?;

    Ok(expenses.into_iter().map(ExpenseDto::from).collect())
  }
}

/// Blank `?category=` means no category filter
pub(super) fn category_filter(category: Option<String>) -> Result<Option<Category>, ExpenseError> {
  match category {
    Some(value) if !value.trim().is_empty() => Ok(Some(Category::new(value)?)),
    _ => Ok(None),
  }
}
