use thiserror::Error;

use crate::domain::expense::{ExpenseError, Month, ValueObjectError};

#[derive(Debug, Error)]
pub enum BudgetError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Budget not found for {month}")]
  NotFound {
    month: Month,
    category: Option<String>,
  },

  #[error(transparent)]
  Expense(#[from] ExpenseError),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
