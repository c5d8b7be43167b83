use super::value_objects::ValueObjectError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ExpenseError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Expense not found: {0}")]
  NotFound(Uuid),

  #[error("Export failed: {0}")]
  ExportFailed(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
