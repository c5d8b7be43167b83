use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{CategoryTotal, Expense, ExpenseFilter, ExpenseSummary};
use super::errors::ExpenseError;

/// Persistence for expenses.
///
/// Every lookup is scoped by `user_id`: a record owned by someone else is
/// reported exactly like a missing one.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
  async fn create(&self, expense: Expense) -> Result<Expense, ExpenseError>;

  async fn update(&self, expense: Expense) -> Result<Expense, ExpenseError>;

  async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Expense>, ExpenseError>;

  /// Returns `false` when nothing was deleted
  async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, ExpenseError>;

  async fn find_by_user(
    &self,
    user_id: Uuid,
    filter: &ExpenseFilter,
  ) -> Result<Vec<Expense>, ExpenseError>;

  async fn summarize(
    &self,
    user_id: Uuid,
    filter: &ExpenseFilter,
  ) -> Result<ExpenseSummary, ExpenseError>;

  async fn totals_by_category(
    &self,
    user_id: Uuid,
    filter: &ExpenseFilter,
  ) -> Result<Vec<CategoryTotal>, ExpenseError>;
}

/// Serializes a list of expenses into a downloadable document
pub trait ExpenseExporter: Send + Sync {
  fn content_type(&self) -> &'static str;

  fn file_extension(&self) -> &'static str;

  fn export(&self, expenses: &[Expense]) -> Result<Vec<u8>, ExpenseError>;
}
