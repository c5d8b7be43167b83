use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{CategoryTotal, DateOrder, Expense, ExpenseFilter, ExpenseSummary};
use super::errors::ExpenseError;
use super::ports::ExpenseRepository;
use super::value_objects::{Amount, Category, DateRange, Description};

/// Validated expense fields, used for both creation and full replacement
pub struct ExpenseData {
  pub amount: Amount,
  pub category: Category,
  pub date: NaiveDate,
  pub description: Option<Description>,
}

pub struct ExpenseService {
  expense_repo: Arc<dyn ExpenseRepository>,
}

impl ExpenseService {
  pub fn new(expense_repo: Arc<dyn ExpenseRepository>) -> Self {
    Self { expense_repo }
  }

  pub async fn create_expense(
    &self,
    user_id: Uuid,
    data: ExpenseData,
  ) -> Result<Expense, ExpenseError> {
    let expense = Expense::new(
      user_id,
      data.amount,
      data.category,
      data.date,
      data.description,
    );
    let created = self.expense_repo.create(expense).await?;

    tracing::debug!(user_id = %user_id, expense_id = %created.id, "Expense created");
    Ok(created)
  }

  pub async fn update_expense(
    &self,
    user_id: Uuid,
    expense_id: Uuid,
    data: ExpenseData,
  ) -> Result<Expense, ExpenseError> {
    let mut expense = self.get_expense(user_id, expense_id).await?;

    expense.update(data.amount, data.category, data.date, data.description);
    self.expense_repo.update(expense).await
  }

  pub async fn delete_expense(&self, user_id: Uuid, expense_id: Uuid) -> Result<(), ExpenseError> {
    if !self.expense_repo.delete(user_id, expense_id).await? {
      return Err(ExpenseError::NotFound(expense_id));
    }

    tracing::debug!(user_id = %user_id, expense_id = %expense_id, "Expense deleted");
    Ok(())
  }

  pub async fn get_expense(&self, user_id: Uuid, expense_id: Uuid) -> Result<Expense, ExpenseError> {
    self
      .expense_repo
      .find_by_id(user_id, expense_id)
      .await?
      .ok_or(ExpenseError::NotFound(expense_id))
  }

  pub async fn list_expenses(
    &self,
    user_id: Uuid,
    filter: ExpenseFilter,
  ) -> Result<Vec<Expense>, ExpenseError> {
    self.expense_repo.find_by_user(user_id, &filter).await
  }

  /// Expenses dated within the inclusive range, oldest first
  pub async fn expenses_in_range(
    &self,
    user_id: Uuid,
    range: DateRange,
  ) -> Result<Vec<Expense>, ExpenseError> {
    let filter = ExpenseFilter::for_range(range).ordered(DateOrder::OldestFirst);
    self.expense_repo.find_by_user(user_id, &filter).await
  }

  pub async fn summarize(
    &self,
    user_id: Uuid,
    filter: ExpenseFilter,
  ) -> Result<ExpenseSummary, ExpenseError> {
    self.expense_repo.summarize(user_id, &filter).await
  }

  pub async fn totals_by_category(
    &self,
    user_id: Uuid,
    filter: ExpenseFilter,
  ) -> Result<Vec<CategoryTotal>, ExpenseError> {
    let mut totals = self.expense_repo.totals_by_category(user_id, &filter).await?;

    totals.sort_by(|a, b| {
      b.total
        .cmp(&a.total)
        .then_with(|| a.category.cmp(&b.category))
    });
    Ok(totals)
  }
}
