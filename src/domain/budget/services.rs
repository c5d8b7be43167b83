use std::cmp::Ordering;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Budget, BudgetStatus};
use super::errors::BudgetError;
use super::ports::BudgetRepository;
use crate::domain::expense::{Amount, Category, ExpenseFilter, ExpenseRepository, Month};

pub struct BudgetService {
  budget_repo: Arc<dyn BudgetRepository>,
  expense_repo: Arc<dyn ExpenseRepository>,
}

impl BudgetService {
  pub fn new(
    budget_repo: Arc<dyn BudgetRepository>,
    expense_repo: Arc<dyn ExpenseRepository>,
  ) -> Self {
    Self {
      budget_repo,
      expense_repo,
    }
  }

  pub async fn set_budget(
    &self,
    user_id: Uuid,
    month: Month,
    category: Option<Category>,
    limit_amount: Amount,
  ) -> Result<Budget, BudgetError> {
    let budget = match self
      .budget_repo
      .find(user_id, month, category.as_ref())
      .await?
    {
      Some(mut existing) => {
        existing.set_limit(limit_amount);
        existing
      }
      None => Budget::new(user_id, month, category, limit_amount),
    };

    let stored = self.budget_repo.upsert(budget).await?;
    tracing::debug!(
      user_id = %user_id,
      month = %stored.month,
      category = ?stored.category.as_ref().map(Category::value),
      "Budget set"
    );
    Ok(stored)
  }

  pub async fn get_budget(
    &self,
    user_id: Uuid,
    month: Month,
    category: Option<Category>,
  ) -> Result<Budget, BudgetError> {
    self
      .budget_repo
      .find(user_id, month, category.as_ref())
      .await?
      .ok_or_else(|| BudgetError::NotFound {
        month,
        category: category.map(Category::into_inner),
      })
  }

  /// All budgets of the user, newest month first and the overall budget of a
  /// month ahead of its category budgets
  pub async fn list_budgets(&self, user_id: Uuid) -> Result<Vec<Budget>, BudgetError> {
    let mut budgets = self.budget_repo.find_by_user(user_id).await?;
    budgets.sort_by(compare_budgets);
    Ok(budgets)
  }

  pub async fn budget_status(
    &self,
    user_id: Uuid,
    month: Month,
    category: Option<Category>,
  ) -> Result<BudgetStatus, BudgetError> {
    let budget = self.get_budget(user_id, month, category).await?;

    let filter = ExpenseFilter::for_month(budget.month).with_category(budget.category.clone());
    let summary = self.expense_repo.summarize(user_id, &filter).await?;

    Ok(budget.status(summary.total))
  }
}

fn compare_budgets(a: &Budget, b: &Budget) -> Ordering {
  b.month.cmp(&a.month).then_with(|| {
    match (&a.category, &b.category) {
      (None, None) => Ordering::Equal,
      (None, Some(_)) => Ordering::Less,
      (Some(_), None) => Ordering::Greater,
      (Some(x), Some(y)) => x.value().cmp(y.value()),
    }
  })
}
