use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::expense::{CategoryTotal, ExpenseError, ExpenseFilter, ExpenseService, Month};

#[derive(Debug, Deserialize)]
pub struct ReportByCategoryCommand {
  pub user_id: Uuid,
  pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotalDto {
  pub category: String,
  pub total: Decimal,
  pub count: i64,
}

impl From<CategoryTotal> for CategoryTotalDto {
  fn from(total: CategoryTotal) -> Self {
    Self {
      category: total.category,
      total: total.total,
      count: total.count,
    }
  }
}

/// Spending per category, largest total first
pub struct ReportByCategoryUseCase {
  expense_service: Arc<ExpenseService>,
}

impl ReportByCategoryUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(
    &self,
    command: ReportByCategoryCommand,
  ) -> Result<Vec<CategoryTotalDto>, ExpenseError> {
    let filter = command
      .month
      .as_deref()
      .map(str::parse::<Month>)
      .transpose()?
      .map(ExpenseFilter::for_month)
      .unwrap_or_default();

    let totals = self
      .expense_service
      .totals_by_category(command.user_id, filter)
      .await?;

    Ok(totals.into_iter().map(CategoryTotalDto::from).collect())
  }
}
