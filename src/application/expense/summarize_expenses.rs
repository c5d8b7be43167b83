use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::list_expenses::category_filter;
use crate::domain::expense::{Category, ExpenseError, ExpenseFilter, ExpenseService, Month};

#[derive(Debug, Deserialize)]
pub struct SummarizeExpensesCommand {
  pub user_id: Uuid,
  /// `YYYY-MM`; all time when absent
  pub month: Option<String>,
  pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummaryResponse {
  pub total: Decimal,
  pub count: i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub month: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
}

pub struct SummarizeExpensesUseCase {
  expense_service: Arc<ExpenseService>,
}

impl SummarizeExpensesUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(
    &self,
    command: SummarizeExpensesCommand,
  ) -> Result<ExpenseSummaryResponse, ExpenseError> {
    let month = command.month.as_deref().map(str::parse::<Month>).transpose()?;
    let category = category_filter(command.category)?;

    let filter = month
      .map(ExpenseFilter::for_month)
      .unwrap_or_default()
      .with_category(category.clone());

    let summary = self
      .expense_service
      .summarize(command.user_id, filter)
      .await?;

    Ok(ExpenseSummaryResponse {
      total: summary.total,
      count: summary.count,
      month: month.map(|m| m.to_string()),
      category: category.map(Category::into_inner),
    })
  }
}
