use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::expense::{DateRange, ExpenseError, ExpenseExporter, ExpenseService};

#[derive(Debug, Deserialize)]
pub struct ExportExpensesCommand {
  pub user_id: Uuid,
  pub from_date: NaiveDate,
  pub to_date: NaiveDate,
}

/// Rendered export, ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct ExportExpensesResponse {
  pub filename: String,
  pub content_type: &'static str,
  pub content: Vec<u8>,
}

pub struct ExportExpensesUseCase {
  expense_service: Arc<ExpenseService>,
  exporter: Arc<dyn ExpenseExporter>,
}

impl ExportExpensesUseCase {
  pub fn new(expense_service: Arc<ExpenseService>, exporter: Arc<dyn ExpenseExporter>) -> Self {
    Self {
      expense_service,
      exporter,
    }
  }

  /// Exports the expenses dated within `[from_date, to_date]`, oldest first
  pub async fn execute(
    &self,
    command: ExportExpensesCommand,
  ) -> Result<ExportExpensesResponse, ExpenseError> {
    let range = DateRange::new(command.from_date, command.to_date)?;

    let expenses = self
      .expense_service
      .expenses_in_range(command.user_id, range)
      .await?;
    let content = self.exporter.export(&expenses)?;

    tracing::info!(
      user_id = %command.user_id,
      from = %command.from_date,
      to = %command.to_date,
      count = expenses.len(),
      "Expenses exported"
    );

    Ok(ExportExpensesResponse {
      filename: format!("expenses.{}", self.exporter.file_extension()),
      content_type: self.exporter.content_type(),
      content,
    })
  }
}
