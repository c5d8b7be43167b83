use crate::domain::expense::{Expense, ExpenseError, ExpenseExporter};

const HEADER: [&str; 4] = ["Date", "Category", "Amount", "Description"];

/// Writes expenses as comma-separated values, one row per expense in the
/// order given, preceded by a header row. Amounts always carry two decimals.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExpenseExporter;

impl CsvExpenseExporter {
  pub fn new() -> Self {
    Self
  }
}

impl ExpenseExporter for CsvExpenseExporter {
  fn content_type(&self) -> &'static str {
    "text/csv; charset=utf-8"
  }

  fn file_extension(&self) -> &'static str {
    "csv"
  }

  fn export(&self, expenses: &[Expense]) -> Result<Vec<u8>, ExpenseError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
      .write_record(HEADER)
      .map_err(|e| ExpenseError::ExportFailed(e.to_string()))?;

    for expense in expenses {
      let date = expense.date.format("%Y-%m-%d").to_string();
      let amount = format!("{:.2}", expense.amount.value());
      let description = expense
        .description
        .as_ref()
        .map(|d| d.value())
        .unwrap_or_default();

      writer
        .write_record([
          date.as_str(),
          expense.category.value(),
          amount.as_str(),
          description,
        ])
        .map_err(|e| ExpenseError::ExportFailed(e.to_string()))?;
    }

    writer
      .into_inner()
      .map_err(|e| ExpenseError::ExportFailed(e.to_string()))
  }
}
