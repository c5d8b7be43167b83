use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for creating or replacing an expense
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExpenseRequest {
  /// Positive amount with at most two decimals
  pub amount: Decimal,

  #[validate(length(
    min = 1,
    max = 50,
    message = "Category must be between 1 and 50 characters"
  ))]
  pub category: String,

  /// Day the money was spent (`YYYY-MM-DD`)
  pub date: NaiveDate,

  #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
  pub description: Option<String>,
}

/// Query parameters accepted by `GET /expenses`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListExpensesQuery {
  pub from: Option<NaiveDate>,
  pub to: Option<NaiveDate>,
  pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryQuery {
  pub month: Option<String>,
  pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
  pub month: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportQuery {
  pub from_date: NaiveDate,
  pub to_date: NaiveDate,
}

/// Request body for setting a monthly budget
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BudgetRequest {
  #[validate(length(equal = 7, message = "Month must be formatted as YYYY-MM"))]
  pub month: String,

  /// Omit for the overall budget of the month
  #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
  pub category: Option<String>,

  pub limit_amount: Decimal,
}

/// Optional category selector for budget lookups
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetQuery {
  pub category: Option<String>,
}

/// Request body for `PUT /user/preferences`; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePreferencesRequest {
  pub reminder_enabled: Option<bool>,

  #[validate(length(min = 4, max = 8, message = "Reminder time must be formatted as HH:MM"))]
  pub reminder_time: Option<String>,
}

/// Response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub success: bool,
}

/// Plain informational response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}
