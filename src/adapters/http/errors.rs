use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{
    StatusCode,
    header::{self, ContentType},
  },
};
use std::fmt;

use crate::domain::auth::errors::AuthError;
use crate::domain::budget::BudgetError;
use crate::domain::expense::{ExpenseError, ValueObjectError};

use super::dtos::ErrorResponse;

pub const EXPENSE_NOT_FOUND: &str = "Expense not found or unauthorized";
pub const BUDGET_NOT_FOUND: &str = "Budget not found";

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Authentication error (401 Unauthorized)
  Auth(AuthErrorKind),

  /// Missing, or owned by someone else (404 Not Found)
  NotFound(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
  /// No bearer token on the request
  MissingToken,

  /// Token rejected, or the caller could not be resolved at the provider
  InvalidToken,

  /// Token signature is fine but it has expired
  TokenExpired,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::MissingToken => (
          "missing_token",
          "Missing or invalid Authorization header".to_string(),
        ),
        AuthErrorKind::InvalidToken => ("invalid_token", "Invalid token".to_string()),
        AuthErrorKind::TokenExpired => ("token_expired", "Token has expired".to_string()),
      },
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    let mut builder = HttpResponse::build(status);
    if status == StatusCode::UNAUTHORIZED {
      builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
    }
    builder.content_type(ContentType::json()).json(error_response)
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::MissingToken => ApiError::Auth(AuthErrorKind::MissingToken),
      AuthError::TokenExpired => ApiError::Auth(AuthErrorKind::TokenExpired),
      AuthError::MalformedToken(_)
      | AuthError::UnknownSigningKey(_)
      | AuthError::InvalidToken(_)
      | AuthError::UnauthorizedParty(_)
      | AuthError::IncompleteProfile(_)
      | AuthError::UserNotFound
      // Logged by the auth middleware, which knows the request
      | AuthError::ProviderUnavailable(_) => ApiError::Auth(AuthErrorKind::InvalidToken),
      AuthError::InvalidPreferences(msg) => ApiError::Validation(msg),
      AuthError::Repository(err) => ApiError::Internal(format!("Repository error: {}", err)),
    }
  }
}

/// Convert ExpenseError to ApiError
impl From<ExpenseError> for ApiError {
  fn from(error: ExpenseError) -> Self {
    match error {
      ExpenseError::Validation(err) => ApiError::Validation(err.to_string()),
      ExpenseError::NotFound(_) => ApiError::NotFound(EXPENSE_NOT_FOUND.to_string()),
      ExpenseError::ExportFailed(msg) => ApiError::Internal(format!("Export failed: {}", msg)),
      ExpenseError::Database(err) => ApiError::Internal(format!("Database error: {}", err)),
      ExpenseError::Internal(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert BudgetError to ApiError
impl From<BudgetError> for ApiError {
  fn from(error: BudgetError) -> Self {
    match error {
      BudgetError::Validation(err) => ApiError::Validation(err.to_string()),
      BudgetError::NotFound { .. } => ApiError::NotFound(BUDGET_NOT_FOUND.to_string()),
      BudgetError::Expense(err) => ApiError::from(err),
      BudgetError::Database(err) => ApiError::Internal(format!("Database error: {}", err)),
      BudgetError::Internal(msg) => ApiError::Internal(msg),
    }
  }
}

impl From<ValueObjectError> for ApiError {
  fn from(error: ValueObjectError) -> Self {
    ApiError::Validation(error.to_string())
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}
