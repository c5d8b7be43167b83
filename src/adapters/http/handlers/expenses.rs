use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::get_user;
use crate::adapters::http::{
  dtos::{ExpenseRequest, ListExpensesQuery, SuccessResponse},
  errors::ApiError,
};
use crate::application::expense::{
  CreateExpenseCommand, CreateExpenseUseCase, DeleteExpenseCommand, DeleteExpenseUseCase,
  GetExpenseUseCase, ListExpensesCommand, ListExpensesUseCase, UpdateExpenseCommand,
  UpdateExpenseUseCase,
};

/// GET /expenses?from=&to=&category=
pub async fn list_expenses_handler(
  req: HttpRequest,
  query: web::Query<ListExpensesQuery>,
  use_case: web::Data<Arc<ListExpensesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let query = query.into_inner();

  let command = ListExpensesCommand {
    user_id: user.id,
    from: query.from,
    to: query.to,
    category: query.category,
  };

  let expenses = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(expenses))
}

/// POST /expenses
///
/// Response: ExpenseDto (JSON) with status 201
pub async fn create_expense_handler(
  req: HttpRequest,
  request: web::Json<ExpenseRequest>,
  use_case: web::Data<Arc<CreateExpenseUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  request.validate()?;

  let request = request.into_inner();
  let command = CreateExpenseCommand {
    user_id: user.id,
    amount: request.amount,
    category: request.category,
    date: request.date,
    description: request.description,
  };

  let expense = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(expense))
}

/// GET /expenses/{id}
pub async fn get_expense_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetExpenseUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let expense = use_case.execute(user.id, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(expense))
}

/// PUT /expenses/{id}
pub async fn update_expense_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<ExpenseRequest>,
  use_case: web::Data<Arc<UpdateExpenseUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  request.validate()?;

  let request = request.into_inner();
  let command = UpdateExpenseCommand {
    user_id: user.id,
    expense_id: path.into_inner(),
    amount: request.amount,
    category: request.category,
    date: request.date,
    description: request.description,
  };

  let expense = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(expense))
}

/// DELETE /expenses/{id}
pub async fn delete_expense_handler(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteExpenseUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  use_case
    .execute(DeleteExpenseCommand {
      user_id: user.id,
      expense_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
