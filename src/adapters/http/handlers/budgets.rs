use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::get_user;
use crate::adapters::http::{
  dtos::{BudgetQuery, BudgetRequest},
  errors::ApiError,
};
use crate::application::budget::{
  GetBudgetCommand, GetBudgetStatusCommand, GetBudgetStatusUseCase, GetBudgetUseCase,
  ListBudgetsUseCase, SetBudgetCommand, SetBudgetUseCase,
};

/// POST /budgets
///
/// Creates the budget or replaces the limit of an existing one.
pub async fn set_budget_handler(
  req: HttpRequest,
  request: web::Json<BudgetRequest>,
  use_case: web::Data<Arc<SetBudgetUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  request.validate()?;

  let request = request.into_inner();
  let budget = use_case
    .execute(SetBudgetCommand {
      user_id: user.id,
      month: request.month,
      category: request.category,
      limit_amount: request.limit_amount,
    })
    .await?;

  Ok(HttpResponse::Ok().json(budget))
}

/// GET /budgets/{month}?category=
pub async fn get_budget_handler(
  req: HttpRequest,
  path: web::Path<String>,
  query: web::Query<BudgetQuery>,
  use_case: web::Data<Arc<GetBudgetUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let budget = use_case
    .execute(GetBudgetCommand {
      user_id: user.id,
      month: path.into_inner(),
      category: query.into_inner().category,
    })
    .await?;

  Ok(HttpResponse::Ok().json(budget))
}

/// GET /budgets/{month}/status?category=
pub async fn budget_status_handler(
  req: HttpRequest,
  path: web::Path<String>,
  query: web::Query<BudgetQuery>,
  use_case: web::Data<Arc<GetBudgetStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let status = use_case
    .execute(GetBudgetStatusCommand {
      user_id: user.id,
      month: path.into_inner(),
      category: query.into_inner().category,
    })
    .await?;

  Ok(HttpResponse::Ok().json(status))
}

/// GET /budgets_all
pub async fn list_budgets_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<ListBudgetsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let budgets = use_case.execute(user.id).await?;
  Ok(HttpResponse::Ok().json(budgets))
}
