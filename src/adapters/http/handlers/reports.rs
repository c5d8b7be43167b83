use actix_web::{
  HttpRequest, HttpResponse,
  http::header::{ContentDisposition, DispositionParam, DispositionType},
  web,
};
use std::sync::Arc;

use super::get_user;
use crate::adapters::http::{
  dtos::{ExportQuery, ReportQuery, SummaryQuery},
  errors::ApiError,
};
use crate::application::expense::{
  ExportExpensesCommand, ExportExpensesUseCase, ReportByCategoryCommand, ReportByCategoryUseCase,
  SummarizeExpensesCommand, SummarizeExpensesUseCase,
};

/// GET /summary?month=YYYY-MM&category=
pub async fn summary_handler(
  req: HttpRequest,
  query: web::Query<SummaryQuery>,
  use_case: web::Data<Arc<SummarizeExpensesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let query = query.into_inner();

  let summary = use_case
    .execute(SummarizeExpensesCommand {
      user_id: user.id,
      month: query.month,
      category: query.category,
    })
    .await?;

  Ok(HttpResponse::Ok().json(summary))
}

/// GET /report_by_category?month=YYYY-MM
pub async fn report_by_category_handler(
  req: HttpRequest,
  query: web::Query<ReportQuery>,
  use_case: web::Data<Arc<ReportByCategoryUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let report = use_case
    .execute(ReportByCategoryCommand {
      user_id: user.id,
      month: query.into_inner().month,
    })
    .await?;

  Ok(HttpResponse::Ok().json(report))
}

/// GET /export/expenses?from_date=YYYY-MM-DD&to_date=YYYY-MM-DD
///
/// Response: CSV attachment
pub async fn export_expenses_handler(
  req: HttpRequest,
  query: web::Query<ExportQuery>,
  use_case: web::Data<Arc<ExportExpensesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let query = query.into_inner();

  let export = use_case
    .execute(ExportExpensesCommand {
      user_id: user.id,
      from_date: query.from_date,
      to_date: query.to_date,
    })
    .await?;

  Ok(
    HttpResponse::Ok()
      .content_type(export.content_type)
      .insert_header(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(export.filename)],
      })
      .body(export.content),
  )
}
