use actix_web::{error, web};
use std::sync::Arc;

use crate::application::auth::{
  AuthenticateUserUseCase, GetCurrentUserUseCase, UpdatePreferencesUseCase,
};
use crate::application::budget::{
  GetBudgetStatusUseCase, GetBudgetUseCase, ListBudgetsUseCase, SetBudgetUseCase,
};
use crate::application::expense::{
  CreateExpenseUseCase, DeleteExpenseUseCase, ExportExpensesUseCase, GetExpenseUseCase,
  ListExpensesUseCase, ReportByCategoryUseCase, SummarizeExpensesUseCase, UpdateExpenseUseCase,
};

use super::errors::ApiError;
use super::handlers::{budgets, expenses, reports, system, users};
use super::middleware::AuthMiddleware;

/// Everything the API routes need, built once in `main`
#[derive(Clone)]
pub struct ApiDependencies {
  pub authenticate_use_case: Arc<AuthenticateUserUseCase>,
  pub get_current_user_use_case: Arc<GetCurrentUserUseCase>,
  pub update_preferences_use_case: Arc<UpdatePreferencesUseCase>,
  pub list_expenses_use_case: Arc<ListExpensesUseCase>,
  pub get_expense_use_case: Arc<GetExpenseUseCase>,
  pub create_expense_use_case: Arc<CreateExpenseUseCase>,
  pub update_expense_use_case: Arc<UpdateExpenseUseCase>,
  pub delete_expense_use_case: Arc<DeleteExpenseUseCase>,
  pub summarize_expenses_use_case: Arc<SummarizeExpensesUseCase>,
  pub report_by_category_use_case: Arc<ReportByCategoryUseCase>,
  pub export_expenses_use_case: Arc<ExportExpensesUseCase>,
  pub set_budget_use_case: Arc<SetBudgetUseCase>,
  pub get_budget_use_case: Arc<GetBudgetUseCase>,
  pub list_budgets_use_case: Arc<ListBudgetsUseCase>,
  pub get_budget_status_use_case: Arc<GetBudgetStatusUseCase>,
}

/// Configure the expense tracker API
///
/// # Routes
///
/// Public:
/// - GET / - Liveness message
/// - GET /health - Plain `OK`
///
/// Authenticated (bearer token):
/// - GET /user/me, PUT /user/preferences
/// - GET|POST /expenses, GET|PUT|DELETE /expenses/{id}
/// - GET /summary, GET /report_by_category, GET /export/expenses
/// - POST /budgets, GET /budgets/{month}, GET /budgets/{month}/status, GET /budgets_all
///
/// Malformed JSON bodies, query strings and path parameters are answered with
/// 400 `validation_error` like any other invalid input.
///
/// # Example
///
/// ```no_run
/// use actix_web::App;
/// # use expense_tracker::adapters::http::routes::{ApiDependencies, configure_api_routes};
///
/// # fn example(deps: ApiDependencies) {
/// let app = App::new().configure(|cfg| configure_api_routes(cfg, deps.clone()));
/// # }
/// ```
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, deps: ApiDependencies) {
  let auth = deps.authenticate_use_case.clone();

  cfg
    .app_data(json_config())
    .app_data(query_config())
    .app_data(path_config())
    .app_data(web::Data::new(deps.get_current_user_use_case))
    .app_data(web::Data::new(deps.update_preferences_use_case))
    .app_data(web::Data::new(deps.list_expenses_use_case))
    .app_data(web::Data::new(deps.get_expense_use_case))
    .app_data(web::Data::new(deps.create_expense_use_case))
    .app_data(web::Data::new(deps.update_expense_use_case))
    .app_data(web::Data::new(deps.delete_expense_use_case))
    .app_data(web::Data::new(deps.summarize_expenses_use_case))
    .app_data(web::Data::new(deps.report_by_category_use_case))
    .app_data(web::Data::new(deps.export_expenses_use_case))
    .app_data(web::Data::new(deps.set_budget_use_case))
    .app_data(web::Data::new(deps.get_budget_use_case))
    .app_data(web::Data::new(deps.list_budgets_use_case))
    .app_data(web::Data::new(deps.get_budget_status_use_case));

  // Public routes
  cfg
    .route("/", web::get().to(system::root_handler))
    .route("/health", web::get().to(system::health_handler));

  // Protected routes (require authentication)
  cfg.service(
    web::scope("/user")
      .wrap(AuthMiddleware::new(auth.clone()))
      .route("/me", web::get().to(users::get_current_user_handler))
      .route(
        "/preferences",
        web::put().to(users::update_preferences_handler),
      ),
  );

  cfg.service(
    web::scope("/expenses")
      .wrap(AuthMiddleware::new(auth.clone()))
      .route("", web::get().to(expenses::list_expenses_handler))
      .route("", web::post().to(expenses::create_expense_handler))
      .route("/{id}", web::get().to(expenses::get_expense_handler))
      .route("/{id}", web::put().to(expenses::update_expense_handler))
      .route("/{id}", web::delete().to(expenses::delete_expense_handler)),
  );

  cfg
    .service(
      web::resource("/summary")
        .wrap(AuthMiddleware::new(auth.clone()))
        .route(web::get().to(reports::summary_handler)),
    )
    .service(
      web::resource("/report_by_category")
        .wrap(AuthMiddleware::new(auth.clone()))
        .route(web::get().to(reports::report_by_category_handler)),
    )
    .service(
      web::resource("/export/expenses")
        .wrap(AuthMiddleware::new(auth.clone()))
        .route(web::get().to(reports::export_expenses_handler)),
    );

  // Registered ahead of the /budgets scope
  cfg.service(
    web::resource("/budgets_all")
      .wrap(AuthMiddleware::new(auth.clone()))
      .route(web::get().to(budgets::list_budgets_handler)),
  );

  cfg.service(
    web::scope("/budgets")
      .wrap(AuthMiddleware::new(auth))
      .route("", web::post().to(budgets::set_budget_handler))
      .route("/{month}", web::get().to(budgets::get_budget_handler))
      .route(
        "/{month}/status",
        web::get().to(budgets::budget_status_handler),
      ),
  );
}

fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| {
    tracing::debug!("Rejected JSON body: {}", err);
    ApiError::Validation(err.to_string()).into()
  })
}

fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|err, _req| {
    tracing::debug!("Rejected query string: {}", err);
    ApiError::Validation(err.to_string()).into()
  })
}

fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|err: error::PathError, _req| {
    ApiError::Validation(err.to_string()).into()
  })
}
