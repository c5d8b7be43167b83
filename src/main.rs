use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{
  App, HttpServer,
  middleware::{Condition, Logger, NormalizePath},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{
  adapters::http::{ApiDependencies, RequestIdMiddleware, configure_api_routes, cors_policy},
  application::auth::{AuthenticateUserUseCase, GetCurrentUserUseCase, UpdatePreferencesUseCase},
  application::budget::{
    GetBudgetStatusUseCase, GetBudgetUseCase, ListBudgetsUseCase, SetBudgetUseCase,
  },
  application::expense::{
    CreateExpenseUseCase, DeleteExpenseUseCase, ExportExpensesUseCase, GetExpenseUseCase,
    ListExpensesUseCase, ReportByCategoryUseCase, SummarizeExpensesUseCase, UpdateExpenseUseCase,
  },
  domain::auth::AuthService,
  domain::budget::BudgetService,
  domain::expense::ExpenseService,
  infrastructure::{
    config::Config,
    export::CsvExpenseExporter,
    identity::{JwksTokenVerifier, ProviderUserDirectory},
    persistence::postgres::{
      PostgresBudgetRepository, PostgresExpenseRepository, PostgresUserRepository,
    },
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "expense_tracker=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Expense Tracker API");

  // Load configuration
  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      format!("Invalid configuration: {}", e),
    )
  })?;
  tracing::info!("Configuration loaded successfully");

  if config.auth.secret_key.is_empty() {
    tracing::warn!("auth.secret_key is empty; user lookups at the identity provider will fail");
  }

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to run database migrations: {}", e);
      std::io::Error::other(format!("Migration error: {}", e))
    })?;
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let expense_repo = Arc::new(PostgresExpenseRepository::new(db_pool.clone()));
  let budget_repo = Arc::new(PostgresBudgetRepository::new(db_pool.clone()));

  // Initialize identity provider clients
  let token_verifier = Arc::new(JwksTokenVerifier::new(&config.auth));
  let identity_directory = Arc::new(ProviderUserDirectory::new(&config.auth));
  tracing::info!(issuer = %config.auth.issuer, "Identity provider configured");

  // Initialize domain services
  let auth_service = Arc::new(AuthService::new(
    token_verifier,
    identity_directory,
    user_repo,
  ));
  let expense_service = Arc::new(ExpenseService::new(expense_repo.clone()));
  let budget_service = Arc::new(BudgetService::new(budget_repo, expense_repo));

  // Initialize use cases
  let deps = ApiDependencies {
    authenticate_use_case: Arc::new(AuthenticateUserUseCase::new(auth_service.clone())),
    get_current_user_use_case: Arc::new(GetCurrentUserUseCase::new(auth_service.clone())),
    update_preferences_use_case: Arc::new(UpdatePreferencesUseCase::new(auth_service)),
    list_expenses_use_case: Arc::new(ListExpensesUseCase::new(expense_service.clone())),
    get_expense_use_case: Arc::new(GetExpenseUseCase::new(expense_service.clone())),
    create_expense_use_case: Arc::new(CreateExpenseUseCase::new(expense_service.clone())),
    update_expense_use_case: Arc::new(UpdateExpenseUseCase::new(expense_service.clone())),
    delete_expense_use_case: Arc::new(DeleteExpenseUseCase::new(expense_service.clone())),
    summarize_expenses_use_case: Arc::new(SummarizeExpensesUseCase::new(expense_service.clone())),
    report_by_category_use_case: Arc::new(ReportByCategoryUseCase::new(expense_service.clone())),
    export_expenses_use_case: Arc::new(ExportExpensesUseCase::new(
      expense_service,
      Arc::new(CsvExpenseExporter::new()),
    )),
    set_budget_use_case: Arc::new(SetBudgetUseCase::new(budget_service.clone())),
    get_budget_use_case: Arc::new(GetBudgetUseCase::new(budget_service.clone())),
    list_budgets_use_case: Arc::new(ListBudgetsUseCase::new(budget_service.clone())),
    get_budget_status_use_case: Arc::new(GetBudgetStatusUseCase::new(budget_service)),
  };

  // Per-IP rate limiting, only when configured
  let governor_config = match &config.rate_limit {
    Some(rate_limit) => Some(
      GovernorConfigBuilder::default()
        .milliseconds_per_request(rate_limit.replenish_interval_ms)
        .burst_size(rate_limit.burst_size)
        .finish()
        .ok_or_else(|| {
          tracing::error!("Invalid rate limit configuration: {:?}", rate_limit);
          std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Invalid rate limit configuration",
          )
        })?,
    ),
    None => None,
  };
  let rate_limit_enabled = governor_config.is_some();
  let governor_config = governor_config.unwrap_or_default();
  if rate_limit_enabled {
    tracing::info!("Rate limiting enabled");
  }

  let allowed_origins = config.cors.allowed_origins.clone();
  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      .wrap(Condition::new(
        rate_limit_enabled,
        Governor::new(&governor_config),
      ))
      .wrap(NormalizePath::trim())
      .wrap(cors_policy(allowed_origins.as_slice()))
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      .configure(|cfg| configure_api_routes(cfg, deps.clone()))
  })
  .bind((server_host, server_port))?
  .run()
  .await
}
