#![allow(dead_code)]

use actix_web::{
  App, Error,
  body::MessageBody,
  dev::{ServiceFactory, ServiceRequest, ServiceResponse},
  middleware::NormalizePath,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

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
  domain::auth::{
    AuthError, AuthService, Identity, IdentityDirectory, RepositoryError, TokenVerifier, User,
    UserRepository, VerifiedToken,
  },
  domain::budget::{Budget, BudgetError, BudgetRepository, BudgetService},
  domain::expense::{
    Category, CategoryTotal, DateOrder, Expense, ExpenseError, ExpenseFilter, ExpenseRepository,
    ExpenseService, ExpenseSummary, Month,
  },
  infrastructure::export::CsvExpenseExporter,
};

pub const TEST_ISSUER: &str = "https://test.clerk.accounts.dev";
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Bearer header value for a test caller
pub fn bearer(name: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer token-{}", name))
}

/// Subject the stub verifier assigns to `token-<name>`
pub fn subject(name: &str) -> String {
  format!("user_{}", name)
}

// ---------------------------------------------------------------------------
// Identity stubs
// ---------------------------------------------------------------------------

/// Accepts `token-<name>` and rejects everything else; `token-expired` is
/// reported as expired.
pub struct StubTokenVerifier;

#[async_trait]
impl TokenVerifier for StubTokenVerifier {
  async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
    match token.strip_prefix("token-") {
      Some("expired") => Err(AuthError::TokenExpired),
      Some(name) if !name.is_empty() => Ok(VerifiedToken {
        subject: subject(name),
        issuer: TEST_ISSUER.to_string(),
        expires_at: i64::MAX,
        authorized_party: None,
      }),
      _ => Err(AuthError::InvalidToken("unrecognised test token".to_string())),
    }
  }
}

/// Every subject has the address `<subject>@example.com`
pub struct StubIdentityDirectory;

#[async_trait]
impl IdentityDirectory for StubIdentityDirectory {
  async fn lookup(&self, subject: &str) -> Result<Identity, AuthError> {
    Ok(Identity {
      external_id: subject.to_string(),
      email: format!("{}@example.com", subject),
    })
  }
}

// ---------------------------------------------------------------------------
// In-memory repositories
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUserRepository {
  users: Mutex<BTreeMap<Uuid, User>>,
}

impl InMemoryUserRepository {
  pub fn count(&self) -> usize {
    self.users.lock().unwrap().len()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn upsert_identity(&self, identity: &Identity) -> Result<User, AuthError> {
    let mut users = self.users.lock().unwrap();
    if let Some(user) = users
      .values_mut()
      .find(|user| user.external_id == identity.external_id)
    {
      user.email = identity.email.clone();
      return Ok(user.clone());
    }

    let user = User::new(identity.clone());
    users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    Ok(self.users.lock().unwrap().get(&id).cloned())
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.lock().unwrap();
    match users.get_mut(&user.id) {
      Some(stored) => {
        *stored = user.clone();
        Ok(user)
      }
      None => Err(RepositoryError::NotFound.into()),
    }
  }
}

#[derive(Default)]
pub struct InMemoryExpenseRepository {
  expenses: Mutex<Vec<Expense>>,
}

impl InMemoryExpenseRepository {
  fn select(&self, user_id: Uuid, filter: &ExpenseFilter) -> Vec<Expense> {
    let mut selected: Vec<Expense> = self
      .expenses
      .lock()
      .unwrap()
      .iter()
      .filter(|expense| expense.is_owned_by(user_id) && filter.matches(expense))
      .cloned()
      .collect();

    selected.sort_by(|a, b| (a.date, a.created_at).cmp(&(b.date, b.created_at)));
    if filter.order == DateOrder::NewestFirst {
      selected.reverse();
    }
    selected
  }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
  async fn create(&self, expense: Expense) -> Result<Expense, ExpenseError> {
    self.expenses.lock().unwrap().push(expense.clone());
    Ok(expense)
  }

  async fn update(&self, expense: Expense) -> Result<Expense, ExpenseError> {
    let mut expenses = self.expenses.lock().unwrap();
    let stored = expenses
      .iter_mut()
      .find(|stored| stored.id == expense.id && stored.user_id == expense.user_id)
      .ok_or(ExpenseError::NotFound(expense.id))?;
    *stored = expense.clone();
    Ok(expense)
  }

  async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Expense>, ExpenseError> {
    Ok(
      self
        .expenses
        .lock()
        .unwrap()
        .iter()
        .find(|expense| expense.id == id && expense.is_owned_by(user_id))
        .cloned(),
    )
  }

  async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, ExpenseError> {
    let mut expenses = self.expenses.lock().unwrap();
    let before = expenses.len();
    expenses.retain(|expense| !(expense.id == id && expense.is_owned_by(user_id)));
    Ok(expenses.len() != before)
  }

  async fn find_by_user(
    &self,
    user_id: Uuid,
    filter: &ExpenseFilter,
  ) -> Result<Vec<Expense>, ExpenseError> {
    Ok(self.select(user_id, filter))
  }

  async fn summarize(
    &self,
    user_id: Uuid,
    filter: &ExpenseFilter,
  ) -> Result<ExpenseSummary, ExpenseError> {
    let selected = self.select(user_id, filter);
    Ok(ExpenseSummary {
      total: selected.iter().map(|expense| expense.amount.value()).sum(),
      count: selected.len() as i64,
    })
  }

  async fn totals_by_category(
    &self,
    user_id: Uuid,
    filter: &ExpenseFilter,
  ) -> Result<Vec<CategoryTotal>, ExpenseError> {
    let mut totals: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();
    for expense in self.select(user_id, filter) {
      let entry = totals
        .entry(expense.category.value().to_string())
        .or_insert((Decimal::ZERO, 0));
      entry.0 += expense.amount.value();
      entry.1 += 1;
    }

    Ok(
      totals
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
          category,
          total,
          count,
        })
        .collect(),
    )
  }
}

#[derive(Default)]
pub struct InMemoryBudgetRepository {
  budgets: Mutex<Vec<Budget>>,
}

#[async_trait]
impl BudgetRepository for InMemoryBudgetRepository {
  async fn upsert(&self, budget: Budget) -> Result<Budget, BudgetError> {
    let mut budgets = self.budgets.lock().unwrap();
    if let Some(stored) = budgets.iter_mut().find(|stored| {
      stored.user_id == budget.user_id
        && stored.month == budget.month
        && stored.category == budget.category
    }) {
      stored.limit_amount = budget.limit_amount;
      stored.updated_at = budget.updated_at;
      return Ok(stored.clone());
    }

    budgets.push(budget.clone());
    Ok(budget)
  }

  async fn find(
    &self,
    user_id: Uuid,
    month: Month,
    category: Option<&Category>,
  ) -> Result<Option<Budget>, BudgetError> {
    Ok(
      self
        .budgets
        .lock()
        .unwrap()
        .iter()
        .find(|budget| {
          budget.user_id == user_id && budget.month == month && budget.category.as_ref() == category
        })
        .cloned(),
    )
  }

  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Budget>, BudgetError> {
    Ok(
      self
        .budgets
        .lock()
        .unwrap()
        .iter()
        .filter(|budget| budget.user_id == user_id)
        .cloned()
        .collect(),
    )
  }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

pub struct TestContext {
  pub users: Arc<InMemoryUserRepository>,
  pub expenses: Arc<InMemoryExpenseRepository>,
  pub budgets: Arc<InMemoryBudgetRepository>,
  pub expense_service: Arc<ExpenseService>,
  pub budget_service: Arc<BudgetService>,
  pub auth_service: Arc<AuthService>,
}

impl TestContext {
  pub fn new() -> Self {
    let users = Arc::new(InMemoryUserRepository::default());
    let expenses = Arc::new(InMemoryExpenseRepository::default());
    let budgets = Arc::new(InMemoryBudgetRepository::default());

    let auth_service = Arc::new(AuthService::new(
      Arc::new(StubTokenVerifier),
      Arc::new(StubIdentityDirectory),
      users.clone(),
    ));
    let expense_service = Arc::new(ExpenseService::new(expenses.clone()));
    let budget_service = Arc::new(BudgetService::new(budgets.clone(), expenses.clone()));

    Self {
      users,
      expenses,
      budgets,
      expense_service,
      budget_service,
      auth_service,
    }
  }

  pub fn dependencies(&self) -> ApiDependencies {
    let expense_service = self.expense_service.clone();
    let budget_service = self.budget_service.clone();
    let auth_service = self.auth_service.clone();

    ApiDependencies {
      authenticate_use_case: Arc::new(AuthenticateUserUseCase::new(auth_service.clone())),
      get_current_user_use_case: Arc::new(GetCurrentUserUseCase::new(auth_service.clone())),
      update_preferences_use_case: Arc::new(UpdatePreferencesUseCase::new(auth_service)),
      list_expenses_use_case: Arc::new(ListExpensesUseCase::new(expense_service.clone())),
      get_expense_use_case: Arc::new(GetExpenseUseCase::new(expense_service.clone())),
      create_expense_use_case: Arc::new(CreateExpenseUseCase::new(expense_service.clone())),
      update_expense_use_case: Arc::new(UpdateExpenseUseCase::new(expense_service.clone())),
      delete_expense_use_case: Arc::new(DeleteExpenseUseCase::new(expense_service.clone())),
      summarize_expenses_use_case: Arc::new(SummarizeExpensesUseCase::new(
        expense_service.clone(),
      )),
      report_by_category_use_case: Arc::new(ReportByCategoryUseCase::new(
        expense_service.clone(),
      )),
      export_expenses_use_case: Arc::new(ExportExpensesUseCase::new(
        expense_service,
        Arc::new(CsvExpenseExporter::new()),
      )),
      set_budget_use_case: Arc::new(SetBudgetUseCase::new(budget_service.clone())),
      get_budget_use_case: Arc::new(GetBudgetUseCase::new(budget_service.clone())),
      list_budgets_use_case: Arc::new(ListBudgetsUseCase::new(budget_service.clone())),
      get_budget_status_use_case: Arc::new(GetBudgetStatusUseCase::new(budget_service)),
    }
  }

  /// The application as `main` assembles it, minus rate limiting
  pub fn app(
    &self,
  ) -> App<
    impl ServiceFactory<
      ServiceRequest,
      Config = (),
      Response = ServiceResponse<impl MessageBody + use<>>,
      Error = Error,
      InitError = (),
    > + use<>,
  > {
    let deps = self.dependencies();
    App::new()
      .wrap(NormalizePath::trim())
      .wrap(cors_policy(&[ALLOWED_ORIGIN]))
      .wrap(RequestIdMiddleware::new())
      .configure(move |cfg| configure_api_routes(cfg, deps))
  }
}

impl Default for TestContext {
  fn default() -> Self {
    Self::new()
  }
}
